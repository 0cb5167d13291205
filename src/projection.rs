//! Perspective projection and the combined per-frame transform.
use super::camera::Pose;
use super::common::*;

/// Perspective parameters shared by every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Projection {
            fov_y: 60f64.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Projection {
    /// Projection matrix for a viewport of the given pixel size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; the aspect ratio would be
    /// undefined.
    pub fn matrix(&self, width: u32, height: u32) -> Matrix4<f64> {
        assert!(height > 0, "viewport height must be non-zero");
        assert!(width > 0, "viewport width must be non-zero");
        let aspect = f64::from(width) / f64::from(height);
        na::Perspective3::new(aspect, self.fov_y, self.znear, self.zfar).to_homogeneous()
    }

    /// Compose projection, the camera's view and an identity model
    /// transform into the single transform used for every vertex this
    /// frame.
    pub fn build(&self, pose: &Pose, width: u32, height: u32) -> ViewProjection {
        let model = Matrix4::identity();
        ViewProjection(self.matrix(width, height) * pose.view_matrix() * model)
    }
}

/// World to clip space transform for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProjection(pub Matrix4<f64>);

impl ViewProjection {
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// Transform a point into clip space and perform the perspective
    /// divide.
    ///
    /// A zero `w` yields non-finite coordinates, which downstream depth
    /// tests treat as out of range.
    pub fn project(&self, world_point: &Point3<f64>) -> Point3<f64> {
        let clip = self.0 * world_point.to_homogeneous();
        Point3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    }
}
