//! Free-flying camera pose and the view transform derived from it.
use super::common::*;

/// Signal for a single translation axis, built from a pair of opposing
/// controls.  Holding both controls cancels out.
pub fn axis_signal(positive: bool, negative: bool) -> i8 {
    i8::from(positive) - i8::from(negative)
}

/// Per-frame translation request along the camera's rotated axes.
///
/// Each component is a signed unit signal; values outside `-1..=1` are
/// reduced to their sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveAxes {
    /// Along the rotated +X axis.
    pub lateral: i8,
    /// Along the rotated +Y axis.
    pub vertical: i8,
    /// Along the rotated view direction (-Z).
    pub forward: i8,
}

impl MoveAxes {
    pub const NONE: MoveAxes = MoveAxes {
        lateral: 0,
        vertical: 0,
        forward: 0,
    };

    pub fn new(lateral: i8, vertical: i8, forward: i8) -> Self {
        MoveAxes {
            lateral,
            vertical,
            forward,
        }
    }
}

/// Everything the frame loop reads from its controls for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Pan change in radians.
    pub pan: f64,
    /// Tilt change in radians.
    pub tilt: f64,
    pub axes: MoveAxes,
    /// Also transmit this frame to the remote terminal.
    pub send_remote: bool,
}

/// The rotated camera axes for a given pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub left: Vector3<f64>,
    pub up: Vector3<f64>,
    pub forward: Vector3<f64>,
}

/// Camera position plus accumulated pan and tilt angles.
///
/// Angles are never wrapped or clamped.  The pose is a plain value: the
/// frame loop owns it and replaces it with the result of [`Pose::advance`]
/// once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Point3<f64>,
    pub pan: f64,
    pub tilt: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Pose::at(Point3::origin())
    }
}

impl Pose {
    /// A pose at `position` looking down world -Z.
    pub fn at(position: Point3<f64>) -> Pose {
        Pose {
            position,
            pan: 0.0,
            tilt: 0.0,
        }
    }

    /// Combined camera rotation.
    ///
    /// Pan turns around world up.  Tilt turns around the *panned* +X
    /// axis, and is applied after the pan.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        let pan = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.pan);
        let tilt_axis = na::Unit::new_normalize(pan * Vector3::x());
        let tilt = UnitQuaternion::from_axis_angle(&tilt_axis, self.tilt);
        tilt * pan
    }

    pub fn basis(&self) -> Basis {
        let rot = self.rotation();
        Basis {
            left: rot * Vector3::x(),
            up: rot * Vector3::y(),
            forward: rot * -Vector3::z(),
        }
    }

    /// Apply one frame of control input and return the new pose.
    ///
    /// The angles are updated first; translation then follows the axes of
    /// the *updated* rotation, one unit per active axis.
    pub fn advance(self, pan_delta: f64, tilt_delta: f64, axes: MoveAxes) -> Pose {
        let mut next = Pose {
            pan: self.pan + pan_delta,
            tilt: self.tilt + tilt_delta,
            ..self
        };
        let basis = next.basis();
        next.position += basis.left * f64::from(axes.lateral.signum())
            + basis.up * f64::from(axes.vertical.signum())
            + basis.forward * f64::from(axes.forward.signum());
        next
    }

    /// Shorthand for [`Pose::advance`] with a full control record.
    pub fn apply(self, input: &ControlInput) -> Pose {
        self.advance(input.pan, input.tilt, input.axes)
    }

    /// Right-handed look-at transform from world to camera space.
    pub fn view_matrix(&self) -> Matrix4<f64> {
        let basis = self.basis();
        let target = self.position + basis.forward;
        na::Isometry3::look_at_rh(&self.position, &target, &basis.up).to_homogeneous()
    }
}
