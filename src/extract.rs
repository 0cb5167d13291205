//! Turn projected triangles into candidate 2D edges.
use super::common::*;
use super::mesh::Triangle;
use super::projection::ViewProjection;

/// Lowest NDC depth an endpoint may have and still be drawn.
pub const DEPTH_MIN: f64 = 0.0;
/// NDC depth at or beyond which an endpoint is culled.
pub const DEPTH_MAX: f64 = 1.0;

/// A 2D segment in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: NdcPoint,
    pub b: NdcPoint,
}

impl Edge {
    pub fn new(a: NdcPoint, b: NdcPoint) -> Self {
        Edge { a, b }
    }

    /// The same edge with its endpoints ordered so that the one with the
    /// larger x (then larger y) comes first.  Edge identity no longer
    /// depends on winding.
    pub fn canonical(self) -> Edge {
        if (self.b.x, self.b.y) > (self.a.x, self.a.y) {
            Edge::new(self.b, self.a)
        } else {
            self
        }
    }
}

/// What became of one triangle edge after projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate {
    /// An endpoint lies outside the drawable depth range.
    Culled,
    Visible(NdcPoint, NdcPoint),
}

/// True iff a projected point lies in `[DEPTH_MIN, DEPTH_MAX)`.
///
/// Non-finite depths (a vertex on the camera plane) fail the test.
pub fn in_depth_range(p: &Point3<f64>) -> bool {
    (DEPTH_MIN..DEPTH_MAX).contains(&p.z)
}

/// Project a triangle and classify its three edges `(0,1)`, `(1,2)` and
/// `(2,0)`.
///
/// The depth test is a coarse reject of whole edges, not a plane clip: an
/// edge that crosses the near side of the depth range disappears entirely.
pub fn triangle_edges(transform: &ViewProjection, triangle: &Triangle) -> [Candidate; 3] {
    let ndc = triangle.corners.map(|c| transform.project(&c));
    [0usize, 1, 2].map(|i| {
        let (start, end) = (&ndc[i], &ndc[(i + 1) % 3]);
        if in_depth_range(start) && in_depth_range(end) {
            Candidate::Visible(start.xy(), end.xy())
        } else {
            Candidate::Culled
        }
    })
}
