//! Cohen–Sutherland clipping of 2D segments against the normalized
//! device rectangle.
use super::common::*;
use bitflags::bitflags;

pub const CLIP_X_MIN: f64 = -1.0;
pub const CLIP_X_MAX: f64 = 1.0;
pub const CLIP_Y_MIN: f64 = -1.0;
pub const CLIP_Y_MAX: f64 = 1.0;

bitflags! {
    /// Region of a point relative to the clip rectangle.  Empty means
    /// inside or on the boundary.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct OutCode: u8 {
        const LEFT   = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const TOP    = 0b1000;
    }
}

impl OutCode {
    pub fn of(p: &NdcPoint) -> OutCode {
        let mut code = OutCode::empty();
        if p.x < CLIP_X_MIN {
            code |= OutCode::LEFT;
        } else if p.x > CLIP_X_MAX {
            code |= OutCode::RIGHT;
        }
        if p.y < CLIP_Y_MIN {
            code |= OutCode::BOTTOM;
        } else if p.y > CLIP_Y_MAX {
            code |= OutCode::TOP;
        }
        code
    }
}

/// Result from clipping a segment against the clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipResult {
    /// The segment cannot touch the rectangle.
    Outside,

    /// Both endpoints were already inside; returned unchanged.
    Inside(NdcPoint, NdcPoint),

    /// At least one endpoint was moved onto the boundary.
    Partial(NdcPoint, NdcPoint),
}

impl ClipResult {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ClipResult::Outside)
    }

    /// The accepted endpoints, if any.
    pub fn segment(self) -> Option<(NdcPoint, NdcPoint)> {
        match self {
            ClipResult::Outside => None,
            ClipResult::Inside(p0, p1) | ClipResult::Partial(p0, p1) => Some((p0, p1)),
        }
    }
}

/// Intersect the line through `p0` and `p1` with the one boundary named by
/// the highest priority bit of `code` (TOP, BOTTOM, RIGHT, LEFT).
fn boundary_intersection(p0: &NdcPoint, p1: &NdcPoint, code: OutCode) -> NdcPoint {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    if code.contains(OutCode::TOP) {
        NdcPoint::new(p0.x + dx * (CLIP_Y_MAX - p0.y) / dy, CLIP_Y_MAX)
    } else if code.contains(OutCode::BOTTOM) {
        NdcPoint::new(p0.x + dx * (CLIP_Y_MIN - p0.y) / dy, CLIP_Y_MIN)
    } else if code.contains(OutCode::RIGHT) {
        NdcPoint::new(CLIP_X_MAX, p0.y + dy * (CLIP_X_MAX - p0.x) / dx)
    } else {
        NdcPoint::new(CLIP_X_MIN, p0.y + dy * (CLIP_X_MIN - p0.x) / dx)
    }
}

/// Clip the segment `p0`-`p1`.
///
/// Repeatedly moves an outside endpoint (the first one, if both are
/// outside) onto a boundary until the segment is trivially accepted or
/// trivially rejected.  Every step puts one endpoint on a boundary line,
/// so the loop terminates.
pub fn clip_line(p0: NdcPoint, p1: NdcPoint) -> ClipResult {
    let mut points = [p0, p1];
    let mut codes = [OutCode::of(&p0), OutCode::of(&p1)];
    let mut moved = false;

    loop {
        if codes[0].is_empty() && codes[1].is_empty() {
            return if moved {
                ClipResult::Partial(points[0], points[1])
            } else {
                ClipResult::Inside(points[0], points[1])
            };
        }
        if codes[0].intersects(codes[1]) {
            return ClipResult::Outside;
        }

        let i = if codes[0].is_empty() { 1 } else { 0 };
        points[i] = boundary_intersection(&points[0], &points[1], codes[i]);
        codes[i] = OutCode::of(&points[i]);
        moved = true;
    }
}
