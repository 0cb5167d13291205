//! Mapping from normalized device coordinates into output rectangles.
use super::common::*;

/// Direction of increasing y in a destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YAxis {
    /// Screen style: y grows downwards (local canvas).
    Down,
    /// Plotter style: y grows upwards (remote terminal).
    Up,
}

/// A destination rectangle in device units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin covering `width` x `height` pixels.
    pub fn from_size(width: u32, height: u32) -> Self {
        Rect::new(0.0, 0.0, f64::from(width), f64::from(height))
    }

    /// Shrink by `margin` on every side.
    pub fn inset(&self, margin: f64) -> Self {
        Rect::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Map an NDC point into this rectangle without truncation.
    pub fn map_exact(&self, p: &NdcPoint, y_axis: YAxis) -> Point2<f64> {
        let sy = match y_axis {
            YAxis::Down => -0.5,
            YAxis::Up => 0.5,
        };
        Point2::new(
            self.x + self.width * (0.5 + 0.5 * p.x),
            self.y + self.height * (0.5 + sy * p.y),
        )
    }

    /// Map an NDC point to integer device coordinates, truncating toward
    /// zero.
    pub fn map(&self, p: &NdcPoint, y_axis: YAxis) -> Point2<i32> {
        let q = self.map_exact(p, y_axis);
        Point2::new(q.x as i32, q.y as i32)
    }

    /// Inverse of [`Rect::map_exact`].
    pub fn unmap(&self, q: &Point2<f64>, y_axis: YAxis) -> NdcPoint {
        let x = ((q.x - self.x) / self.width - 0.5) * 2.0;
        let y = ((q.y - self.y) / self.height - 0.5) * 2.0;
        match y_axis {
            YAxis::Down => NdcPoint::new(x, -y),
            YAxis::Up => NdcPoint::new(x, y),
        }
    }
}
