//! Encoder for Tektronix 4010-style vector terminals.
//!
//! The terminal addresses a 1024 x 780 grid with y growing upwards.  A
//! vector is drawn by entering graph mode (GS) and sending the addresses of
//! its two endpoints.  Each address is four printable bytes:
//!
//! | byte | value              |
//! |------|--------------------|
//! | 0    | `0x20 + y / 32`    |
//! | 1    | `0x60 + y % 32`    |
//! | 2    | `0x20 + x / 32`    |
//! | 3    | `0x40 + x % 32`    |
//!
//! Nothing is ever read back from the terminal.
use crate::common::*;
use crate::error::Result;
use crate::viewport::Rect;
use std::io::{BufWriter, Write};
use tracing::trace;

pub const SCREEN_WIDTH: i32 = 1024;
pub const SCREEN_HEIGHT: i32 = 780;

/// Margin between the drawable area and the screen edge.
pub const DEFAULT_MARGIN: f64 = 10.0;

/// Enter graph (vector) mode.
pub const GS: u8 = 0x1D;
/// Bell.
pub const BEL: u8 = 0x07;

/// The screen inset by `margin` on every side.
pub fn drawable_area(margin: f64) -> Rect {
    Rect::new(0.0, 0.0, f64::from(SCREEN_WIDTH), f64::from(SCREEN_HEIGHT)).inset(margin)
}

pub fn is_addressable(p: &Point2<i32>) -> bool {
    (0..SCREEN_WIDTH).contains(&p.x) && (0..SCREEN_HEIGHT).contains(&p.y)
}

/// Address bytes for a point, or `None` if it is off screen.
pub fn encode_address(p: &Point2<i32>) -> Option<[u8; 4]> {
    if !is_addressable(p) {
        return None;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    Some([
        (0x20 + y / 32) as u8,
        (0x60 + y % 32) as u8,
        (0x20 + x / 32) as u8,
        (0x40 + x % 32) as u8,
    ])
}

/// Fire-and-forget connection to a vector terminal.
///
/// Writes are buffered; call [`Tek4010::flush`] at the end of each frame.
pub struct Tek4010<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> Tek4010<W> {
    pub fn new(writer: W) -> Self {
        Tek4010 {
            out: BufWriter::new(writer),
        }
    }

    /// Ring the terminal bell.
    pub fn alert(&mut self) -> Result<()> {
        self.out.write_all(&[BEL])?;
        Ok(())
    }

    /// Queue a vector from `p0` to `p1`.
    ///
    /// If either endpoint is off screen nothing is written and `Ok(false)`
    /// is returned.
    pub fn draw_line(&mut self, p0: &Point2<i32>, p1: &Point2<i32>) -> Result<bool> {
        let (a0, a1) = match (encode_address(p0), encode_address(p1)) {
            (Some(a0), Some(a1)) => (a0, a1),
            _ => {
                trace!(?p0, ?p1, "skipping off-screen vector");
                return Ok(false);
            }
        };
        let mut packet = [0u8; 9];
        packet[0] = GS;
        packet[1..5].copy_from_slice(&a0);
        packet[5..9].copy_from_slice(&a1);
        self.out.write_all(&packet)?;
        Ok(true)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        Ok(self.out.into_inner().map_err(|e| e.into_error())?)
    }
}
