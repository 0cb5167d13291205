//! Local line sinks.
use crate::common::*;

/// Anything that can draw a pixel-space line.
pub trait LineSink {
    fn draw_line(&mut self, p0: Point2<i32>, p1: Point2<i32>);
}

/// Keeps every line it is asked to draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingCanvas {
    pub lines: Vec<(Point2<i32>, Point2<i32>)>,
}

impl LineSink for RecordingCanvas {
    fn draw_line(&mut self, p0: Point2<i32>, p1: Point2<i32>) {
        self.lines.push((p0, p1));
    }
}

#[cfg(feature = "svg")]
pub use self::svg_canvas::SvgCanvas;

#[cfg(feature = "svg")]
mod svg_canvas {
    use super::LineSink;
    use crate::common::*;
    use crate::error::Result;
    use std::path::Path;
    use svg::node::element::{Line, Rectangle};
    use svg::Document;

    /// Background colour of a cleared frame.
    const BACKGROUND: &str = "#000080";

    /// One frame rendered as an SVG document.
    #[derive(Clone, Debug)]
    pub struct SvgCanvas {
        width: u32,
        height: u32,
        lines: Vec<(Point2<i32>, Point2<i32>)>,
    }

    impl SvgCanvas {
        pub fn new(width: u32, height: u32) -> Self {
            SvgCanvas {
                width,
                height,
                lines: vec![],
            }
        }

        /// Forget all lines, ready for the next frame.
        pub fn clear(&mut self) {
            self.lines.clear();
        }

        pub fn document(&self) -> Document {
            let mut doc = Document::new()
                .set("width", self.width)
                .set("height", self.height)
                .set("viewBox", format!("0 0 {} {}", self.width, self.height))
                .add(
                    Rectangle::new()
                        .set("width", "100%")
                        .set("height", "100%")
                        .set("fill", BACKGROUND),
                );
            for (p0, p1) in &self.lines {
                doc = doc.add(
                    Line::new()
                        .set("x1", p0.x)
                        .set("y1", p0.y)
                        .set("x2", p1.x)
                        .set("y2", p1.y)
                        .set("stroke", "white")
                        .set("stroke-width", 1),
                );
            }
            doc
        }

        pub fn save(&self, path: &Path) -> Result<()> {
            svg::save(path, &self.document())?;
            Ok(())
        }
    }

    impl LineSink for SvgCanvas {
        fn draw_line(&mut self, p0: Point2<i32>, p1: Point2<i32>) {
            self.lines.push((p0, p1));
        }
    }

}
