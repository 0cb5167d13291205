//! Ties the camera, the renderer and both outputs together, frame by frame.
use crate::camera::{ControlInput, Pose};
use crate::canvas::LineSink;
use crate::error::Result;
use crate::render::{FrameStats, Renderer};
use crate::tek::{drawable_area, Tek4010, DEFAULT_MARGIN};
use crate::viewport::Rect;
use std::io::Write;
use tracing::debug;

/// Drives one camera over one mesh.
///
/// The pose is the only state carried between frames.  Every frame the
/// geometry is rebuilt from scratch, drawn to the canvas and, on request,
/// sent to the remote terminal.  Remote writes block: a stalled terminal
/// stalls the loop.
pub struct FrameLoop<W: Write> {
    pose: Pose,
    renderer: Renderer,
    canvas_size: (u32, u32),
    remote: Option<Tek4010<W>>,
    remote_area: Rect,
}

impl<W: Write> FrameLoop<W> {
    /// Set up the loop.  If a remote terminal is attached it is alerted
    /// once straight away.
    pub fn new(
        renderer: Renderer,
        pose: Pose,
        canvas_size: (u32, u32),
        remote: Option<Tek4010<W>>,
    ) -> Result<Self> {
        let mut frame_loop = FrameLoop {
            pose,
            renderer,
            canvas_size,
            remote,
            remote_area: drawable_area(DEFAULT_MARGIN),
        };
        if let Some(tek) = frame_loop.remote.as_mut() {
            tek.alert()?;
            tek.flush()?;
        }
        Ok(frame_loop)
    }

    /// Use a different inset for the terminal's drawable area.
    pub fn with_remote_margin(mut self, margin: f64) -> Self {
        self.remote_area = drawable_area(margin);
        self
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Canvas resize, e.g. after the window changed.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width, height);
    }

    /// Advance the camera by `input`, render, and emit the frame.
    pub fn step<S: LineSink + ?Sized>(
        &mut self,
        input: &ControlInput,
        canvas: &mut S,
    ) -> Result<FrameStats> {
        self.pose = self.pose.apply(input);
        let (width, height) = self.canvas_size;
        let frame = self.renderer.render(&self.pose, width, height);
        frame.draw(canvas, &Rect::from_size(width, height));

        if input.send_remote {
            if let Some(tek) = self.remote.as_mut() {
                tek.alert()?;
                let sent = frame.transmit(tek, &self.remote_area)?;
                tek.flush()?;
                debug!(sent, "frame sent to remote terminal");
            }
        }
        Ok(frame.stats)
    }

    /// Tear down, handing back the remote writer.
    pub fn into_remote(self) -> Result<Option<W>> {
        self.remote.map(Tek4010::into_inner).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MoveAxes;
    use crate::canvas::RecordingCanvas;
    use crate::common::*;
    use crate::mesh::{Mesh, Triangle};
    use crate::tek::{BEL, GS};

    fn renderer() -> Renderer {
        Renderer::new(Mesh::from(vec![Triangle::new(
            Point3::new(-1.0, -1.0, -5.0),
            Point3::new(1.0, -1.0, -5.0),
            Point3::new(0.0, 1.0, -5.0),
        )]))
    }

    #[test]
    fn alerts_at_startup_and_per_sent_frame() {
        let remote = Some(Tek4010::new(Vec::<u8>::new()));
        let mut fl = FrameLoop::new(renderer(), Pose::default(), (320, 240), remote).unwrap();
        let mut canvas = RecordingCanvas::default();

        let quiet = ControlInput::default();
        fl.step(&quiet, &mut canvas).unwrap();

        let loud = ControlInput {
            send_remote: true,
            ..ControlInput::default()
        };
        fl.step(&loud, &mut canvas).unwrap();

        let bytes = fl.into_remote().unwrap().unwrap();
        assert_eq!(bytes.len(), 1 + 1 + 3 * 9);
        assert_eq!(&bytes[..2], &[BEL, BEL]);
        assert_eq!(bytes.iter().filter(|&&b| b == GS).count(), 3);
        // Both frames reached the canvas.
        assert_eq!(canvas.lines.len(), 6);
    }

    #[test]
    fn pose_carries_between_frames() {
        let mut fl: FrameLoop<Vec<u8>> =
            FrameLoop::new(renderer(), Pose::default(), (320, 240), None).unwrap();
        let mut canvas = RecordingCanvas::default();
        let forward = ControlInput {
            axes: MoveAxes::new(0, 0, 1),
            ..ControlInput::default()
        };
        for _ in 0..3 {
            fl.step(&forward, &mut canvas).unwrap();
        }
        assert_eq!(fl.pose().position, Point3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn walking_through_the_mesh_culls_it() {
        let mut fl: FrameLoop<Vec<u8>> =
            FrameLoop::new(renderer(), Pose::default(), (320, 240), None).unwrap();
        let mut canvas = RecordingCanvas::default();
        let forward = ControlInput {
            axes: MoveAxes::new(0, 0, 1),
            ..ControlInput::default()
        };
        let mut last = FrameStats::default();
        for _ in 0..6 {
            last = fl.step(&forward, &mut canvas).unwrap();
        }
        assert_eq!(last.drawn, 0);
        assert_eq!(last.depth_culled, 3);
    }
}
