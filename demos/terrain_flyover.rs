extern crate tekframe;

use nalgebra::Point3;
use tekframe::canvas::SvgCanvas;
use tekframe::{ControlInput, FrameLoop, Mesh, MoveAxes, Pose, Renderer};

/// Fly forward over a rolling terrain while slowly turning, and print the
/// final frame as SVG.
fn main() {
    let (w, h) = (800, 600);
    let mesh = Mesh::terrain(40, 2.0, |x, z| -6.0 + 2.0 * (x * 0.15).sin() * (z * 0.1).cos());
    let renderer = Renderer::new(mesh);
    let pose = Pose::at(Point3::new(0.0, 0.0, 40.0));

    let mut frame_loop: FrameLoop<std::io::Sink> =
        FrameLoop::new(renderer, pose, (w, h), None).unwrap();
    let mut canvas = SvgCanvas::new(w, h);
    let input = ControlInput {
        pan: 0.01,
        axes: MoveAxes::new(0, 0, 1),
        ..ControlInput::default()
    };
    for _ in 0..30 {
        canvas.clear();
        let stats = frame_loop.step(&input, &mut canvas).unwrap();
        eprintln!("{:?}", stats);
    }
    println!("{}", canvas.document());
}
