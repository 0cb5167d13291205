extern crate tekframe;

use nalgebra::Point3;
use std::io::Write;
use tekframe::mesh::Triangle;
use tekframe::tek::{drawable_area, DEFAULT_MARGIN};
use tekframe::{Mesh, Pose, Renderer, Tek4010};

/// Write one frame of a tetrahedron as raw Tektronix 4010 bytes to
/// stdout.  Pipe it into a terminal emulator with Tek support.
fn main() {
    let a = Point3::new(1.0, 1.0, 1.0);
    let b = Point3::new(1.0, -1.0, -1.0);
    let c = Point3::new(-1.0, 1.0, -1.0);
    let d = Point3::new(-1.0, -1.0, 1.0);
    let mesh = Mesh::from(vec![
        Triangle::new(a, b, c),
        Triangle::new(a, c, d),
        Triangle::new(a, d, b),
        Triangle::new(b, d, c),
    ]);
    let renderer = Renderer::new(mesh);
    let pose = Pose {
        position: Point3::new(2.5, 1.5, 4.0),
        pan: 0.5,
        tilt: -0.3,
    };

    let frame = renderer.render(&pose, 1024, 780);
    let stdout = std::io::stdout();
    let mut tek = Tek4010::new(stdout.lock());
    tek.alert().unwrap();
    let sent = frame
        .transmit(&mut tek, &drawable_area(DEFAULT_MARGIN))
        .unwrap();
    tek.into_inner().unwrap().flush().unwrap();
    eprintln!("sent {} of {} edges", sent, frame.edges.len());
}
