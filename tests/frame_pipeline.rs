use nalgebra::{Point2, Point3};
use tekframe::canvas::RecordingCanvas;
use tekframe::tek::{drawable_area, BEL, DEFAULT_MARGIN, GS};
use tekframe::viewport::{Rect, YAxis};
use tekframe::{ControlInput, FrameLoop, Mesh, MoveAxes, Pose, Renderer, Tek4010};

fn terrain() -> Mesh {
    Mesh::terrain(16, 2.0, |x, z| -4.0 + (x * 0.3).sin() + (z * 0.2).cos())
}

fn decode(block: &[u8]) -> Point2<i32> {
    let y = i32::from(block[0] - 0x20) * 32 + i32::from(block[1] - 0x60);
    let x = i32::from(block[2] - 0x20) * 32 + i32::from(block[3] - 0x40);
    Point2::new(x, y)
}

fn to_f64(p: &Point2<i32>) -> Point2<f64> {
    Point2::new(f64::from(p.x), f64::from(p.y))
}

#[test]
fn stats_account_for_every_edge() {
    let renderer = Renderer::new(terrain());
    let mut pose = Pose::at(Point3::new(0.0, 2.0, 10.0));
    for _ in 0..40 {
        pose = pose.advance(0.05, -0.01, MoveAxes::new(0, 0, 1));
        let frame = renderer.render(&pose, 640, 480);
        let s = frame.stats;
        assert_eq!(s.candidate_edges, 3 * s.triangles);
        assert_eq!(
            s.candidate_edges,
            s.depth_culled + s.clip_rejected + s.duplicates + s.drawn
        );
        assert_eq!(frame.edges.len(), s.drawn);
    }
}

#[test]
fn pooled_edges_are_canonical_clipped_and_distinct() {
    let renderer = Renderer::new(terrain());
    let frame = renderer.render(&Pose::at(Point3::new(0.0, 1.0, 12.0)), 640, 480);
    assert!(frame.stats.drawn > 0);
    assert!(frame.stats.duplicates > 0);

    for (i, e) in frame.edges.iter().enumerate() {
        assert_eq!(*e, e.canonical());
        for p in [e.a, e.b] {
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
        }
        for other in &frame.edges[..i] {
            let same = nalgebra::distance(&e.a, &other.a) <= 0.001
                && nalgebra::distance(&e.b, &other.b) <= 0.001;
            assert!(!same);
        }
    }
}

#[test]
fn canvas_and_terminal_receive_mirrored_geometry() {
    let renderer = Renderer::new(terrain());
    let pose = Pose::at(Point3::new(0.0, 1.0, 12.0));
    let remote = Some(Tek4010::new(Vec::<u8>::new()));
    let mut fl = FrameLoop::new(renderer, pose, (640, 480), remote).unwrap();
    let mut canvas = RecordingCanvas::default();
    let input = ControlInput {
        send_remote: true,
        ..ControlInput::default()
    };
    let stats = fl.step(&input, &mut canvas).unwrap();
    let bytes = fl.into_remote().unwrap().unwrap();

    assert_eq!(&bytes[..2], &[BEL, BEL]);
    let vectors = &bytes[2..];
    assert_eq!(vectors.len(), 9 * stats.drawn);
    assert_eq!(canvas.lines.len(), stats.drawn);

    let canvas_rect = Rect::from_size(640, 480);
    let remote_rect = drawable_area(DEFAULT_MARGIN);
    for (packet, (c0, c1)) in vectors.chunks(9).zip(&canvas.lines) {
        assert_eq!(packet[0], GS);
        let (r0, r1) = (decode(&packet[1..5]), decode(&packet[5..9]));
        // Recover approximate NDC from both outputs; the terminal is
        // Y-up and the canvas Y-down, yet both describe the same edge.
        for (c, r) in [(c0, r0), (c1, r1)] {
            let from_canvas = canvas_rect.unmap(&to_f64(c), YAxis::Down);
            let from_remote = remote_rect.unmap(&to_f64(&r), YAxis::Up);
            assert!((from_canvas - from_remote).norm() < 0.02);
        }
    }
}

#[test]
fn remote_only_on_requested_frames() {
    let renderer = Renderer::new(terrain());
    let pose = Pose::at(Point3::new(0.0, 1.0, 12.0));
    let remote = Some(Tek4010::new(Vec::<u8>::new()));
    let mut fl = FrameLoop::new(renderer, pose, (320, 240), remote).unwrap();
    let mut canvas = RecordingCanvas::default();
    for _ in 0..5 {
        fl.step(&ControlInput::default(), &mut canvas).unwrap();
    }
    let bytes = fl.into_remote().unwrap().unwrap();
    assert_eq!(bytes, vec![BEL]);
}
