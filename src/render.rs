//! Per-frame geometry pipeline: mesh and pose in, deduplicated 2D edges out.
use crate::camera::Pose;
use crate::canvas::LineSink;
use crate::clip::clip_line;
use crate::dedup::{EdgePool, DEFAULT_TOLERANCE};
use crate::error::Result;
use crate::extract::{triangle_edges, Candidate, Edge};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::tek::Tek4010;
use crate::viewport::{Rect, YAxis};
use std::io::Write;
use tracing::debug;

/// Counters describing what happened to the mesh's edges in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub candidate_edges: usize,
    pub depth_culled: usize,
    pub clip_rejected: usize,
    pub duplicates: usize,
    /// Edges left after deduplication.
    pub drawn: usize,
}

/// The edges to draw for one frame, in extraction order.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub edges: Vec<Edge>,
    pub stats: FrameStats,
}

impl Frame {
    /// Draw every edge onto a Y-down canvas covering `rect`.
    pub fn draw<S: LineSink + ?Sized>(&self, sink: &mut S, rect: &Rect) {
        for edge in &self.edges {
            sink.draw_line(rect.map(&edge.a, YAxis::Down), rect.map(&edge.b, YAxis::Down));
        }
    }

    /// Send every edge to a Y-up terminal area.  Returns the number of
    /// vectors actually written.
    pub fn transmit<W: Write>(&self, tek: &mut Tek4010<W>, rect: &Rect) -> Result<usize> {
        let mut sent = 0;
        for edge in &self.edges {
            let p0 = rect.map(&edge.a, YAxis::Up);
            let p1 = rect.map(&edge.b, YAxis::Up);
            if tek.draw_line(&p0, &p1)? {
                sent += 1;
            }
        }
        Ok(sent)
    }
}

/// Renders a fixed mesh from any pose.
#[derive(Clone, Debug)]
pub struct Renderer {
    mesh: Mesh,
    projection: Projection,
    tolerance: f64,
}

impl Renderer {
    pub fn new(mesh: Mesh) -> Self {
        Renderer {
            mesh,
            projection: Projection::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Endpoint distance under which two edges are merged.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Run the pipeline for a viewport of `width` x `height` pixels.
    ///
    /// The viewport size only feeds the aspect ratio; edges come back in
    /// normalized device coordinates.
    pub fn render(&self, pose: &Pose, width: u32, height: u32) -> Frame {
        let transform = self.projection.build(pose, width, height);
        let mut pool = EdgePool::new(self.tolerance);
        let mut stats = FrameStats {
            triangles: self.mesh.len(),
            ..FrameStats::default()
        };

        for triangle in self.mesh.triangles() {
            for candidate in triangle_edges(&transform, triangle) {
                stats.candidate_edges += 1;
                let (a, b) = match candidate {
                    Candidate::Visible(a, b) => (a, b),
                    Candidate::Culled => {
                        stats.depth_culled += 1;
                        continue;
                    }
                };
                match clip_line(a, b).segment() {
                    None => stats.clip_rejected += 1,
                    Some((a, b)) => {
                        if !pool.insert(Edge::new(a, b)) {
                            stats.duplicates += 1;
                        }
                    }
                }
            }
        }

        stats.drawn = pool.len();
        debug!(?stats, "frame rendered");
        Frame {
            edges: pool.into_edges(),
            stats,
        }
    }
}
