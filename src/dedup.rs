//! Per-frame pool of accepted edges with tolerance-based deduplication.
use super::common::*;
use super::extract::Edge;

/// Endpoint distance, in NDC units, under which two edges are the same.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Edges accepted so far this frame, in extraction order.
///
/// Adjacent triangles emit their shared edge twice (usually with opposite
/// winding).  Each insert is compared against every pooled edge; the first
/// copy wins.
#[derive(Clone, Debug)]
pub struct EdgePool {
    tolerance: f64,
    edges: Vec<Edge>,
}

impl Default for EdgePool {
    fn default() -> Self {
        EdgePool::new(DEFAULT_TOLERANCE)
    }
}

impl EdgePool {
    pub fn new(tolerance: f64) -> Self {
        EdgePool {
            tolerance,
            edges: vec![],
        }
    }

    fn same(&self, lhs: &Edge, rhs: &Edge) -> bool {
        na::distance(&lhs.a, &rhs.a) <= self.tolerance
            && na::distance(&lhs.b, &rhs.b) <= self.tolerance
    }

    /// Canonicalize `edge` and add it unless an equivalent edge is already
    /// pooled.  Returns true if the edge was added.
    pub fn insert(&mut self, edge: Edge) -> bool {
        let edge = edge.canonical();
        if self.edges.iter().any(|e| self.same(e, &edge)) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}
