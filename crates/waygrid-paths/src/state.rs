use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::VertexId;

/// Distance of a vertex no search has reached.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Progress of a vertex within one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisitStatus {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// Reached, with a tentative distance waiting in the queue.
    Frontier,
    /// Removed from the queue; its distance and parent are final.
    Finalized,
}

/// Per-vertex bookkeeping of a search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeState {
    /// Best known path cost from the source.
    pub distance: f64,
    /// `distance` plus the heuristic to the target (A* only).
    pub estimate: f64,
    pub status: VisitStatus,
    /// Predecessor on the best known path.
    pub parent: Option<VertexId>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            distance: UNREACHABLE,
            estimate: UNREACHABLE,
            status: VisitStatus::Unvisited,
            parent: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Priority queue entries
// ---------------------------------------------------------------------------

/// Queue entry ordered by priority, then by insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) priority: f64,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest priority first,
        // and the earliest push among equals.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Result of one search over a graph.
///
/// Every search call resets and fills a `SearchState`, so separate states
/// can hold the results of separate queries against the same graph. Reusing
/// one state across calls (the `_into` search variants) avoids reallocating
/// its buffers.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub(crate) nodes: Vec<NodeState>,
    pub(crate) source: Option<VertexId>,
    pub(crate) target: Option<VertexId>,
    pub(crate) found: bool,
    pub(crate) order: Vec<VertexId>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put every vertex back to its unvisited state and seed the source.
    pub(crate) fn reset(&mut self, len: usize, source: VertexId, target: Option<VertexId>) {
        self.nodes.clear();
        self.nodes.resize(len, NodeState::default());
        self.order.clear();
        self.open.clear();
        self.seq = 0;
        self.found = false;
        self.target = target;
        self.source = (source.index() < len).then_some(source);
        if let Some(n) = self.nodes.get_mut(source.index()) {
            n.distance = 0.0;
            n.estimate = 0.0;
        }
    }

    pub(crate) fn push(&mut self, idx: usize, priority: f64) {
        self.open.push(NodeRef {
            idx,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        self.open.pop()
    }

    pub(crate) fn finalize(&mut self, idx: usize) {
        self.nodes[idx].status = VisitStatus::Finalized;
        self.order.push(VertexId::new(idx));
    }

    /// Source of the last search, if it named a vertex of the graph.
    #[inline]
    pub fn source(&self) -> Option<VertexId> {
        self.source
    }

    /// Target of the last targeted search.
    #[inline]
    pub fn target(&self) -> Option<VertexId> {
        self.target
    }

    /// Whether the last targeted search reached its target.
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }

    /// Number of vertices covered by this state.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, v: VertexId) -> Option<&NodeState> {
        self.nodes.get(v.index())
    }

    /// Shortest known distance to `v`, or [`UNREACHABLE`].
    #[inline]
    pub fn distance(&self, v: VertexId) -> f64 {
        self.node(v).map_or(UNREACHABLE, |n| n.distance)
    }

    /// Priority of `v` in the last A* search, or [`UNREACHABLE`].
    #[inline]
    pub fn estimate(&self, v: VertexId) -> f64 {
        self.node(v).map_or(UNREACHABLE, |n| n.estimate)
    }

    #[inline]
    pub fn status(&self, v: VertexId) -> VisitStatus {
        self.node(v).map_or(VisitStatus::Unvisited, |n| n.status)
    }

    #[inline]
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.node(v).and_then(|n| n.parent)
    }

    /// Whether the search found any path to `v`.
    #[inline]
    pub fn is_reached(&self, v: VertexId) -> bool {
        self.distance(v) < UNREACHABLE
    }

    /// Vertices in the order they were finalized.
    #[inline]
    pub fn finalize_order(&self) -> &[VertexId] {
        &self.order
    }

    /// Vertex ids from the source to `target`, or `None` if `target` was not
    /// reached.
    pub fn path_ids(&self, target: VertexId) -> Option<Vec<VertexId>> {
        let source = self.source?;
        if !self.is_reached(target) {
            return None;
        }
        let mut ids = vec![target];
        let mut cur = target;
        while cur != source {
            cur = self.parent(cur)?;
            ids.push(cur);
        }
        ids.reverse();
        Some(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_pops_lowest_priority_then_fifo() {
        let mut st = SearchState::new();
        st.reset(4, VertexId::new(0), None);
        st.push(0, 2.0);
        st.push(1, 1.0);
        st.push(2, 2.0);
        st.push(3, 0.5);
        let order: Vec<usize> = std::iter::from_fn(|| st.pop().map(|n| n.idx)).collect();
        assert_eq!(order, [3, 1, 0, 2]);
    }

    #[test]
    fn reset_seeds_source() {
        let mut st = SearchState::new();
        st.reset(3, VertexId::new(1), Some(VertexId::new(2)));
        assert_eq!(st.len(), 3);
        assert_eq!(st.distance(VertexId::new(1)), 0.0);
        assert_eq!(st.distance(VertexId::new(0)), UNREACHABLE);
        assert_eq!(st.status(VertexId::new(0)), VisitStatus::Unvisited);
        assert_eq!(st.source(), Some(VertexId::new(1)));
        assert_eq!(st.target(), Some(VertexId::new(2)));
        assert!(!st.found());
    }

    #[test]
    fn reset_with_unknown_source() {
        let mut st = SearchState::new();
        st.reset(2, VertexId::new(5), None);
        assert_eq!(st.source(), None);
        assert!(!st.is_reached(VertexId::new(0)));
        assert_eq!(st.path_ids(VertexId::new(0)), None);
    }

    #[test]
    fn unknown_vertex_queries() {
        let st = SearchState::new();
        assert!(st.is_empty());
        assert_eq!(st.distance(VertexId::new(3)), UNREACHABLE);
        assert_eq!(st.parent(VertexId::new(3)), None);
    }
}
