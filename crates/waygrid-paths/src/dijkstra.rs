use std::borrow::BorrowMut;

use crate::graph::{EdgePolicy, Graph, Vertex, VertexId};
use crate::state::{SearchState, VisitStatus};

impl<T, P, S> Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    /// Uniform-cost search from `source` to every reachable vertex.
    ///
    /// Afterwards each reached vertex holds its minimum distance from
    /// `source` and a parent chain along one shortest path. Unreached
    /// vertices keep [`UNREACHABLE`](crate::UNREACHABLE) and no parent.
    pub fn dijkstra(&self, source: VertexId) -> SearchState {
        let mut state = SearchState::new();
        self.dijkstra_into(&mut state, source);
        state
    }

    /// [`dijkstra`](Self::dijkstra) writing into a reused state.
    pub fn dijkstra_into(&self, state: &mut SearchState, source: VertexId) {
        self.uniform_cost(state, source, None);
        log::trace!(
            "dijkstra from {source}: finalized {} of {} vertices",
            state.order.len(),
            self.vertex_count()
        );
    }

    /// Uniform-cost search from `source`, stopping as soon as `target` is
    /// finalized.
    ///
    /// Check [`SearchState::found`] for reachability: an unreachable target
    /// keeps an infinite distance and no parent.
    pub fn dijkstra_to(&self, source: VertexId, target: VertexId) -> SearchState {
        let mut state = SearchState::new();
        self.dijkstra_to_into(&mut state, source, target);
        state
    }

    /// [`dijkstra_to`](Self::dijkstra_to) writing into a reused state.
    pub fn dijkstra_to_into(&self, state: &mut SearchState, source: VertexId, target: VertexId) {
        self.uniform_cost(state, source, Some(target));
        log::trace!(
            "dijkstra {source} -> {target}: found={} after {} vertices",
            state.found,
            state.order.len()
        );
    }

    fn uniform_cost(&self, state: &mut SearchState, source: VertexId, target: Option<VertexId>) {
        let vertices = self.store();
        state.reset(vertices.len(), source, target);
        if state.source.is_none() {
            return;
        }
        state.push(source.index(), 0.0);

        while let Some(current) = state.pop() {
            let ci = current.idx;
            // The queue has no decrease-key: skip stale duplicates.
            if state.nodes[ci].status == VisitStatus::Finalized {
                continue;
            }
            state.finalize(ci);
            if target.is_some_and(|t| t.index() == ci) {
                state.found = true;
                return;
            }

            let current_d = state.nodes[ci].distance;
            for edge in vertices[ci].adjacent() {
                let ni = edge.to.index();
                let tentative = current_d + edge.weight;
                let n = &mut state.nodes[ni];
                if n.status == VisitStatus::Finalized || tentative >= n.distance {
                    continue;
                }
                n.distance = tentative;
                n.estimate = tentative;
                n.parent = Some(VertexId::new(ci));
                n.status = VisitStatus::Frontier;
                state.push(ni, tentative);
            }
        }
    }
}
