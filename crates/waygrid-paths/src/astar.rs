use std::borrow::BorrowMut;

use crate::graph::{EdgePolicy, Graph, Vertex, VertexId};
use crate::heuristic::Heuristic;
use crate::state::{SearchState, VisitStatus};

impl<T, P, S> Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    /// Shortest path from `source` to `target` using A*.
    ///
    /// The queue is ordered by `distance + heuristic(vertex, target)`. The
    /// result is optimal when `heuristic` is admissible. Check
    /// [`SearchState::found`] before reading the path.
    pub fn astar<H: Heuristic<T>>(
        &self,
        source: VertexId,
        target: VertexId,
        heuristic: &H,
    ) -> SearchState {
        let mut state = SearchState::new();
        self.astar_into(&mut state, source, target, heuristic);
        state
    }

    /// [`astar`](Self::astar) writing into a reused state.
    pub fn astar_into<H: Heuristic<T>>(
        &self,
        state: &mut SearchState,
        source: VertexId,
        target: VertexId,
        heuristic: &H,
    ) {
        let vertices = self.store();
        state.reset(vertices.len(), source, Some(target));
        let Some(goal) = vertices.get(target.index()) else {
            return;
        };
        if state.source.is_none() {
            return;
        }

        let si = source.index();
        let h = heuristic.estimate(vertices[si].label(), goal.label());
        state.nodes[si].estimate = h;
        state.push(si, h);

        while let Some(current) = state.pop() {
            let ci = current.idx;
            // Skip stale entries.
            if state.nodes[ci].status == VisitStatus::Finalized {
                continue;
            }
            state.finalize(ci);
            if ci == target.index() {
                state.found = true;
                break;
            }

            let current_g = state.nodes[ci].distance;
            for edge in vertices[ci].adjacent() {
                let ni = edge.to.index();
                let n = &mut state.nodes[ni];
                if n.status == VisitStatus::Finalized {
                    continue;
                }
                let score = current_g + edge.weight;
                if n.status == VisitStatus::Unvisited {
                    n.status = VisitStatus::Frontier;
                } else if score >= n.distance {
                    continue;
                }
                n.parent = Some(VertexId::new(ci));
                n.distance = score;
                n.estimate = score + heuristic.estimate(vertices[ni].label(), goal.label());
                let f = n.estimate;
                state.push(ni, f);
            }
        }

        log::trace!(
            "astar {source} -> {target}: found={} after {} vertices",
            state.found,
            state.order.len()
        );
    }
}
