//! Connected-component labelling.

use std::borrow::BorrowMut;

use crate::disjoint::DisjointSet;
use crate::graph::{EdgePolicy, Graph, Vertex, VertexId};

impl<T, P, S> Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    /// Label every vertex with a component id.
    ///
    /// Edge direction is ignored, so directed graphs get their weakly
    /// connected components. Ids are dense and numbered in order of each
    /// component's first vertex.
    pub fn connected_components(&self) -> Vec<usize> {
        let mut ds = self.disjoint_set();
        let n = self.vertex_count();
        let mut labels = vec![usize::MAX; n];
        let mut roots = vec![usize::MAX; n];
        let mut next = 0;
        for i in 0..n {
            let root = ds.find_set(VertexId::new(i)).index();
            if roots[root] == usize::MAX {
                roots[root] = next;
                next += 1;
            }
            labels[i] = roots[root];
        }
        labels
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        self.connected_components()
            .iter()
            .max()
            .map_or(0, |&m| m + 1)
    }

    /// Whether an edge path, ignoring direction, joins `a` and `b`.
    pub fn same_component(&self, a: VertexId, b: VertexId) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        self.disjoint_set().same_set(a, b)
    }

    fn disjoint_set(&self) -> DisjointSet {
        let mut ds = DisjointSet::new(self.vertex_count());
        for e in self.edges() {
            let ra = ds.find_set(e.from);
            ds.union(ra, e.to);
        }
        ds
    }
}
