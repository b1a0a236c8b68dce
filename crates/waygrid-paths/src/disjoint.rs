//! Minimal union-find over vertex ids.

use crate::graph::VertexId;

/// Disjoint-set forest with path compression and naive union.
///
/// Kept in its own parent array so it never disturbs the parent links of a
/// [`SearchState`](crate::SearchState).
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// `n` singleton sets, one per vertex id `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Make `v` its own representative, growing the forest if needed.
    pub fn make_set(&mut self, v: VertexId) {
        let i = v.index();
        if i >= self.parent.len() {
            let len = self.parent.len();
            self.parent.extend(len..=i);
        }
        self.parent[i] = i;
    }

    /// Representative of `v`'s set, compressing the path on the way.
    ///
    /// Panics if `v` was never added.
    pub fn find_set(&mut self, v: VertexId) -> VertexId {
        let mut root = v.index();
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = v.index();
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        VertexId::new(root)
    }

    /// Hang `v`'s root below `u`. No-op when both are already in one set.
    pub fn union(&mut self, u: VertexId, v: VertexId) {
        let rv = self.find_set(v);
        if self.find_set(u) == rv {
            return;
        }
        self.parent[rv.index()] = u.index();
    }

    /// Whether `u` and `v` belong to the same set.
    pub fn same_set(&mut self, u: VertexId, v: VertexId) -> bool {
        self.find_set(u) == self.find_set(v)
    }
}
