use std::borrow::BorrowMut;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

// ---------------------------------------------------------------------------
// Vertices and edges
// ---------------------------------------------------------------------------

/// Stable index of a vertex inside its graph's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(usize);

impl VertexId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An out-edge stored in its source vertex's adjacency list.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialEdge {
    pub to: VertexId,
    pub weight: f64,
}

impl PartialEdge {
    /// Edge to `to` with the default weight of 1.
    #[inline]
    pub const fn new(to: VertexId) -> Self {
        Self { to, weight: 1.0 }
    }

    #[inline]
    pub const fn weighted(to: VertexId, weight: f64) -> Self {
        Self { to, weight }
    }
}

/// A fully specified edge, used when listing or printing a graph.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.to, self.weight)
    }
}

/// A graph node: a label payload plus its weighted out-edges.
///
/// Search bookkeeping (distance, parent, ...) does not live here but in a
/// [`SearchState`](crate::SearchState), so a vertex is immutable while
/// searches run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex<T> {
    label: T,
    adjacency: Vec<PartialEdge>,
}

impl<T: Default> Default for Vertex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Vertex<T> {
    pub fn new(label: T) -> Self {
        Self {
            label,
            adjacency: Vec::new(),
        }
    }

    #[inline]
    pub fn label(&self) -> &T {
        &self.label
    }

    pub fn set_label(&mut self, label: T) {
        self.label = label;
    }

    /// Out-edges in insertion order.
    #[inline]
    pub fn adjacent(&self) -> &[PartialEdge] {
        &self.adjacency
    }

    #[inline]
    fn connect(&mut self, to: VertexId, weight: f64) {
        self.adjacency.push(PartialEdge::weighted(to, weight));
    }
}

impl<T: fmt::Display> fmt::Display for Vertex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Edge insertion policy, fixed for a graph's lifetime.
pub trait EdgePolicy {
    /// Whether [`Graph::add_edge`] inserts only the forward direction.
    const DIRECTED: bool;
}

/// Policies whose graph owns its vertex arena.
pub trait OwnedPolicy: EdgePolicy {}

/// Symmetric edges; the graph owns its vertices.
#[derive(Copy, Clone, Debug, Default)]
pub struct Undirected;

/// One-way edges; the graph owns its vertices.
#[derive(Copy, Clone, Debug, Default)]
pub struct Directed;

/// Symmetric edges over a vertex arena owned by the caller.
#[derive(Copy, Clone, Debug, Default)]
pub struct UndirectedExternal;

impl EdgePolicy for Undirected {
    const DIRECTED: bool = false;
}

impl EdgePolicy for Directed {
    const DIRECTED: bool = true;
}

impl EdgePolicy for UndirectedExternal {
    const DIRECTED: bool = false;
}

impl OwnedPolicy for Undirected {}
impl OwnedPolicy for Directed {}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Weighted graph over an arena of labelled vertices.
///
/// `P` picks the edge policy. `S` is the vertex storage: owned graphs keep a
/// `Vec<Vertex<T>>`, while an [`ExternalGraph`] borrows one from its caller
/// and leaves it intact when dropped.
#[derive(Clone, Debug)]
pub struct Graph<T, P = Undirected, S = Vec<Vertex<T>>> {
    vertices: S,
    _marker: PhantomData<fn() -> (T, P)>,
}

/// Undirected graph working on a caller-owned vertex arena.
pub type ExternalGraph<'a, T> = Graph<T, UndirectedExternal, &'a mut Vec<Vertex<T>>>;

impl<T, P: OwnedPolicy> Default for Graph<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: OwnedPolicy> Graph<T, P> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::from_vertices(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vertices(Vec::with_capacity(capacity))
    }

    /// Take ownership of an existing arena. Adjacency indices must refer to
    /// vertices of the same arena.
    pub fn from_vertices(vertices: Vec<Vertex<T>>) -> Self {
        Self {
            vertices,
            _marker: PhantomData,
        }
    }

    /// Give the arena back, consuming the graph.
    pub fn into_vertices(self) -> Vec<Vertex<T>> {
        self.vertices
    }
}

impl<'a, T> Graph<T, UndirectedExternal, &'a mut Vec<Vertex<T>>> {
    /// Work on `store` without taking ownership of it.
    pub fn external(store: &'a mut Vec<Vertex<T>>) -> Self {
        Self {
            vertices: store,
            _marker: PhantomData,
        }
    }
}

impl<T, P, S> Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    #[inline]
    pub(crate) fn store(&self) -> &[Vertex<T>] {
        self.vertices.borrow().as_slice()
    }

    #[inline]
    fn store_mut(&mut self) -> &mut Vec<Vertex<T>> {
        self.vertices.borrow_mut()
    }

    /// Whether edges are inserted in one direction only.
    #[inline]
    pub fn is_directed(&self) -> bool {
        P::DIRECTED
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.store().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    /// Whether `id` refers to a vertex of this graph.
    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        id.0 < self.vertex_count()
    }

    /// Append a new vertex built from `label`. Duplicates are not detected.
    pub fn add_vertex(&mut self, label: T) -> VertexId {
        self.push_vertex(Vertex::new(label))
    }

    /// Append a pre-built vertex.
    pub fn push_vertex(&mut self, vertex: Vertex<T>) -> VertexId {
        let store = self.store_mut();
        store.push(vertex);
        VertexId(store.len() - 1)
    }

    /// First vertex whose label equals `label`, by linear scan.
    pub fn find_vertex(&self, label: &T) -> Option<VertexId>
    where
        T: PartialEq,
    {
        self.store()
            .iter()
            .position(|v| v.label == *label)
            .map(VertexId)
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.store().get(id.0)
    }

    #[inline]
    pub fn label(&self, id: VertexId) -> Option<&T> {
        self.vertex(id).map(Vertex::label)
    }

    /// Out-edges of `id`; empty for an unknown vertex.
    #[inline]
    pub fn neighbors(&self, id: VertexId) -> &[PartialEdge] {
        self.vertex(id).map(Vertex::adjacent).unwrap_or(&[])
    }

    /// Connect `a` and `b` with weight 1. See [`add_weighted_edge`](Self::add_weighted_edge).
    pub fn add_edge(
        &mut self,
        a: impl Into<Option<VertexId>>,
        b: impl Into<Option<VertexId>>,
    ) -> bool {
        self.add_weighted_edge(a, b, 1.0)
    }

    /// Connect `a` to `b` (and `b` to `a` for undirected policies).
    ///
    /// Missing or unknown endpoints make this a no-op returning `false`.
    /// Self-loops and parallel edges are kept as given. `weight` must not be
    /// negative.
    pub fn add_weighted_edge(
        &mut self,
        a: impl Into<Option<VertexId>>,
        b: impl Into<Option<VertexId>>,
        weight: f64,
    ) -> bool {
        debug_assert!(weight >= 0.0, "negative edge weight {weight}");
        let (Some(a), Some(b)) = (a.into(), b.into()) else {
            return false;
        };
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let store = self.store_mut();
        store[a.0].connect(b, weight);
        if !P::DIRECTED {
            store[b.0].connect(a, weight);
        }
        true
    }

    /// Drop every edge while keeping the vertices and their ids.
    pub fn clear_edges(&mut self) {
        for v in self.store_mut().iter_mut() {
            v.adjacency.clear();
        }
    }

    /// Vertices in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Vertex<T>> {
        self.store().iter()
    }

    /// Ids of all vertices in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + use<T, P, S> {
        (0..self.vertex_count()).map(VertexId)
    }

    /// Every stored out-edge. Undirected edges appear once per direction.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.store().iter().enumerate().flat_map(|(i, v)| {
            v.adjacency.iter().map(move |e| Edge {
                from: VertexId(i),
                to: e.to,
                weight: e.weight,
            })
        })
    }

    /// Total number of stored out-edges.
    pub fn edge_count(&self) -> usize {
        self.store().iter().map(|v| v.adjacency.len()).sum()
    }
}

impl<T, P, S> Index<VertexId> for Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    type Output = Vertex<T>;

    /// Panics if `id` is not a vertex of this graph.
    fn index(&self, id: VertexId) -> &Vertex<T> {
        &self.store()[id.0]
    }
}

impl<'g, T, P, S> IntoIterator for &'g Graph<T, P, S>
where
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    type Item = &'g Vertex<T>;
    type IntoIter = std::slice::Iter<'g, Vertex<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_find_vertices() {
        let mut g: Graph<&str> = Graph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        let a2 = g.add_vertex("a");
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.find_vertex(&"a"), Some(a));
        assert_eq!(g.find_vertex(&"b"), Some(b));
        assert_ne!(a, a2);
        assert_eq!(g.find_vertex(&"z"), None);
        assert_eq!(g[b].label(), &"b");
        let labels: Vec<_> = g.iter().map(|v| *v.label()).collect();
        assert_eq!(labels, ["a", "b", "a"]);
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g: Graph<u32> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        assert!(g.add_weighted_edge(a, b, 2.5));
        assert_eq!(g.neighbors(a), &[PartialEdge::weighted(b, 2.5)]);
        assert_eq!(g.neighbors(b), &[PartialEdge::weighted(a, 2.5)]);
        assert!(!g.is_directed());
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut g: Graph<u32, Directed> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        assert!(g.add_weighted_edge(a, b, 3.0));
        assert_eq!(g.neighbors(a), &[PartialEdge::weighted(b, 3.0)]);
        assert!(g.neighbors(b).is_empty());
        assert!(g.is_directed());
    }

    #[test]
    fn default_weight_is_one() {
        let mut g: Graph<u32, Directed> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        g.add_edge(a, b);
        assert_eq!(g.neighbors(a)[0].weight, 1.0);
    }

    #[test]
    fn missing_endpoint_is_ignored() {
        let mut g: Graph<u32> = Graph::new();
        let a = g.add_vertex(0);
        assert!(!g.add_edge(a, None));
        assert!(!g.add_edge(g.find_vertex(&7), a));
        assert!(!g.add_edge(a, VertexId::new(42)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn self_loops_and_parallel_edges_are_kept() {
        let mut g: Graph<u32, Directed> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        g.add_edge(a, a);
        g.add_weighted_edge(a, b, 1.0);
        g.add_weighted_edge(a, b, 2.0);
        assert_eq!(g.neighbors(a).len(), 3);
    }

    #[test]
    fn clear_edges_keeps_vertices() {
        let mut g: Graph<u32> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        g.add_edge(a, b);
        g.clear_edges();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.find_vertex(&1), Some(b));
    }

    #[test]
    fn edges_lists_both_directions() {
        let mut g: Graph<u32> = Graph::new();
        let a = g.add_vertex(0);
        let b = g.add_vertex(1);
        g.add_weighted_edge(a, b, 4.0);
        let edges: Vec<Edge> = g.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].to_string(), "#0 #1 4");
        assert_eq!(edges[1].from, b);
    }

    #[test]
    fn external_graph_leaves_vertices_with_owner() {
        let mut arena = vec![Vertex::new('x'), Vertex::new('y')];
        {
            let mut g = ExternalGraph::external(&mut arena);
            let z = g.add_vertex('z');
            let x = g.find_vertex(&'x');
            g.add_edge(x, z);
            assert_eq!(g.vertex_count(), 3);
        }
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[0].adjacent(), &[PartialEdge::new(VertexId::new(2))]);
        assert_eq!(arena[2].adjacent(), &[PartialEdge::new(VertexId::new(0))]);
    }

    #[test]
    fn owned_graph_round_trips_arena() {
        let mut g: Graph<u8> = Graph::with_capacity(2);
        let a = g.add_vertex(1);
        let b = g.add_vertex(2);
        g.add_edge(a, b);
        let arena = g.into_vertices();
        let g: Graph<u8> = Graph::from_vertices(arena);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.ids().collect::<Vec<_>>(), [a, b]);
    }
}
