//! Weighted graphs and shortest-path search.
//!
//! This crate provides a labelled, weighted [`Graph`] stored as an arena of
//! vertices addressed by [`VertexId`], and the searches run over it:
//!
//! - **Uniform-cost search** to every vertex ([`Graph::dijkstra`]) or to a
//!   single target ([`Graph::dijkstra_to`])
//! - **A\*** guided by a [`Heuristic`] ([`Graph::astar`])
//! - **Connected components** through a [`DisjointSet`]
//!   ([`Graph::connected_components`])
//!
//! Search results live in a [`SearchState`] rather than on the vertices, so
//! a graph can be shared while queries run. A [`Path`] turns a finished
//! search into a list of waypoints.
//!
//! # Edge policies
//!
//! | Policy | Edges | Vertex arena |
//! |---|---|---|
//! | [`Undirected`] | both directions | owned |
//! | [`Directed`] | one direction | owned |
//! | [`UndirectedExternal`] | both directions | borrowed ([`ExternalGraph`]) |

mod astar;
mod cc;
mod dijkstra;
mod disjoint;
mod graph;
mod heuristic;
mod path;
mod state;

pub use disjoint::DisjointSet;
pub use graph::{
    Directed, Edge, EdgePolicy, ExternalGraph, Graph, OwnedPolicy, PartialEdge, Undirected,
    UndirectedExternal, Vertex, VertexId,
};
pub use heuristic::{Euclidean, Heuristic, Octile, Zero, euclidean, octile};
pub use path::Path;
pub use state::{NodeState, SearchState, UNREACHABLE, VisitStatus};
