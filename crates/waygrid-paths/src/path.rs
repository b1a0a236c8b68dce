use std::borrow::BorrowMut;
use std::fmt;

use crate::graph::{EdgePolicy, Graph, Vertex, VertexId};
use crate::state::SearchState;

/// Waypoints extracted from a search, consumed from the source side.
///
/// Waypoints are stored target-first, so the next waypoint to steer towards
/// sits at the end of the list and advancing pops it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<T> {
    waypoints: Vec<T>,
    current: Option<T>,
}

impl<T> Default for Path<T> {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            current: None,
        }
    }
}

impl<T: Clone> Path<T> {
    /// Build a path from waypoints listed from target back to source.
    pub fn new(waypoints: Vec<T>) -> Self {
        let current = waypoints.last().cloned();
        Self { waypoints, current }
    }

    /// Walk the parent chain of `state` from `target` back to `source`,
    /// collecting vertex labels.
    ///
    /// `state` must come from a search started at `source`. If `target` was
    /// never reached the walk silently stops at the first vertex without a
    /// parent, so check [`SearchState::found`] or
    /// [`SearchState::is_reached`] first.
    pub fn from_search<P, S>(
        graph: &Graph<T, P, S>,
        state: &SearchState,
        source: VertexId,
        target: VertexId,
    ) -> Self
    where
        P: EdgePolicy,
        S: BorrowMut<Vec<Vertex<T>>>,
    {
        debug_assert_eq!(state.source(), Some(source), "state searched from another source");
        let mut waypoints = Vec::new();
        let mut cur = Some(target);
        while let Some(v) = cur {
            let Some(label) = graph.label(v) else {
                break;
            };
            waypoints.push(label.clone());
            if v == source {
                break;
            }
            cur = state.parent(v);
        }
        Self::new(waypoints)
    }

    /// The waypoint to head for next.
    #[inline]
    pub fn current_waypoint(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Drop the current waypoint and move on to the following one.
    ///
    /// The last waypoint stays current once the list runs out.
    pub fn set_next_waypoint(&mut self) {
        self.waypoints.pop();
        if let Some(next) = self.waypoints.last() {
            self.current = Some(next.clone());
        }
    }
}

impl<T> Path<T> {
    /// True when fewer than two waypoints remain, i.e. there is no further
    /// subgoal beyond the current one.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.waypoints.len() < 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Ultimate destination of the path.
    pub fn end(&self) -> Option<&T> {
        self.waypoints.first().or(self.current.as_ref())
    }

    /// Remaining waypoints, target first.
    #[inline]
    pub fn waypoints(&self) -> &[T] {
        &self.waypoints
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.current = None;
    }
}

// ---------------------------------------------------------------------------
// Debug printing
// ---------------------------------------------------------------------------

impl<T, P, S> Graph<T, P, S>
where
    T: fmt::Display,
    P: EdgePolicy,
    S: BorrowMut<Vec<Vertex<T>>>,
{
    /// Write the parent chain from `source` to `target` as
    /// `a <- b <- c`, or `No Path` when the chain breaks.
    pub fn write_path<W: fmt::Write>(
        &self,
        state: &SearchState,
        source: VertexId,
        target: VertexId,
        out: &mut W,
    ) -> fmt::Result {
        let mut chain = vec![target];
        let mut cur = target;
        while cur != source {
            match state.parent(cur) {
                Some(p) => {
                    chain.push(p);
                    cur = p;
                }
                None => return out.write_str("No Path"),
            }
        }
        for (i, v) in chain.iter().rev().enumerate() {
            if i > 0 {
                out.write_str(" <- ")?;
            }
            write!(out, "{}", self[*v])?;
        }
        Ok(())
    }

    /// One line per vertex: its path from `source` followed by its distance.
    pub fn write_paths<W: fmt::Write>(
        &self,
        state: &SearchState,
        source: VertexId,
        out: &mut W,
    ) -> fmt::Result {
        for v in self.ids() {
            self.write_path(state, source, v, out)?;
            writeln!(out, " {}", state.distance(v))?;
        }
        Ok(())
    }
}
