use std::f64::consts::FRAC_PI_4;

use rand::Rng;
use waygrid_core::{Point, Range, Vec2};
use waygrid_paths::{Graph, Octile, Path, VertexId};

/// Flood-fill status of a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    /// Never reached by the fill.
    #[default]
    Untested,
    /// Waiting in the fill queue.
    Queued,
    /// Clear of obstacles; owns a graph vertex.
    Accepted,
    /// Tested and rejected.
    Invalid,
}

/// One cell of a [`NavGrid`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub pos: Point,
    pub status: CellStatus,
    /// Graph vertex at the cell center, set for accepted cells.
    pub vertex: Option<VertexId>,
}

impl GridCell {
    #[inline]
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            status: CellStatus::Untested,
            vertex: None,
        }
    }
}

/// A navigation graph over the walkable cells of a world, together with
/// the per-cell results of the fill that built it.
///
/// Vertex labels are cell centers in world space and edge weights are the
/// distances between them.
#[derive(Clone, Debug)]
pub struct NavGrid {
    range: Range,
    cells: Vec<GridCell>,
    graph: Graph<Vec2>,
}

impl NavGrid {
    pub(crate) fn new(range: Range, cells: Vec<GridCell>, graph: Graph<Vec2>) -> Self {
        Self {
            range,
            cells,
            graph,
        }
    }

    #[inline]
    pub fn graph(&self) -> &Graph<Vec2> {
        &self.graph
    }

    #[inline]
    pub fn into_graph(self) -> Graph<Vec2> {
        self.graph
    }

    /// Cells covered by the grid.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Every cell in row-major order.
    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Option<&GridCell> {
        self.range.index(p).map(|i| &self.cells[i])
    }

    /// Cell containing the world position `pos`.
    #[inline]
    pub fn cell_at(&self, pos: Vec2) -> Option<&GridCell> {
        self.cell(Point::from_world(pos))
    }

    #[inline]
    pub fn status(&self, p: Point) -> Option<CellStatus> {
        self.cell(p).map(|c| c.status)
    }

    /// Number of cells that received a vertex.
    pub fn accepted_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.status == CellStatus::Accepted)
            .count()
    }

    /// Vertex closest to the world position `pos`.
    ///
    /// Uses the vertex of the containing cell when it has one. Otherwise
    /// the eight compass directions are probed at growing half-cell radii
    /// and the first cell with a vertex wins, so the answer is near but not
    /// always the nearest.
    pub fn vertex_at(&self, pos: Vec2) -> Option<VertexId> {
        if let Some(v) = self.cell_at(pos).and_then(|c| c.vertex) {
            return Some(v);
        }
        let rings = self.range.width().max(self.range.height()) * 2;
        for ring in 1..=rings {
            let probe = Vec2::new(-0.5 * f64::from(ring), 0.0);
            for k in 0..8 {
                let at = pos + probe.rotate(FRAC_PI_4 * f64::from(k));
                if let Some(v) = self.cell_at(at).and_then(|c| c.vertex) {
                    return Some(v);
                }
            }
        }
        None
    }

    /// A vertex at least `min_distance` away from `position`, chosen
    /// uniformly among all such vertices.
    pub fn random_vertex<R: Rng>(
        &self,
        rng: &mut R,
        position: Vec2,
        min_distance: f64,
    ) -> Option<VertexId> {
        let far: Vec<VertexId> = self
            .graph
            .ids()
            .filter(|&v| self.graph[v].label().distance(position) >= min_distance)
            .collect();
        if far.is_empty() {
            return None;
        }
        Some(far[rng.random_range(0..far.len())])
    }

    /// Shortest path between the vertices nearest to `from` and `to`.
    ///
    /// Waypoints are cell centers, stored target first.
    pub fn find_path(&self, from: Vec2, to: Vec2) -> Option<Path<Vec2>> {
        let source = self.vertex_at(from)?;
        let target = self.vertex_at(to)?;
        let state = self.graph.astar(source, target, &Octile);
        if !state.found() {
            log::debug!("no path from {from} to {to}");
            return None;
        }
        Some(Path::from_search(&self.graph, &state, source, target))
    }
}
