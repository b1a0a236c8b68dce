//! Flood-fill construction of a navigation graph.

use std::collections::VecDeque;

use waygrid_core::{DIRECTIONS_8, Point, Polygon, Range, Vec2};
use waygrid_paths::Graph;

use crate::config::{BuildError, GridConfig};
use crate::navgrid::{CellStatus, GridCell, NavGrid};
use crate::obstacle::ObstacleSource;

/// Turns a continuous world with polygonal obstacles into a [`NavGrid`].
///
/// Starting from the seed cell, cells are visited breadth-first. A visited
/// cell is accepted when its center keeps clear of every nearby obstacle;
/// accepted cells get a graph vertex at their center, are linked to their
/// already accepted 8-neighbours when nothing blocks the way, and queue
/// their untested neighbours. Regions the fill cannot reach stay
/// [`CellStatus::Untested`] and get no vertices.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    config: GridConfig,
}

impl GridBuilder {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Run the flood fill against `obstacles`.
    pub fn build<O>(&self, obstacles: &O) -> Result<NavGrid, BuildError>
    where
        O: ObstacleSource + ?Sized,
    {
        self.config.validate()?;
        let range = Range::new(0, 0, self.config.width, self.config.height);
        let mut cells: Vec<GridCell> = range.iter().map(GridCell::new).collect();
        let mut graph: Graph<Vec2> = Graph::with_capacity(range.len());
        let mut queue: VecDeque<Point> = VecDeque::new();
        let mut nearby: Vec<&Polygon> = Vec::new();
        let mut invalid = 0usize;
        let mut links = 0usize;

        let seed = self.config.seed;
        if let Some(si) = range.index(seed) {
            cells[si].status = CellStatus::Queued;
            queue.push_back(seed);
        }

        while let Some(p) = queue.pop_front() {
            let Some(ci) = range.index(p) else {
                continue;
            };
            let pos = p.center();
            nearby.clear();
            obstacles.obstacles_near(pos, self.config.query_radius, &mut nearby);

            if !self.is_clear(pos, &nearby) {
                cells[ci].status = CellStatus::Invalid;
                invalid += 1;
                log::trace!("cell {p} blocked by an obstacle");
                continue;
            }

            let v = graph.add_vertex(pos);
            cells[ci].status = CellStatus::Accepted;
            cells[ci].vertex = Some(v);

            for dir in DIRECTIONS_8 {
                let np = p + dir;
                let Some(ni) = range.index(np) else {
                    continue;
                };
                match cells[ni].status {
                    CellStatus::Accepted => {
                        if self.link_is_clear(pos, dir, &nearby)
                            && graph.add_weighted_edge(v, cells[ni].vertex, dir.length())
                        {
                            links += 1;
                        }
                    }
                    CellStatus::Untested => {
                        cells[ni].status = CellStatus::Queued;
                        queue.push_back(np);
                    }
                    CellStatus::Queued | CellStatus::Invalid => {}
                }
            }
        }

        log::debug!(
            "grid {}x{} from {}: {} cells accepted, {} invalid, {} links",
            range.width(),
            range.height(),
            seed,
            graph.vertex_count(),
            invalid,
            links
        );
        Ok(NavGrid::new(range, cells, graph))
    }

    /// Whether a cell centered at `pos` stays outside, and clear of, every
    /// obstacle in `nearby`.
    fn is_clear(&self, pos: Vec2, nearby: &[&Polygon]) -> bool {
        let clearance = self.config.clearance;
        let ray_length = self.config.effective_ray_length();
        for obstacle in nearby {
            let mut crossings = 0u32;
            for edge in obstacle.edges() {
                if pos.distance_squared(edge.from) <= clearance * clearance {
                    return false;
                }
                let probe = pos + edge.inward_normal() * clearance;
                if edge.intersect(pos, probe).is_some() {
                    return false;
                }
                if edge.crosses_ray(pos, ray_length) {
                    crossings += 1;
                }
            }
            // Odd parity: the center lies inside this obstacle.
            if crossings % 2 == 1 {
                return false;
            }
        }
        true
    }

    /// Whether the link from the cell at `pos` along `dir` avoids every
    /// obstacle edge in `nearby`.
    ///
    /// Besides the center-to-center segment, four parallel segments offset
    /// by the clearance along each axis are probed. This catches most corner
    /// cuts but is not an exact swept-width test: a sliver of an obstacle
    /// can still slip between the probes.
    fn link_is_clear(&self, pos: Vec2, dir: Point, nearby: &[&Polygon]) -> bool {
        let step = Vec2::new(f64::from(dir.x), f64::from(dir.y));
        let c = self.config.clearance;
        let offsets = [
            Vec2::ZERO,
            Vec2::new(-c, 0.0),
            Vec2::new(c, 0.0),
            Vec2::new(0.0, -c),
            Vec2::new(0.0, c),
        ];
        !nearby.iter().any(|obstacle| {
            obstacle.edges().iter().any(|edge| {
                offsets.iter().any(|&offset| {
                    let from = pos + offset;
                    edge.intersect(from, from + step).is_some()
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;
    use waygrid_core::segment_intersection;

    fn build(config: GridConfig, obstacles: &[Polygon]) -> NavGrid {
        GridBuilder::new(config).build(obstacles).unwrap()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::rect(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// No graph link may cross an obstacle edge.
    fn assert_links_avoid(grid: &NavGrid, obstacles: &[Polygon]) {
        let g = grid.graph();
        for e in g.edges() {
            let (a, b) = (*g[e.from].label(), *g[e.to].label());
            for o in obstacles {
                for edge in o.edges() {
                    assert!(
                        segment_intersection(a, b, edge.from, edge.to).is_none(),
                        "link {a} -> {b} crosses {edge:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn open_two_by_two() {
        let grid = build(GridConfig::new(2, 2), &[]);
        let g = grid.graph();
        assert_eq!(g.vertex_count(), 4);
        // K4: four straight links and two diagonals, stored both ways.
        assert_eq!(g.edge_count(), 12);
        for v in g.ids() {
            let adj = g.neighbors(v);
            assert_eq!(adj.len(), 3);
            let mut weights: Vec<f64> = adj.iter().map(|e| e.weight).collect();
            weights.sort_by(f64::total_cmp);
            assert_eq!(weights, [1.0, 1.0, SQRT_2]);
        }
    }

    #[test]
    fn covered_center_cell_is_invalid() {
        let obstacles = [rect(1.0, 1.0, 2.0, 2.0)];
        let grid = build(GridConfig::new(3, 3), &obstacles);
        let center = grid.cell(Point::new(1, 1)).unwrap();
        assert_eq!(center.status, CellStatus::Invalid);
        assert_eq!(center.vertex, None);
        assert_eq!(grid.accepted_count(), 8);
        assert_eq!(grid.graph().vertex_count(), 8);
        for p in Range::new(0, 0, 3, 3) {
            if p != Point::new(1, 1) {
                assert_eq!(grid.status(p), Some(CellStatus::Accepted), "cell {p}");
            }
        }
        assert_links_avoid(&grid, &obstacles);
    }

    #[test]
    fn corners_around_a_block_are_not_cut() {
        let obstacles = [rect(1.0, 1.0, 2.0, 2.0)];
        let grid = build(GridConfig::new(3, 3), &obstacles);
        let g = grid.graph();
        let left = grid.cell(Point::new(0, 1)).unwrap().vertex.unwrap();
        let top = grid.cell(Point::new(1, 0)).unwrap().vertex.unwrap();
        let corner = grid.cell(Point::new(0, 0)).unwrap().vertex.unwrap();
        assert!(g.neighbors(left).iter().all(|e| e.to != top));
        assert!(g.neighbors(left).iter().any(|e| e.to == corner));
        assert!(g.neighbors(top).iter().any(|e| e.to == corner));
        // Ring of eight cells around the block stays connected.
        assert_eq!(g.component_count(), 1);
    }

    #[test]
    fn cells_inside_large_obstacle_are_rejected() {
        let obstacles = [rect(2.0, 2.0, 6.0, 5.0)];
        let grid = build(GridConfig::new(10, 10), &obstacles);
        for cell in grid.cells() {
            let inside = obstacles[0].contains(cell.pos.center());
            if inside {
                assert_ne!(cell.status, CellStatus::Accepted, "cell {}", cell.pos);
                assert_eq!(cell.vertex, None);
            }
        }
        assert_eq!(grid.accepted_count(), 100 - 12);
        assert_links_avoid(&grid, &obstacles);
    }

    #[test]
    fn thin_wall_blocks_links() {
        let obstacles = [Polygon::wall(Vec2::new(2.0, 1.0), Vec2::new(2.0, 4.0))];
        let grid = build(GridConfig::new(4, 5), &obstacles);
        let a = grid.cell(Point::new(1, 2)).unwrap();
        let b = grid.cell(Point::new(2, 2)).unwrap();
        assert_eq!(a.status, CellStatus::Accepted);
        assert_eq!(b.status, CellStatus::Accepted);
        let (a, b) = (a.vertex.unwrap(), b.vertex.unwrap());
        assert!(grid.graph().neighbors(a).iter().all(|e| e.to != b));
        assert_links_avoid(&grid, &obstacles);
        // The wall is open at both ends, so the two sides still connect.
        assert!(grid.graph().same_component(a, b));
    }

    #[test]
    fn fill_stops_at_a_solid_barrier() {
        let obstacles = [rect(4.0, -1.0, 6.0, 9.0)];
        let grid = build(GridConfig::new(10, 8), &obstacles);
        for cell in grid.cells() {
            let expected = match cell.pos.x {
                0..=3 => CellStatus::Accepted,
                4 => CellStatus::Invalid,
                // Only accepted cells spread the fill.
                _ => CellStatus::Untested,
            };
            assert_eq!(cell.status, expected, "cell {}", cell.pos);
        }
        assert_eq!(grid.accepted_count(), 4 * 8);
    }

    #[test]
    fn seed_inside_obstacle_yields_empty_graph() {
        let obstacles = [rect(-1.0, -1.0, 2.0, 2.0)];
        let grid = build(GridConfig::new(5, 5), &obstacles);
        assert!(grid.graph().is_empty());
        assert_eq!(grid.status(Point::ZERO), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(4, 4)), Some(CellStatus::Untested));
    }

    #[test]
    fn rotated_quads_are_respected() {
        let local = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(4.7, -4.7),
            Vec2::new(2.0, 6.25),
            Vec2::new(-1.25, 2.0),
        ];
        let obstacles = [
            Polygon::quad(Vec2::new(10.0, 9.0), 0.3, local),
            Polygon::quad(Vec2::new(20.0, 9.0), -1.1, local),
        ];
        let grid = build(GridConfig::new(30, 20), &obstacles);
        for cell in grid.cells() {
            if cell.status == CellStatus::Accepted {
                let c = cell.pos.center();
                assert!(obstacles.iter().all(|o| !o.contains(c)), "cell {}", cell.pos);
            }
        }
        assert_links_avoid(&grid, &obstacles);
        assert!(grid.accepted_count() > 400);
    }

    #[test]
    fn corner_on_a_row_of_centers() {
        let diamond = Polygon::new([
            Vec2::new(1.5, 5.5),
            Vec2::new(5.5, 1.5),
            Vec2::new(9.5, 5.5),
            Vec2::new(5.5, 9.5),
        ]);
        let obstacles = [diamond];
        let grid = build(GridConfig::new(12, 12), &obstacles);
        for cell in grid.cells() {
            if cell.status == CellStatus::Accepted {
                assert!(!obstacles[0].contains(cell.pos.center()), "cell {}", cell.pos);
            }
        }
        for x in 2..=8 {
            assert_ne!(grid.status(Point::new(x, 5)), Some(CellStatus::Accepted), "x = {x}");
        }
        // The corners themselves sit on cell centers.
        assert_eq!(grid.status(Point::new(1, 5)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(9, 5)), Some(CellStatus::Invalid));
        // Rays through both corners leave the cells outside untouched.
        assert_eq!(grid.status(Point::new(0, 5)), Some(CellStatus::Accepted));
        assert_eq!(grid.status(Point::new(10, 5)), Some(CellStatus::Accepted));
        assert_links_avoid(&grid, &obstacles);
    }

    #[test]
    fn ray_along_an_obstacle_edge() {
        // The bottom edge lies on the row of centers at y = 2.5.
        let obstacles = [rect(4.0, 2.5, 7.0, 6.0)];
        let grid = build(GridConfig::new(10, 8), &obstacles);
        for x in 0..=2 {
            assert_eq!(grid.status(Point::new(x, 2)), Some(CellStatus::Accepted), "x = {x}");
        }
        for cell in grid.cells() {
            if cell.status == CellStatus::Accepted {
                assert!(!obstacles[0].contains(cell.pos.center()), "cell {}", cell.pos);
            }
        }
    }

    #[test]
    fn centers_on_the_boundary() {
        // Every edge runs through a line of cell centers.
        let obstacles = [rect(2.5, 2.5, 5.5, 5.5)];
        let grid = build(GridConfig::new(8, 8), &obstacles);
        for p in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            assert_ne!(grid.status(Point::new(p.0, p.1)), Some(CellStatus::Accepted));
        }
        // Corners are too close to themselves.
        for p in [(2, 2), (5, 2), (5, 5), (2, 5)] {
            assert_eq!(grid.status(Point::new(p.0, p.1)), Some(CellStatus::Invalid));
        }
        // Boundary points follow the half-open rule of `Polygon::contains`:
        // the left and bottom sides count as inside, the right and top
        // sides as outside.
        assert_eq!(grid.status(Point::new(2, 3)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(3, 2)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(5, 3)), Some(CellStatus::Accepted));
        assert_eq!(grid.status(Point::new(3, 5)), Some(CellStatus::Accepted));
        for cell in grid.cells() {
            if cell.status == CellStatus::Accepted {
                assert!(!obstacles[0].contains(cell.pos.center()), "cell {}", cell.pos);
            }
        }
    }

    #[test]
    fn ray_length_bounds_the_parity_count() {
        let obstacles = [rect(2.0, 2.0, 3.0, 5.0)];
        let grid = build(GridConfig::new(6, 4), &obstacles);
        assert_eq!(grid.status(Point::new(0, 2)), Some(CellStatus::Accepted));

        // Too short to reach the far side: one crossing from outside.
        let grid = build(GridConfig::new(6, 4).with_ray_length(2.0), &obstacles);
        assert_eq!(grid.status(Point::new(0, 2)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(0, 3)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(1, 2)), Some(CellStatus::Accepted));
    }

    #[test]
    fn invalid_config_is_reported() {
        let err = GridBuilder::new(GridConfig::new(3, 3).with_seed(Point::new(-1, 0)))
            .build(&[] as &[Polygon])
            .unwrap_err();
        assert_eq!(err, BuildError::SeedOutOfBounds(Point::new(-1, 0)));
    }

    #[test]
    fn custom_seed() {
        let obstacles = [rect(4.0, -1.0, 6.0, 9.0)];
        let grid = build(GridConfig::new(10, 8).with_seed(Point::new(9, 7)), &obstacles);
        assert_eq!(grid.status(Point::new(0, 0)), Some(CellStatus::Untested));
        assert_eq!(grid.status(Point::new(4, 3)), Some(CellStatus::Untested));
        assert_eq!(grid.status(Point::new(5, 3)), Some(CellStatus::Invalid));
        assert_eq!(grid.status(Point::new(8, 0)), Some(CellStatus::Accepted));
    }
}
