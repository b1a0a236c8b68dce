//! Navigation graphs for continuous 2D worlds.
//!
//! A world is a `width × height` block of unit cells sprinkled with
//! polygonal obstacles. [`GridBuilder`] flood-fills the cells from a seed,
//! rejects those too close to (or inside) an obstacle, and links the rest
//! into a weighted [`Graph`](waygrid_paths::Graph) whose vertices sit at the
//! cell centers. The resulting [`NavGrid`] answers position lookups and
//! shortest-path queries.
//!
//! ```
//! use waygrid_core::{Polygon, Vec2};
//! use waygrid_nav::{GridBuilder, GridConfig};
//!
//! let obstacles = vec![Polygon::rect(Vec2::new(3.0, 0.0), Vec2::new(4.0, 6.0))];
//! let grid = GridBuilder::new(GridConfig::new(8, 8)).build(&obstacles)?;
//! let path = grid.find_path(Vec2::new(0.5, 0.5), Vec2::new(7.5, 0.5));
//! assert!(path.is_some());
//! # Ok::<(), waygrid_nav::BuildError>(())
//! ```

mod builder;
mod config;
mod navgrid;
mod obstacle;

pub use builder::GridBuilder;
pub use config::{BuildError, GridConfig};
pub use navgrid::{CellStatus, GridCell, NavGrid};
pub use obstacle::ObstacleSource;

#[cfg(test)]
mod tests {
    use super::*;
    use waygrid_core::{Polygon, Vec2};

    /// Obstacles kept in a custom container.
    struct Walls(Vec<Polygon>);

    impl ObstacleSource for Walls {
        fn obstacles_near<'a>(&'a self, _center: Vec2, _radius: f64, buf: &mut Vec<&'a Polygon>) {
            buf.extend(self.0.iter());
        }
    }

    #[test]
    fn custom_obstacle_source() {
        let walls = Walls(vec![Polygon::wall(Vec2::new(2.0, -1.0), Vec2::new(2.0, 5.0))]);
        let grid = GridBuilder::new(GridConfig::new(4, 4)).build(&walls).unwrap();
        assert_eq!(grid.accepted_count(), 16);
        assert_eq!(grid.graph().component_count(), 2);
        assert_eq!(grid.find_path(Vec2::new(0.5, 0.5), Vec2::new(3.5, 0.5)), None);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let obstacles = vec![
            Polygon::rect(Vec2::new(5.0, 5.0), Vec2::new(9.0, 7.0)),
            Polygon::quad(
                Vec2::new(14.0, 12.0),
                0.7,
                [
                    Vec2::new(-2.0, -2.0),
                    Vec2::new(3.0, -1.0),
                    Vec2::new(2.0, 3.0),
                    Vec2::new(-1.0, 2.0),
                ],
            ),
        ];
        let builder = GridBuilder::new(GridConfig::new(20, 16));
        let a = builder.build(&obstacles).unwrap();
        let b = builder.build(&obstacles).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(
            a.graph().edges().collect::<Vec<_>>(),
            b.graph().edges().collect::<Vec<_>>()
        );
    }
}
