//! Builds a navigation grid around two randomly turned obstacles, runs a
//! path query between random cells and prints the result as ASCII.
//!
//! Run with `RUST_LOG=debug` to see the builder summary.

use std::collections::HashSet;
use std::f64::consts::TAU;

use rand::Rng;
use waygrid_core::{Point, Polygon, Vec2};
use waygrid_nav::{CellStatus, GridBuilder, GridConfig, NavGrid};

const WIDTH: i32 = 80;
const HEIGHT: i32 = 60;

/// Obstacle outline in local space, shared by both obstacles.
const OBSTACLE: [Vec2; 4] = [
    Vec2::new(-4.0, -4.0),
    Vec2::new(18.75, -18.75),
    Vec2::new(8.0, 25.0),
    Vec2::new(-5.0, 8.0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut rng = rand::rng();

    let center = Vec2::new(f64::from(WIDTH) * 0.5, f64::from(HEIGHT) * 0.5);
    let obstacles = vec![
        Polygon::quad(center, rng.random_range(0.0..TAU), OBSTACLE),
        Polygon::quad(center + Vec2::new(10.0, 0.0), rng.random_range(0.0..TAU), OBSTACLE),
    ];

    let grid = GridBuilder::new(GridConfig::new(WIDTH, HEIGHT)).build(&obstacles)?;
    log::info!(
        "{} of {} cells walkable, {} links",
        grid.accepted_count(),
        grid.cells().len(),
        grid.graph().edge_count() / 2
    );

    let Some(start) = grid.random_vertex(&mut rng, Vec2::ZERO, 0.0) else {
        log::warn!("no walkable cell in the world");
        return Ok(());
    };
    let from = *grid.graph()[start].label();
    let to = grid
        .random_vertex(&mut rng, from, f64::from(WIDTH) * 0.5)
        .map_or(from, |v| *grid.graph()[v].label());

    let mut route = HashSet::new();
    match grid.find_path(from, to) {
        Some(path) => {
            log::info!("path from {from} to {to}: {} waypoints", path.len());
            route.extend(path.waypoints().iter().map(|&p| Point::from_world(p)));
        }
        None => log::info!("no path from {from} to {to}"),
    }

    print!("{}", render(&grid, &route));
    Ok(())
}

/// One character per cell: `*` on the path, `.` walkable, `#` blocked and
/// blank where the fill never reached.
fn render(grid: &NavGrid, route: &HashSet<Point>) -> String {
    let range = grid.range();
    let mut out = String::with_capacity(range.len() + range.height() as usize);
    for p in range {
        let c = match grid.status(p) {
            _ if route.contains(&p) => '*',
            Some(CellStatus::Accepted) => '.',
            Some(CellStatus::Invalid) => '#',
            _ => ' ',
        };
        out.push(c);
        if p.x == range.max.x - 1 {
            out.push('\n');
        }
    }
    out
}
