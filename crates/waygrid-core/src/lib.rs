//! **waygrid-core** — geometry shared across the *waygrid* crates.
//!
//! This crate provides continuous 2D primitives ([`Vec2`], [`Segment`],
//! [`Polygon`], [`Aabb`]) used to describe obstacles, plus integer grid
//! coordinates ([`Point`], [`Range`]) used to address navigation cells.

pub mod grid;
pub mod shape;
pub mod vec2;

pub use grid::{DIRECTIONS_8, Point, Range, RangeIter};
pub use shape::{Aabb, Intersection, Polygon, Segment, point_to_line_distance, segment_intersection};
pub use vec2::{Vec2, to_local_space, to_world_space, vector_to_world_space};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn polygon_round_trip() {
        let poly = Polygon::rect(Vec2::new(1.0, 2.0), Vec2::new(4.0, 3.0));
        let json = serde_json::to_string(&poly).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(poly, back);
    }

    #[test]
    fn range_round_trip() {
        let rng = Range::new(1, 2, 10, 20);
        let json = serde_json::to_string(&rng).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(rng, back);
    }
}
