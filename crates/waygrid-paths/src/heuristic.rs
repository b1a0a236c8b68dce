use std::f64::consts::SQRT_2;

use waygrid_core::Vec2;

/// Estimate of the remaining cost between two vertex labels, used by A*.
///
/// Must never overestimate the true cost (admissible), otherwise A* may
/// return a suboptimal path.
pub trait Heuristic<T> {
    fn estimate(&self, from: &T, to: &T) -> f64;
}

impl<T, F> Heuristic<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    #[inline]
    fn estimate(&self, from: &T, to: &T) -> f64 {
        self(from, to)
    }
}

/// Always zero: turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct Zero;

impl<T> Heuristic<T> for Zero {
    #[inline]
    fn estimate(&self, _from: &T, _to: &T) -> f64 {
        0.0
    }
}

/// Straight-line distance between positions.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Heuristic<Vec2> for Euclidean {
    #[inline]
    fn estimate(&self, from: &Vec2, to: &Vec2) -> f64 {
        euclidean(*from, *to)
    }
}

/// Diagonal distance for 8-connected grids with unit straight steps and
/// √2 diagonal steps.
#[derive(Copy, Clone, Debug, Default)]
pub struct Octile;

impl Heuristic<Vec2> for Octile {
    #[inline]
    fn estimate(&self, from: &Vec2, to: &Vec2) -> f64 {
        octile(*from, *to)
    }
}

/// Euclidean (L2) distance between two positions.
#[inline]
pub fn euclidean(a: Vec2, b: Vec2) -> f64 {
    a.distance(b)
}

/// Octile distance between two positions.
#[inline]
pub fn octile(a: Vec2, b: Vec2) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    if dx < dy {
        dx * SQRT_2 + dy - dx
    } else {
        dy * SQRT_2 + dx - dy
    }
}
