//! Segments, bounding boxes and polygonal obstacles.

use crate::vec2::Vec2;

// ---------------------------------------------------------------------------
// Intersection primitives
// ---------------------------------------------------------------------------

/// Where two segments cross.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// The crossing point.
    pub point: Vec2,
    /// Distance from the start of the first segment to [`point`](Self::point).
    pub distance: f64,
}

/// Test whether segment `ab` crosses segment `cd`.
///
/// Both parameters must lie strictly inside `(0, 1)`: segments that only
/// touch at an endpoint do not intersect. Parallel or degenerate segments
/// (zero determinant) never intersect.
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Intersection> {
    let det = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    if det == 0.0 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ((a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y)) * inv_det;
    let t = ((a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y)) * inv_det;
    if s > 0.0 && s < 1.0 && t > 0.0 && t < 1.0 {
        Some(Intersection {
            point: a + (b - a) * s,
            distance: a.distance(b) * s,
        })
    } else {
        None
    }
}

/// Perpendicular distance from `point` to the infinite line through
/// `from` and `to`.
pub fn point_to_line_distance(point: Vec2, from: Vec2, to: Vec2) -> f64 {
    let dir = (to - from).normalized();
    (point - from).cross(dir).abs()
}

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box with inclusive bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub low: Vec2,
    pub high: Vec2,
}

impl Default for Aabb {
    /// An inverted box that contains nothing and overlaps nothing.
    fn default() -> Self {
        Self {
            low: Vec2::new(f64::MAX, f64::MAX),
            high: Vec2::new(f64::MIN, f64::MIN),
        }
    }
}

impl Aabb {
    #[inline]
    pub const fn new(low: Vec2, high: Vec2) -> Self {
        Self { low, high }
    }

    /// Smallest box containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        points.into_iter().fold(Self::default(), |acc, p| Self {
            low: Vec2::new(acc.low.x.min(p.x), acc.low.y.min(p.y)),
            high: Vec2::new(acc.high.x.max(p.x), acc.high.y.max(p.y)),
        })
    }

    /// Box around `center` reaching `radius` in every axis direction.
    #[inline]
    pub fn around(center: Vec2, radius: f64) -> Self {
        let r = Vec2::new(radius, radius);
        Self::new(center - r, center + r)
    }

    /// Grow the box by `radius` on every side.
    #[inline]
    pub fn expanded(self, radius: f64) -> Self {
        let r = Vec2::new(radius, radius);
        Self::new(self.low - r, self.high + r)
    }

    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.high.y < self.low.y
            || other.low.y > self.high.y
            || other.low.x > self.high.x
            || other.high.x < self.low.x)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.low.x && p.x <= self.high.x && p.y >= self.low.y && p.y <= self.high.y
    }

    #[inline]
    pub fn upper_left(&self) -> Vec2 {
        Vec2::new(self.low.x, self.high.y)
    }

    #[inline]
    pub fn upper_right(&self) -> Vec2 {
        self.high
    }

    #[inline]
    pub fn lower_left(&self) -> Vec2 {
        self.low
    }

    #[inline]
    pub fn lower_right(&self) -> Vec2 {
        Vec2::new(self.high.x, self.low.y)
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// A directed boundary edge of a polygon.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    #[inline]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    /// Unit normal pointing to the right of the travel direction, which is
    /// outward for a counter-clockwise polygon.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        -(self.to - self.from).skew().normalized()
    }

    /// Unit normal pointing into a counter-clockwise polygon.
    #[inline]
    pub fn inward_normal(&self) -> Vec2 {
        -self.normal()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.from + self.to) * 0.5
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Crossing of `a → b` with this segment, see [`segment_intersection`].
    #[inline]
    pub fn intersect(&self, a: Vec2, b: Vec2) -> Option<Intersection> {
        segment_intersection(a, b, self.from, self.to)
    }

    /// Whether the ray leaving `origin` along +X for `length` units crosses
    /// this segment, counted for point-in-polygon parity.
    ///
    /// Endpoints are half-open in y: an endpoint counts only when the other
    /// end lies below the ray. A ray through a shared corner therefore
    /// counts exactly one of the two edges when they pass through, and
    /// none or two when they bounce back. Edges lying on the ray never
    /// count.
    pub fn crosses_ray(&self, origin: Vec2, length: f64) -> bool {
        let (a, b) = (self.from, self.to);
        if (a.y > origin.y) == (b.y > origin.y) {
            return false;
        }
        let x = a.x + (origin.y - a.y) * (b.x - a.x) / (b.y - a.y);
        x > origin.x && x - origin.x < length
    }
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

/// A closed polygonal obstacle.
///
/// Vertices are stored counter-clockwise so every edge normal points
/// outward. A two-vertex polygon describes a thin wall: its two edges run
/// in opposite directions along the same line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Vec2>,
    edges: Vec<Segment>,
    aabb: Aabb,
}

impl Polygon {
    /// Build a polygon from its corner points in either winding order.
    pub fn new(vertices: impl IntoIterator<Item = Vec2>) -> Self {
        let mut vertices: Vec<Vec2> = vertices.into_iter().collect();
        if signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        let n = vertices.len();
        let edges = if n < 2 {
            Vec::new()
        } else {
            (0..n)
                .map(|i| Segment::new(vertices[i], vertices[(i + 1) % n]))
                .collect()
        };
        let aabb = Aabb::from_points(vertices.iter().copied());
        Self {
            vertices,
            edges,
            aabb,
        }
    }

    /// Axis-aligned rectangle spanning `min` to `max`.
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new([
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    /// Quad given in local coordinates, rotated by `rotation` radians and
    /// placed at `position`.
    pub fn quad(position: Vec2, rotation: f64, local: [Vec2; 4]) -> Self {
        Self::new(local.map(|v| v.rotate(rotation) + position))
    }

    /// A thin wall from `a` to `b`.
    pub fn wall(a: Vec2, b: Vec2) -> Self {
        Self::new([a, b])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Boundary edges in counter-clockwise order.
    #[inline]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Even-odd point-in-polygon test.
    pub fn contains(&self, p: Vec2) -> bool {
        if !self.aabb.contains(p) {
            return false;
        }
        let crossings = self
            .edges
            .iter()
            .filter(|e| e.crosses_ray(p, f64::INFINITY))
            .count();
        crossings % 2 == 1
    }
}

/// Twice the signed area; positive for counter-clockwise winding.
fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum()
}
