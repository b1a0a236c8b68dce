use std::fmt;

use waygrid_core::Point;

/// Parameters of a grid build.
///
/// The defaults describe an 80 × 60 world flooded from the origin cell,
/// with obstacles looked up within 1.5 units of each cell center and half
/// a cell of clearance required around obstacle boundaries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// World width in cells.
    pub width: i32,
    /// World height in cells.
    pub height: i32,
    /// Cell the flood fill starts from.
    pub seed: Point,
    /// Radius of the obstacle query around each cell center.
    pub query_radius: f64,
    /// Minimum distance kept from obstacle corners, length of the inward
    /// probe, and offset of the link probes around cell centers.
    pub clearance: f64,
    /// Length of the parity ray cast along +X. `None` derives it from the
    /// world size.
    pub ray_length: Option<f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            seed: Point::ZERO,
            query_radius: 1.5,
            clearance: 0.5,
            ray_length: None,
        }
    }
}

impl GridConfig {
    /// Default configuration for a `width × height` world.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: Point) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_query_radius(mut self, radius: f64) -> Self {
        self.query_radius = radius;
        self
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn with_ray_length(mut self, length: f64) -> Self {
        self.ray_length = Some(length);
        self
    }

    /// Ray length actually used. The derived length reaches a full world
    /// size past the right edge; obstacles sticking out further need an
    /// explicit length.
    pub fn effective_ray_length(&self) -> f64 {
        self.ray_length
            .unwrap_or_else(|| 2.0 * f64::from(self.width.max(self.height)) + 1.0)
    }

    /// Check the configuration before a build.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(BuildError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }
        let seed = self.seed;
        if seed.x < 0 || seed.y < 0 || seed.x >= self.width || seed.y >= self.height {
            return Err(BuildError::SeedOutOfBounds(seed));
        }
        if !(self.clearance.is_finite() && self.clearance > 0.0) {
            return Err(BuildError::InvalidClearance(self.clearance));
        }
        if !(self.query_radius.is_finite() && self.query_radius > 0.0) {
            return Err(BuildError::InvalidQueryRadius(self.query_radius));
        }
        match self.ray_length {
            Some(len) if !(len.is_finite() && len > 0.0) => {
                return Err(BuildError::InvalidRayLength(len));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Errors that can occur when configuring a grid build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// The world has no cells.
    EmptyWorld { width: i32, height: i32 },
    /// The flood-fill seed lies outside the world.
    SeedOutOfBounds(Point),
    /// Clearance must be positive and finite.
    InvalidClearance(f64),
    /// Query radius must be positive and finite.
    InvalidQueryRadius(f64),
    /// An explicit ray length must be positive and finite.
    InvalidRayLength(f64),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorld { width, height } => {
                write!(f, "grid: world of {width}x{height} cells is empty")
            }
            Self::SeedOutOfBounds(p) => write!(f, "grid: seed cell {p} is outside the world"),
            Self::InvalidClearance(c) => write!(f, "grid: invalid clearance {c}"),
            Self::InvalidQueryRadius(r) => write!(f, "grid: invalid obstacle query radius {r}"),
            Self::InvalidRayLength(l) => write!(f, "grid: invalid parity ray length {l}"),
        }
    }
}

impl std::error::Error for BuildError {}
