//! Coordinates and extents for free-form placement

use serde::{Deserialize, Serialize};

/// A point on the board, in pixels from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The visible board area a task must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    /// `None` when the height is not authoritatively known; y is then only bounded below.
    pub height: Option<f64>,
}

impl Viewport {
    /// Viewport with a known width and height
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }

    /// Viewport whose height is open-ended
    pub const fn with_width(width: f64) -> Self {
        Self {
            width,
            height: None,
        }
    }
}

/// Rendered size of a task card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSize {
    pub width: f64,
    pub height: f64,
}

impl CardSize {
    /// Create a new card size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self::new(300.0, 150.0)
    }
}

/// Clamp `value` into `[lower, upper]`; the lower bound wins when the range is empty.
pub fn clamp(lower: f64, value: f64, upper: f64) -> f64 {
    value.min(upper).max(lower)
}
