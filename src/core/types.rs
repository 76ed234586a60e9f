use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel bounds of the drawing area handed to a layout pass.
///
/// Zero or negative sizes are representable on purpose: they resolve to a
/// degenerate layout instead of failing at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn ensure_finite(self) -> ChartResult<Self> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
