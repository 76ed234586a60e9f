use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};

/// Linear value-to-angle mapping of the pulse gauge.
///
/// Value `0` sits at angle `π` and `total` at `3π`. `total` is twice the
/// largest magnitude among the gauge inputs, so the largest input lands on the
/// far end of the upper half-turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeScale {
    total: f64,
}

impl GaugeScale {
    pub fn new(total: f64) -> ChartResult<Self> {
        if !total.is_finite() || total <= 0.0 {
            return Err(ChartError::InvalidData(
                "gauge total must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { total })
    }

    /// Builds the scale from raw gauge values: `total = 2 * max(|v|)`.
    pub fn from_values(values: &[f64]) -> ChartResult<Self> {
        let max_abs = values
            .iter()
            .map(|value| value.abs())
            .fold(0.0_f64, f64::max);
        Self::new(max_abs * 2.0)
    }

    #[must_use]
    pub fn total(self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn value_to_angle(self, value: f64) -> f64 {
        PI + (value / self.total) * TAU
    }

    #[must_use]
    pub fn angle_to_value(self, angle: f64) -> f64 {
        (angle - PI) / TAU * self.total
    }
}

/// Point on a circle around `center` for an angle in drawing-surface
/// convention (clockwise, y axis pointing down).
#[must_use]
pub fn point_at(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
