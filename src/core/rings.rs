use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Point, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Percentage knobs of the pulse gauge, each relative to the doughnut's
/// outer radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeRingPercentages {
    pub inner_cutout: f64,
    pub pulse_inner: f64,
    pub halo_outer: f64,
    pub outer: f64,
    /// Corner radius of the pulse body squares, relative to their side length.
    pub corner_radius: f64,
    pub tick_length: f64,
    pub tick_end_circle_radius: f64,
    pub dot_radius: f64,
}

impl Default for GaugeRingPercentages {
    fn default() -> Self {
        Self {
            inner_cutout: 75.0,
            pulse_inner: 120.0,
            halo_outer: 140.0,
            outer: 150.0,
            corner_radius: 25.0,
            tick_length: 35.0,
            tick_end_circle_radius: 5.0,
            dot_radius: 4.0,
        }
    }
}

impl GaugeRingPercentages {
    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("inner_cutout", self.inner_cutout),
            ("pulse_inner", self.pulse_inner),
            ("halo_outer", self.halo_outer),
            ("outer", self.outer),
            ("corner_radius", self.corner_radius),
            ("tick_length", self.tick_length),
            ("tick_end_circle_radius", self.tick_end_circle_radius),
            ("dot_radius", self.dot_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "percentage `{name}` must be finite and > 0"
                )));
            }
        }
        if self.inner_cutout >= 100.0 {
            return Err(ChartError::InvalidConfig(
                "inner cutout must stay below the doughnut outer radius (< 100%)".to_owned(),
            ));
        }
        if !(self.inner_cutout < self.pulse_inner
            && self.pulse_inner < self.halo_outer
            && self.halo_outer < self.outer)
        {
            return Err(ChartError::InvalidConfig(format!(
                "ring percentages must satisfy inner_cutout < pulse_inner < halo_outer < outer \
                 (got {} / {} / {} / {})",
                self.inner_cutout, self.pulse_inner, self.halo_outer, self.outer
            )));
        }
        if self.tick_length >= 100.0 {
            return Err(ChartError::InvalidConfig(
                "tick length must be < 100%".to_owned(),
            ));
        }
        if self.corner_radius > 50.0 {
            return Err(ChartError::InvalidConfig(
                "corner radius must be <= 50% of the side length".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Every radius of the gauge, resolved once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeRings {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_cutout_radius: f64,
    pub pulse_inner_radius: f64,
    pub halo_outer_radius: f64,
    pub outer_boundary_radius: f64,
    pub outer_tick_inner_radius: f64,
    pub outer_tick_outer_radius: f64,
    pub inner_tick_inner_radius: f64,
    pub tick_end_circle_radius: f64,
    pub dot_radius: f64,
    pub dot_ring_radius: f64,
    /// Topmost y of the doughnut.
    pub arc_top_y: f64,
    pub corner_radius_pct: f64,
}

impl GaugeRings {
    /// x of the pulse body's left (`-1`) or right (`+1`) edge.
    #[must_use]
    pub fn pulse_edge_x(&self, side: f64) -> f64 {
        self.center.x + side.signum() * self.outer_boundary_radius
    }

    /// The three stacked rounded squares forming the pulse body, back to
    /// front: outer boundary, halo, pulse inner.
    #[must_use]
    pub fn pulse_body(&self, border_color: Color, halo_color: Color) -> Vec<PulseBodyRect> {
        [
            (self.outer_boundary_radius, border_color),
            (self.halo_outer_radius, halo_color),
            (self.pulse_inner_radius, border_color),
        ]
        .into_iter()
        .map(|(radius, color)| PulseBodyRect {
            x: self.center.x - radius,
            y: self.center.y - radius,
            size: 2.0 * radius,
            corner_radius: 2.0 * radius * self.corner_radius_pct / 100.0,
            color,
        })
        .collect()
    }

    /// Radius of the disc cleared under the doughnut before arcs are drawn.
    #[must_use]
    pub fn clear_radius(&self) -> f64 {
        (self.outer_radius - 0.5).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseBodyRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub corner_radius: f64,
    pub color: Color,
}

pub fn resolve_gauge_rings(
    viewport: Viewport,
    percentages: &GaugeRingPercentages,
) -> ChartResult<GaugeRings> {
    percentages.validate()?;
    let viewport = viewport.ensure_finite()?;

    let outer_radius = viewport.width.min(viewport.height) * 100.0 / percentages.outer / 2.0;
    ensure_positive_radius(outer_radius)?;

    let of_outer = |pct: f64| outer_radius * pct / 100.0;
    let center = viewport.center();
    let inner_cutout_radius = of_outer(percentages.inner_cutout);
    let rings = GaugeRings {
        center,
        outer_radius,
        inner_cutout_radius,
        pulse_inner_radius: of_outer(percentages.pulse_inner),
        halo_outer_radius: of_outer(percentages.halo_outer),
        outer_boundary_radius: of_outer(percentages.outer),
        outer_tick_inner_radius: inner_cutout_radius,
        outer_tick_outer_radius: of_outer(percentages.inner_cutout + percentages.tick_length),
        inner_tick_inner_radius: of_outer(100.0 - percentages.tick_length),
        tick_end_circle_radius: of_outer(percentages.tick_end_circle_radius).max(1.0),
        dot_radius: of_outer(percentages.dot_radius).max(2.0),
        dot_ring_radius: (inner_cutout_radius + outer_radius) / 2.0,
        arc_top_y: center.y - outer_radius,
        corner_radius_pct: percentages.corner_radius,
    };
    debug!(
        outer_radius,
        center_x = center.x,
        center_y = center.y,
        "resolved gauge rings"
    );
    Ok(rings)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoughnutGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

/// Doughnut radius from the bounds left after reserving the legend block.
///
/// `top_inset_px` is the gap between the viewport top and the doughnut.
pub fn resolve_doughnut_geometry(
    viewport: Viewport,
    stroke_width: f64,
    inner_cutout_pct: f64,
    reserved_vertical_px: f64,
    top_inset_px: f64,
) -> ChartResult<DoughnutGeometry> {
    let viewport = viewport.ensure_finite()?;
    let available_height = viewport.height - reserved_vertical_px;
    let outer_radius = (viewport.width.min(available_height) - stroke_width / 2.0) / 2.0;
    ensure_positive_radius(outer_radius)?;

    let geometry = DoughnutGeometry {
        center: Point::new(viewport.width / 2.0, top_inset_px + outer_radius),
        outer_radius,
        inner_radius: outer_radius * inner_cutout_pct / 100.0,
    };
    debug!(
        outer_radius,
        reserved_vertical_px, "resolved doughnut geometry"
    );
    Ok(geometry)
}

fn ensure_positive_radius(outer_radius: f64) -> ChartResult<()> {
    if !outer_radius.is_finite() || outer_radius <= 0.0 {
        return Err(ChartError::DegenerateLayout { outer_radius });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{GaugeRingPercentages, resolve_doughnut_geometry, resolve_gauge_rings};
    use crate::core::Viewport;
    use crate::error::ChartError;
    use crate::render::Color;

    #[test]
    fn gauge_outer_radius_leaves_room_for_pulse_body() {
        let rings = resolve_gauge_rings(Viewport::new(600.0, 300.0), &Default::default())
            .expect("rings");
        assert!((rings.outer_radius - 100.0).abs() <= 1e-9);
        assert!((rings.outer_boundary_radius - 150.0).abs() <= 1e-9);
        assert!((rings.inner_tick_inner_radius - 65.0).abs() <= 1e-9);
        assert!((rings.outer_tick_outer_radius - 110.0).abs() <= 1e-9);
        assert!((rings.arc_top_y - 50.0).abs() <= 1e-9);
    }

    #[test]
    fn inverted_ring_order_is_a_config_error() {
        let percentages = GaugeRingPercentages {
            inner_cutout: 130.0,
            ..Default::default()
        };
        let err = resolve_gauge_rings(Viewport::new(400.0, 400.0), &percentages)
            .expect_err("must reject");
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }

    #[test]
    fn zero_bounds_are_degenerate() {
        let err = resolve_gauge_rings(Viewport::new(0.0, 400.0), &Default::default())
            .expect_err("degenerate");
        assert!(matches!(err, ChartError::DegenerateLayout { .. }));

        let err = resolve_doughnut_geometry(Viewport::new(300.0, 40.0), 2.0, 50.0, 60.0, 6.0)
            .expect_err("legend eats the whole height");
        assert!(matches!(err, ChartError::DegenerateLayout { .. }));
    }

    #[test]
    fn pulse_body_squares_shrink_front_to_back() {
        let rings = resolve_gauge_rings(Viewport::new(300.0, 300.0), &Default::default())
            .expect("rings");
        let body = rings.pulse_body(Color::BLACK, Color::WHITE);
        assert_eq!(body.len(), 3);
        assert!(body[0].size > body[1].size && body[1].size > body[2].size);
        assert!((body[0].corner_radius - body[0].size * 0.25).abs() <= 1e-9);
        assert_eq!(body[1].color, Color::WHITE);
    }
}
