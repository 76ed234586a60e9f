use std::f64::consts::TAU;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::gauge_scale::point_at;
use crate::core::threshold::BandAngleRange;
use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub color: Color,
}

/// Dotted arc drawn for the forecast overage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotArc {
    pub ring_radius: f64,
    pub dot_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Angle subtended by one dot diameter on the ring.
    pub dot_angle: f64,
    pub dots: Vec<Dot>,
}

/// Places equally spaced dots (gap equal to the dot diameter) along
/// `[start_angle, end_angle]`.
///
/// The first dot is always emitted, even for arcs shorter than one spacing.
/// Each dot takes the color of the first band range containing its angle,
/// or the first range's color when none does.
pub fn generate_dot_arc(
    center: Point,
    ring_radius: f64,
    dot_radius: f64,
    start_angle: f64,
    end_angle: f64,
    ranges: &[BandAngleRange],
) -> ChartResult<DotArc> {
    if !ring_radius.is_finite() || ring_radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "dot ring radius must be finite and > 0".to_owned(),
        ));
    }
    if !dot_radius.is_finite() || dot_radius <= 0.0 {
        return Err(ChartError::InvalidData(
            "dot radius must be finite and > 0".to_owned(),
        ));
    }
    if !start_angle.is_finite() || !end_angle.is_finite() {
        return Err(ChartError::InvalidData(
            "dot arc angles must be finite".to_owned(),
        ));
    }
    let fallback_color = ranges.first().map(|range| range.color).ok_or_else(|| {
        ChartError::InvalidData("dot arc needs at least one band range".to_owned())
    })?;

    let end_angle = if end_angle < start_angle {
        end_angle + TAU
    } else {
        end_angle
    };
    let dot_angle = 2.0 * (dot_radius / ring_radius).min(1.0).asin();
    let step = 2.0 * dot_angle;

    let mut dots = Vec::new();
    let mut current = start_angle + dot_angle / 2.0;
    loop {
        let color = ranges
            .iter()
            .find(|range| range.contains(current))
            .map_or(fallback_color, |range| range.color);
        let position = point_at(center, ring_radius, current);
        trace!(angle = current, x = position.x, y = position.y, "dot");
        dots.push(Dot {
            x: position.x,
            y: position.y,
            angle: current,
            color,
        });

        current += step;
        if current + dot_angle / 2.0 > end_angle {
            break;
        }
    }

    debug!(
        dot_count = dots.len(),
        start_angle, end_angle, dot_angle, "generated dot arc"
    );
    Ok(DotArc {
        ring_radius,
        dot_radius,
        start_angle,
        end_angle,
        dot_angle,
        dots,
    })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::generate_dot_arc;
    use crate::core::threshold::{BandAngleRange, BandKind};
    use crate::core::types::Point;
    use crate::render::Color;

    fn single_range(color: Color) -> Vec<BandAngleRange> {
        vec![BandAngleRange {
            kind: BandKind::Good,
            start_angle: PI,
            end_angle: f64::INFINITY,
            color,
        }]
    }

    #[test]
    fn tiny_arc_still_gets_one_dot() {
        let arc = generate_dot_arc(
            Point::new(0.0, 0.0),
            100.0,
            4.0,
            PI,
            PI + 1e-4,
            &single_range(Color::BLACK),
        )
        .expect("dots");
        assert_eq!(arc.dots.len(), 1);
    }

    #[test]
    fn reversed_end_wraps_one_turn() {
        let arc = generate_dot_arc(
            Point::new(0.0, 0.0),
            100.0,
            4.0,
            1.5 * PI,
            0.6 * PI,
            &single_range(Color::BLACK),
        )
        .expect("dots");
        assert!((arc.end_angle - 2.6 * PI).abs() <= 1e-12);
    }

    #[test]
    fn angles_before_first_range_use_first_color() {
        let white = Color::WHITE;
        let arc = generate_dot_arc(
            Point::new(0.0, 0.0),
            100.0,
            4.0,
            0.5 * PI,
            0.6 * PI,
            &single_range(white),
        )
        .expect("dots");
        assert!(arc.dots.iter().all(|dot| dot.color == white));
    }
}
