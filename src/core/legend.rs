//! Doughnut legend and readout auto-fit.
//!
//! Font sizes are fitted by measuring once at a trial size and scaling
//! linearly, which assumes text width grows linearly with font size.

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::gauge_scale::point_at;
use crate::core::text::{
    DEFAULT_FONT_SIZE_PX, FontSpec, TextMeasurer, TextMetrics, fit_font_size_linear,
    widest_text_width,
};
use crate::core::types::Point;
use crate::render::Color;

/// Trial size the widest legend label is measured at.
pub const LEGEND_TRIAL_FONT_SIZE_PX: f64 = 12.0;
/// Legibility floor of the fitted legend font.
pub const LEGEND_MIN_FONT_SIZE_PX: f64 = 10.0;

/// Legend font size that lets the widest label fill one legend column.
///
/// Falls back to [`DEFAULT_FONT_SIZE_PX`] when nothing can be measured.
pub fn fit_legend_font_size<M, S>(
    measurer: &M,
    labels: &[S],
    chart_width: f64,
    horizontal_padding_pct: f64,
) -> f64
where
    M: TextMeasurer + ?Sized,
    S: AsRef<str>,
{
    let trial_font = FontSpec::normal(LEGEND_TRIAL_FONT_SIZE_PX);
    let widest = match widest_text_width(measurer, &trial_font, labels.iter()) {
        Ok(widest) => widest,
        Err(err) => {
            warn!(error = %err, "legend auto-fit falling back to default font size");
            return DEFAULT_FONT_SIZE_PX;
        }
    };
    if widest <= 0.0 || !widest.is_finite() {
        return DEFAULT_FONT_SIZE_PX;
    }

    let available = (1.0 - 2.0 * horizontal_padding_pct / 100.0) * chart_width / 2.0;
    let fitted = LEGEND_TRIAL_FONT_SIZE_PX * available / widest;
    let font_size = fitted.round().max(LEGEND_MIN_FONT_SIZE_PX);
    debug!(widest, available, font_size, "fitted legend font size");
    font_size
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendMetrics {
    pub font_size: f64,
    pub row_height: f64,
    pub rows: usize,
}

impl LegendMetrics {
    #[must_use]
    pub fn new(font_size: f64, vertical_padding_pct: f64, entry_count: usize) -> Self {
        Self {
            font_size,
            row_height: (1.0 + 2.0 * vertical_padding_pct / 100.0) * font_size,
            rows: entry_count.div_ceil(2),
        }
    }

    /// Height the legend rows take below the doughnut.
    #[must_use]
    pub fn block_height(self) -> f64 {
        self.row_height * self.rows as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub column: usize,
    pub row: usize,
    pub label: String,
    pub color: Color,
    pub font_size: f64,
    pub swatch_center: Point,
    pub swatch_radius: f64,
    /// Left/middle anchor of the label text.
    pub text_anchor: Point,
}

/// Two-column legend grid below the doughnut; even indices fill the left
/// column. The space left under the doughnut is split evenly above and
/// below the rows.
#[must_use]
pub fn layout_legend<S: AsRef<str>>(
    entries: &[(S, Color)],
    metrics: LegendMetrics,
    chart_width: f64,
    chart_height: f64,
    doughnut_bottom_y: f64,
) -> Vec<LegendEntry> {
    let font_size = metrics.font_size;
    let swatch_radius = 0.4 * font_size;
    let h_pad = 1.5 * swatch_radius;
    let v_pad = (chart_height - doughnut_bottom_y - metrics.block_height()) / 2.0;

    entries
        .iter()
        .enumerate()
        .map(|(index, (label, color))| {
            let column = index % 2;
            let row = index / 2;
            let cell_x = column as f64 * chart_width / 2.0;
            let cell_y = doughnut_bottom_y + row as f64 * metrics.row_height;
            let swatch_center = Point::new(
                cell_x + h_pad + swatch_radius,
                cell_y + v_pad + 0.5 * font_size,
            );
            LegendEntry {
                column,
                row,
                label: label.as_ref().to_owned(),
                color: *color,
                font_size,
                swatch_center,
                swatch_radius,
                text_anchor: Point::new(
                    swatch_center.x + swatch_radius + h_pad,
                    swatch_center.y,
                ),
            }
        })
        .collect()
}

/// Centroid of an annular sector: mid angle, mid radius.
#[must_use]
pub fn readout_position(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> Point {
    let mid_angle = start_angle + (end_angle - start_angle) / 2.0;
    let mid_radius = inner_radius + (outer_radius - inner_radius) / 2.0;
    point_at(center, mid_radius, mid_angle)
}

/// Whether a centered, middle-baseline label fits inside the annulus.
///
/// All four corners of its bounding box must lie within
/// `[inner_radius, outer_radius]` of the center. The box is symmetric about
/// `anchor`: half the width to each side and half of `ascent + descent`
/// above and below, the same box the renderers fill for middle-baseline text.
#[must_use]
pub fn readout_fits_annulus(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    anchor: Point,
    metrics: TextMetrics,
) -> bool {
    let half_width = metrics.width / 2.0;
    let half_height = metrics.height() / 2.0;
    [
        Point::new(anchor.x - half_width, anchor.y - half_height),
        Point::new(anchor.x + half_width, anchor.y - half_height),
        Point::new(anchor.x - half_width, anchor.y + half_height),
        Point::new(anchor.x + half_width, anchor.y + half_height),
    ]
    .into_iter()
    .all(|corner| {
        let distance = corner.distance_to(center);
        distance >= inner_radius && distance <= outer_radius
    })
}

/// Grand-total caption font size: the bold text measured at `base_font`
/// is scaled so its width matches the padded cutout diameter.
pub fn fit_total_caption_font_size<M: TextMeasurer + ?Sized>(
    measurer: &M,
    base_font: &FontSpec,
    text: &str,
    inner_radius: f64,
    horizontal_padding_pct: f64,
) -> f64 {
    let target_width = 2.0 * inner_radius * (1.0 - 2.0 * horizontal_padding_pct / 100.0);
    match measurer.measure(base_font, text) {
        Ok(metrics) => fit_font_size_linear(base_font.size_px, target_width, metrics.width),
        Err(err) => {
            warn!(error = %err, "total caption keeps the base font size");
            base_font.size_px
        }
    }
}
