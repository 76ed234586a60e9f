use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::format::format_currency;
use crate::core::gauge_scale::{GaugeScale, point_at};
use crate::core::rings::GaugeRings;
use crate::core::text::{FontSpec, TextMeasurer, measure_or_estimate};
use crate::core::types::Point;
use crate::render::{Color, TextBaseline, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickKind {
    Forecast,
    ToDate,
    Budget,
}

/// Side of the gauge an outer tick label is pushed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickDirection {
    Left,
    Right,
}

impl TickDirection {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Left-side labels grow rightwards from the tick end, and vice versa.
    #[must_use]
    pub fn text_align(self) -> TextHAlign {
        match self {
            Self::Left => TextHAlign::Left,
            Self::Right => TextHAlign::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSpec {
    pub kind: TickKind,
    /// `None` for the forecast tick.
    pub direction: Option<TickDirection>,
    pub value: f64,
    pub inner: Point,
    pub outer: Point,
    /// Corner where an outer tick turns horizontal.
    pub jog: Option<Point>,
    /// Center of the end circle.
    pub end: Point,
    pub end_circle_radius: f64,
    pub label_text: String,
    pub value_text: String,
    pub labels: Vec<TickLabel>,
    pub color: Color,
    pub stroke_width: f64,
}

impl TickSpec {
    /// Stroke path of the tick line, in drawing order.
    #[must_use]
    pub fn path(&self) -> Vec<Point> {
        match self.jog {
            Some(jog) => vec![self.inner, self.outer, jog, self.end],
            None => vec![self.outer, self.inner],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickStyle {
    pub line_color: Color,
    pub text_color: Color,
    pub stroke_width: f64,
    /// Value font size as a multiple of the description font size.
    pub value_font_factor: f64,
    pub currency_symbol: String,
    pub todate_label: String,
    pub budget_label: String,
    pub forecast_caption: [String; 2],
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            line_color: Color::from_rgb8(0x66, 0x66, 0x66),
            text_color: Color::BLACK,
            stroke_width: 1.0,
            value_font_factor: 1.8,
            currency_symbol: "$".to_owned(),
            todate_label: "To date".to_owned(),
            budget_label: "Budget".to_owned(),
            forecast_caption: ["Forecast".to_owned(), "for this period".to_owned()],
        }
    }
}

/// Base label font size for a gauge: `floor(outer_radius / 6)`, at least 1px.
#[must_use]
pub fn base_tick_font_size(outer_radius: f64) -> f64 {
    (outer_radius / 6.0).floor().max(1.0)
}

/// Forecast tick: a short radial line inside the doughnut edge with the
/// caption and value centered in the cutout.
#[must_use]
pub fn place_inner_tick(
    rings: &GaugeRings,
    scale: GaugeScale,
    forecast: f64,
    style: &TickStyle,
) -> TickSpec {
    let center = rings.center;
    let angle = scale.value_to_angle(forecast);
    let outer = point_at(center, rings.outer_radius, angle);
    let inner = point_at(center, rings.inner_tick_inner_radius, angle);
    let base = base_tick_font_size(rings.outer_radius);
    let v_pad = 0.25 * base;
    let caption_font = FontSpec::normal(base);
    let value_text = format_currency(&style.currency_symbol, forecast);

    let label = |text: &str, y: f64, font: FontSpec, baseline: TextBaseline| TickLabel {
        text: text.to_owned(),
        x: center.x,
        y,
        font,
        color: style.text_color,
        h_align: TextHAlign::Center,
        baseline,
    };
    let labels = vec![
        label(
            &style.forecast_caption[0],
            center.y - base - v_pad,
            caption_font.clone(),
            TextBaseline::Bottom,
        ),
        label(
            &style.forecast_caption[1],
            center.y - v_pad,
            caption_font,
            TextBaseline::Bottom,
        ),
        label(
            &value_text,
            center.y + v_pad,
            FontSpec::bold(2.0 * base),
            TextBaseline::Top,
        ),
    ];

    TickSpec {
        kind: TickKind::Forecast,
        direction: None,
        value: forecast,
        inner,
        outer,
        jog: None,
        end: inner,
        end_circle_radius: rings.tick_end_circle_radius,
        label_text: style.forecast_caption.join(" "),
        value_text,
        labels,
        color: style.line_color,
        stroke_width: style.stroke_width,
    }
}

/// To-date and budget ticks. The smaller value goes left; on a tie the
/// to-date tick keeps the left side.
pub fn place_outer_ticks<M: TextMeasurer + ?Sized>(
    rings: &GaugeRings,
    scale: GaugeScale,
    todate: f64,
    budget: f64,
    style: &TickStyle,
    measurer: &M,
) -> Vec<TickSpec> {
    let mut entries = [
        (TickKind::ToDate, todate, style.todate_label.as_str()),
        (TickKind::Budget, budget, style.budget_label.as_str()),
    ];
    entries.sort_by_key(|(_, value, _)| OrderedFloat(*value));

    let center = rings.center;
    let base = base_tick_font_size(rings.outer_radius);
    let description_font = FontSpec::normal(base);
    let value_font = FontSpec::bold(style.value_font_factor * base);
    let end_circle_radius = rings.tick_end_circle_radius;
    let v_pad = (0.25 * base).max(end_circle_radius);
    let h_pad = 0.5 * style.value_font_factor * base;

    entries
        .into_iter()
        .zip([TickDirection::Left, TickDirection::Right])
        .map(|((kind, value, text), direction)| {
            let angle = scale.value_to_angle(value);
            let inner = point_at(center, rings.outer_tick_inner_radius, angle);
            let outer = point_at(center, rings.outer_tick_outer_radius, angle);

            let on_opposite_half = (outer.x < center.x && direction == TickDirection::Right)
                || (outer.x > center.x && direction == TickDirection::Left);
            let jog_y = if on_opposite_half {
                outer.y.min(rings.arc_top_y - 2.0)
            } else {
                outer.y
            };

            let value_text = format_currency(&style.currency_symbol, value);
            let text_width = measure_or_estimate(measurer, &description_font, text)
                .width
                .max(measure_or_estimate(measurer, &value_font, &value_text).width)
                + h_pad;
            let end_x = rings.pulse_edge_x(direction.sign()) + direction.sign() * text_width;

            debug!(
                ?kind,
                ?direction,
                value,
                jog_y,
                end_x,
                "placed outer tick"
            );

            let labels = vec![
                TickLabel {
                    text: text.to_owned(),
                    x: end_x,
                    y: jog_y - v_pad,
                    font: description_font.clone(),
                    color: style.text_color,
                    h_align: direction.text_align(),
                    baseline: TextBaseline::Bottom,
                },
                TickLabel {
                    text: value_text.clone(),
                    x: end_x,
                    y: jog_y + v_pad,
                    font: value_font.clone(),
                    color: style.text_color,
                    h_align: direction.text_align(),
                    baseline: TextBaseline::Top,
                },
            ];

            TickSpec {
                kind,
                direction: Some(direction),
                value,
                inner,
                outer,
                jog: Some(Point::new(outer.x, jog_y)),
                end: Point::new(end_x, jog_y),
                end_circle_radius,
                label_text: text.to_owned(),
                value_text,
                labels,
                color: style.line_color,
                stroke_width: style.stroke_width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::base_tick_font_size;

    #[test]
    fn base_font_is_floored_sixth_of_radius() {
        assert_eq!(base_tick_font_size(100.0), 16.0);
        assert_eq!(base_tick_font_size(4.0), 1.0);
    }
}
