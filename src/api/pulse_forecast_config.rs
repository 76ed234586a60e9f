use serde::{Deserialize, Serialize};

use crate::core::{GaugeRingPercentages, ThresholdBands, TickStyle};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// The three gauge readings of one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeInputs {
    pub todate: f64,
    pub budget: f64,
    pub forecast: f64,
}

impl GaugeInputs {
    #[must_use]
    pub const fn new(todate: f64, budget: f64, forecast: f64) -> Self {
        Self {
            todate,
            budget,
            forecast,
        }
    }

    /// Budget must be positive; every reading must be finite.
    pub fn validate(self) -> ChartResult<()> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "budget must be finite and > 0 (got {})",
                self.budget
            )));
        }
        if !self.todate.is_finite() || !self.forecast.is_finite() {
            return Err(ChartError::InvalidData(
                "to-date and forecast values must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Pulse forecast gauge configuration.
///
/// Ring sizes are percentages of the resolved outer radius. Every field has
/// a serde default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseForecastConfig {
    #[serde(default = "default_percentage_inner_cutout")]
    pub percentage_inner_cutout: f64,
    #[serde(default = "default_percentage_pulse_inner")]
    pub percentage_pulse_inner: f64,
    #[serde(default = "default_percentage_halo_outer")]
    pub percentage_halo_outer: f64,
    #[serde(default = "default_percentage_outer")]
    pub percentage_outer: f64,
    /// Corner radius of the pulse squares, as a percentage of their side.
    #[serde(default = "default_percentage_radius")]
    pub percentage_radius: f64,
    #[serde(default = "default_percentage_tick_length")]
    pub percentage_tick_length: f64,
    #[serde(default = "default_percentage_tick_end_circle_radius")]
    pub percentage_tick_end_circle_radius: f64,
    #[serde(default = "default_percentage_dot_radius")]
    pub percentage_dot_radius: f64,
    #[serde(default = "default_tick_stroke_width")]
    pub tick_stroke_width: f64,
    /// Ratio of the budget up to which overspend still counts as borderline.
    #[serde(default = "default_not_bad_ratio")]
    pub not_bad_ratio: f64,
    /// Outer tick value font size relative to the description font.
    #[serde(default = "default_value_font_factor")]
    pub value_font_factor: f64,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_below_color")]
    pub below_color: Color,
    #[serde(default = "default_good_color")]
    pub good_color: Color,
    #[serde(default = "default_borderline_color")]
    pub borderline_color: Color,
    #[serde(default = "default_over_color")]
    pub over_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_todate_label")]
    pub todate_label: String,
    #[serde(default = "default_budget_label")]
    pub budget_label: String,
    #[serde(default = "default_forecast_caption")]
    pub forecast_caption: [String; 2],
}

impl Default for PulseForecastConfig {
    fn default() -> Self {
        Self {
            percentage_inner_cutout: default_percentage_inner_cutout(),
            percentage_pulse_inner: default_percentage_pulse_inner(),
            percentage_halo_outer: default_percentage_halo_outer(),
            percentage_outer: default_percentage_outer(),
            percentage_radius: default_percentage_radius(),
            percentage_tick_length: default_percentage_tick_length(),
            percentage_tick_end_circle_radius: default_percentage_tick_end_circle_radius(),
            percentage_dot_radius: default_percentage_dot_radius(),
            tick_stroke_width: default_tick_stroke_width(),
            not_bad_ratio: default_not_bad_ratio(),
            value_font_factor: default_value_font_factor(),
            border_color: default_border_color(),
            below_color: default_below_color(),
            good_color: default_good_color(),
            borderline_color: default_borderline_color(),
            over_color: default_over_color(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            currency_symbol: default_currency_symbol(),
            todate_label: default_todate_label(),
            budget_label: default_budget_label(),
            forecast_caption: default_forecast_caption(),
        }
    }
}

impl PulseForecastConfig {
    /// Sets the inner cutout, pulse inner, halo outer and outer boundary
    /// percentages at once.
    #[must_use]
    pub fn with_ring_percentages(
        mut self,
        inner_cutout: f64,
        pulse_inner: f64,
        halo_outer: f64,
        outer: f64,
    ) -> Self {
        self.percentage_inner_cutout = inner_cutout;
        self.percentage_pulse_inner = pulse_inner;
        self.percentage_halo_outer = halo_outer;
        self.percentage_outer = outer;
        self
    }

    #[must_use]
    pub fn with_corner_radius_percentage(mut self, percentage: f64) -> Self {
        self.percentage_radius = percentage;
        self
    }

    #[must_use]
    pub fn with_tick_length_percentage(mut self, percentage: f64) -> Self {
        self.percentage_tick_length = percentage;
        self
    }

    #[must_use]
    pub fn with_tick_end_circle_percentage(mut self, percentage: f64) -> Self {
        self.percentage_tick_end_circle_radius = percentage;
        self
    }

    #[must_use]
    pub fn with_dot_radius_percentage(mut self, percentage: f64) -> Self {
        self.percentage_dot_radius = percentage;
        self
    }

    #[must_use]
    pub fn with_tick_stroke_width(mut self, width: f64) -> Self {
        self.tick_stroke_width = width;
        self
    }

    #[must_use]
    pub fn with_not_bad_ratio(mut self, ratio: f64) -> Self {
        self.not_bad_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_value_font_factor(mut self, factor: f64) -> Self {
        self.value_font_factor = factor;
        self
    }

    /// Sets the good, borderline and over band colors.
    #[must_use]
    pub fn with_band_colors(mut self, good: Color, borderline: Color, over: Color) -> Self {
        self.good_color = good;
        self.borderline_color = borderline;
        self.over_color = over;
        self
    }

    #[must_use]
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn with_below_color(mut self, color: Color) -> Self {
        self.below_color = color;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    #[must_use]
    pub fn with_tick_labels(
        mut self,
        todate: impl Into<String>,
        budget: impl Into<String>,
    ) -> Self {
        self.todate_label = todate.into();
        self.budget_label = budget.into();
        self
    }

    #[must_use]
    pub fn ring_percentages(&self) -> GaugeRingPercentages {
        GaugeRingPercentages {
            inner_cutout: self.percentage_inner_cutout,
            pulse_inner: self.percentage_pulse_inner,
            halo_outer: self.percentage_halo_outer,
            outer: self.percentage_outer,
            corner_radius: self.percentage_radius,
            tick_length: self.percentage_tick_length,
            tick_end_circle_radius: self.percentage_tick_end_circle_radius,
            dot_radius: self.percentage_dot_radius,
        }
    }

    pub fn bands(&self) -> ChartResult<ThresholdBands> {
        ThresholdBands::standard(
            self.not_bad_ratio,
            self.good_color,
            self.borderline_color,
            self.over_color,
        )
    }

    #[must_use]
    pub fn tick_style(&self) -> TickStyle {
        TickStyle {
            line_color: self.below_color,
            text_color: self.text_color,
            stroke_width: self.tick_stroke_width,
            value_font_factor: self.value_font_factor,
            currency_symbol: self.currency_symbol.clone(),
            todate_label: self.todate_label.clone(),
            budget_label: self.budget_label.clone(),
            forecast_caption: self.forecast_caption.clone(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.ring_percentages().validate()?;
        self.bands()?;
        if !self.tick_stroke_width.is_finite() || self.tick_stroke_width <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "tick stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.value_font_factor.is_finite() || self.value_font_factor <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "value font factor must be finite and > 0".to_owned(),
            ));
        }
        for color in [
            self.border_color,
            self.below_color,
            self.text_color,
            self.background_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_percentage_inner_cutout() -> f64 {
    75.0
}

fn default_percentage_pulse_inner() -> f64 {
    120.0
}

fn default_percentage_halo_outer() -> f64 {
    140.0
}

fn default_percentage_outer() -> f64 {
    150.0
}

fn default_percentage_radius() -> f64 {
    25.0
}

fn default_percentage_tick_length() -> f64 {
    35.0
}

fn default_percentage_tick_end_circle_radius() -> f64 {
    5.0
}

fn default_percentage_dot_radius() -> f64 {
    4.0
}

fn default_tick_stroke_width() -> f64 {
    1.0
}

fn default_not_bad_ratio() -> f64 {
    1.25
}

fn default_value_font_factor() -> f64 {
    1.8
}

fn default_border_color() -> Color {
    Color::BLACK
}

fn default_below_color() -> Color {
    Color::from_rgb8(0x66, 0x66, 0x66)
}

fn default_good_color() -> Color {
    Color::from_rgb8(0x4c, 0xaf, 0x50)
}

fn default_borderline_color() -> Color {
    Color::from_rgb8(0xff, 0xb3, 0x00)
}

fn default_over_color() -> Color {
    Color::from_rgb8(0xe5, 0x39, 0x35)
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_background_color() -> Color {
    Color::WHITE
}

fn default_currency_symbol() -> String {
    "$".to_owned()
}

fn default_todate_label() -> String {
    "To date".to_owned()
}

fn default_budget_label() -> String {
    "Budget".to_owned()
}

fn default_forecast_caption() -> [String; 2] {
    ["Forecast".to_owned(), "for this period".to_owned()]
}
