use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One labeled doughnut slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoughnutDatum {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl DoughnutDatum {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Labeled doughnut configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoughnutConfig {
    #[serde(default = "default_segment_show_stroke")]
    pub segment_show_stroke: bool,
    #[serde(default = "default_segment_stroke_color")]
    pub segment_stroke_color: Color,
    /// Also shrinks the outer radius by half its width, shown or not.
    #[serde(default = "default_segment_stroke_width")]
    pub segment_stroke_width: f64,
    #[serde(default = "default_percentage_inner_cutout")]
    pub percentage_inner_cutout: f64,
    #[serde(default = "default_percentage_legend_vertical_padding")]
    pub percentage_legend_vertical_padding: f64,
    #[serde(default = "default_percentage_legend_horizontal_padding")]
    pub percentage_legend_horizontal_padding: f64,
    #[serde(default = "default_hide_out_of_range_readout")]
    pub hide_out_of_range_readout: bool,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DoughnutConfig {
    fn default() -> Self {
        Self {
            segment_show_stroke: default_segment_show_stroke(),
            segment_stroke_color: default_segment_stroke_color(),
            segment_stroke_width: default_segment_stroke_width(),
            percentage_inner_cutout: default_percentage_inner_cutout(),
            percentage_legend_vertical_padding: default_percentage_legend_vertical_padding(),
            percentage_legend_horizontal_padding: default_percentage_legend_horizontal_padding(),
            hide_out_of_range_readout: default_hide_out_of_range_readout(),
            text_color: default_text_color(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DoughnutConfig {
    #[must_use]
    pub fn with_segment_stroke(mut self, show: bool, width: f64, color: Color) -> Self {
        self.segment_show_stroke = show;
        self.segment_stroke_width = width;
        self.segment_stroke_color = color;
        self
    }

    #[must_use]
    pub fn with_inner_cutout_percentage(mut self, percentage: f64) -> Self {
        self.percentage_inner_cutout = percentage;
        self
    }

    #[must_use]
    pub fn with_legend_padding(mut self, vertical_pct: f64, horizontal_pct: f64) -> Self {
        self.percentage_legend_vertical_padding = vertical_pct;
        self.percentage_legend_horizontal_padding = horizontal_pct;
        self
    }

    #[must_use]
    pub fn with_hide_out_of_range_readout(mut self, hide: bool) -> Self {
        self.hide_out_of_range_readout = hide;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.segment_stroke_width.is_finite() || self.segment_stroke_width < 0.0 {
            return Err(ChartError::InvalidConfig(
                "segment stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.percentage_inner_cutout.is_finite()
            || self.percentage_inner_cutout <= 0.0
            || self.percentage_inner_cutout >= 100.0
        {
            return Err(ChartError::InvalidConfig(
                "doughnut inner cutout must be in (0, 100)".to_owned(),
            ));
        }
        if !self.percentage_legend_vertical_padding.is_finite()
            || self.percentage_legend_vertical_padding < 0.0
        {
            return Err(ChartError::InvalidConfig(
                "legend vertical padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.percentage_legend_horizontal_padding.is_finite()
            || self.percentage_legend_horizontal_padding < 0.0
            || self.percentage_legend_horizontal_padding >= 50.0
        {
            return Err(ChartError::InvalidConfig(
                "legend horizontal padding must be in [0, 50)".to_owned(),
            ));
        }
        for color in [self.segment_stroke_color, self.text_color] {
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

fn default_segment_show_stroke() -> bool {
    true
}

fn default_segment_stroke_color() -> Color {
    Color::WHITE
}

fn default_segment_stroke_width() -> f64 {
    2.0
}

fn default_percentage_inner_cutout() -> f64 {
    50.0
}

fn default_percentage_legend_vertical_padding() -> f64 {
    25.0
}

fn default_percentage_legend_horizontal_padding() -> f64 {
    15.0
}

fn default_hide_out_of_range_readout() -> bool {
    true
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_currency_symbol() -> String {
    "$".to_owned()
}
