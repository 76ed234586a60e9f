use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::FontSpec;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a `#rrggbb` (opaque) or `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(value: &str) -> ChartResult<Self> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || ChartError::InvalidConfig(format!("invalid hex color `{value}`"));
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| -> ChartResult<f64> {
            u8::from_str_radix(&hex[range], 16)
                .map(|byte| f64::from(byte) / 255.0)
                .map_err(|_| invalid())
        };
        match hex.len() {
            3 => {
                let short = |index: usize| -> ChartResult<f64> {
                    u8::from_str_radix(&hex[index..=index], 16)
                        .map(|nibble| f64::from(nibble * 17) / 255.0)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.alpha >= 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.red),
                byte(self.green),
                byte(self.blue),
                byte(self.alpha)
            )
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

/// Filled annular sector. The sweep runs clockwise from `start_angle` to
/// `end_angle`; an end angle below the start wraps by full turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcPrimitive {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill_color: Color,
    pub stroke_width: f64,
    pub stroke_color: Color,
}

impl ArcPrimitive {
    #[must_use]
    pub const fn new(
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill_color: Color,
    ) -> Self {
        Self {
            cx,
            cy,
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            fill_color,
            stroke_width: 0.0,
            stroke_color: fill_color,
        }
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke_width: f64, stroke_color: Color) -> Self {
        self.stroke_width = stroke_width;
        self.stroke_color = stroke_color;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[
                self.cx,
                self.cy,
                self.inner_radius,
                self.outer_radius,
                self.start_angle,
                self.end_angle,
                self.stroke_width,
            ],
            "arc geometry",
        )?;
        if self.inner_radius < 0.0 || self.outer_radius < self.inner_radius {
            return Err(ChartError::InvalidData(
                "arc radii must satisfy 0 <= inner <= outer".to_owned(),
            ));
        }
        if self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "arc stroke width must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Filled circle, used for dots, tick end caps and legend swatches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill_color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.cx, self.cy, self.radius], "circle geometry")?;
        if self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be > 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Filled rectangle with optional rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height, self.corner_radius],
            "rect geometry",
        )?;
        if self.width < 0.0 || self.height < 0.0 || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size and corner radius must be >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Open stroked path through `points`, joined with miter joins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "polyline needs at least two points".to_owned(),
            ));
        }
        if !self
            .points
            .iter()
            .all(|(x, y)| x.is_finite() && y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "polyline stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of `TextPrimitive::y` relative to the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
///
/// `font` is the exact font the label was measured with during layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub baseline: TextBaseline,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: FontSpec,
        color: Color,
        h_align: TextHAlign,
        baseline: TextBaseline,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align,
            baseline,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_colors_parse_and_format() {
        let color = Color::from_hex("#cccccc").expect("hex");
        assert!((color.red - 0.8).abs() <= 1e-9);
        assert_eq!(color.to_hex(), "#cccccc");

        let short = Color::from_hex("#fff").expect("short hex");
        assert_eq!(short, Color::WHITE);

        let translucent = Color::from_hex("#00000080").expect("hex with alpha");
        assert!(translucent.alpha < 1.0);
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("#12").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }
}
