use std::cell::{Cell, RefCell};
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};

/// Font size used whenever auto-fit cannot measure text.
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Font used both for measuring and for drawing a label.
///
/// `Display` yields the CSS-like font string, e.g. `bold 21.6px sans-serif`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: f64,
    pub weight: FontWeight,
    pub family: String,
}

impl FontSpec {
    #[must_use]
    pub fn new(size_px: f64, weight: FontWeight, family: impl Into<String>) -> Self {
        Self {
            size_px,
            weight,
            family: family.into(),
        }
    }

    #[must_use]
    pub fn normal(size_px: f64) -> Self {
        Self::new(size_px, FontWeight::Normal, DEFAULT_FONT_FAMILY)
    }

    #[must_use]
    pub fn bold(size_px: f64) -> Self {
        Self::new(size_px, FontWeight::Bold, DEFAULT_FONT_FAMILY)
    }

    #[must_use]
    pub fn with_size(&self, size_px: f64) -> Self {
        Self {
            size_px,
            weight: self.weight,
            family: self.family.clone(),
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}px {}",
            self.weight.as_str(),
            self.size_px,
            self.family
        )
    }
}

/// Pixel metrics of one measured string.
///
/// `ascent`/`descent` are measured from the alphabetic baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextMetrics {
    #[must_use]
    pub fn height(self) -> f64 {
        self.ascent + self.descent
    }
}

/// Text-metric service of the drawing surface.
///
/// Implementations must behave as a pure function of `(font, text)`.
pub trait TextMeasurer {
    fn measure(&self, font: &FontSpec, text: &str) -> ChartResult<TextMetrics>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, font: &FontSpec, text: &str) -> ChartResult<TextMetrics> {
        (**self).measure(font, text)
    }
}

/// Deterministic, backend-independent width estimate.
///
/// Widths scale linearly with the font size, which is the property the
/// auto-fit formulas rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl HeuristicTextMeasurer {
    const BOLD_WIDTH_FACTOR: f64 = 1.1;
    const ASCENT_RATIO: f64 = 0.8;
    const DESCENT_RATIO: f64 = 0.2;

    #[must_use]
    pub fn estimate(font: &FontSpec, text: &str) -> TextMetrics {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' | '$' => 0.62,
                '.' | ',' | 'i' | 'l' | 'j' | '\'' | '|' => 0.34,
                '-' | '+' | '%' | '(' | ')' => 0.42,
                ' ' => 0.33,
                'A'..='Z' | 'm' | 'w' => 0.72,
                _ => 0.58,
            }
        });
        let weight_factor = match font.weight {
            FontWeight::Normal => 1.0,
            FontWeight::Bold => Self::BOLD_WIDTH_FACTOR,
        };
        TextMetrics {
            width: units * font.size_px * weight_factor,
            ascent: font.size_px * Self::ASCENT_RATIO,
            descent: font.size_px * Self::DESCENT_RATIO,
        }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, font: &FontSpec, text: &str) -> ChartResult<TextMetrics> {
        Ok(Self::estimate(font, text))
    }
}

/// Measurer for surfaces without a font engine; every call fails with
/// `MeasurementUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTextMeasurer;

impl TextMeasurer for UnavailableTextMeasurer {
    fn measure(&self, font: &FontSpec, _text: &str) -> ChartResult<TextMetrics> {
        Err(ChartError::MeasurementUnavailable(format!(
            "no font engine attached (font `{font}`)"
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextMeasureCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Bounded memo over another measurer, keyed by font string and text.
///
/// The oldest entry is evicted first. Failed measurements are not cached.
#[derive(Debug)]
pub struct CachedTextMeasurer<M> {
    inner: M,
    entries: RefCell<IndexMap<(String, String), TextMetrics>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<M: TextMeasurer> CachedTextMeasurer<M> {
    const MAX_ENTRIES: usize = 1024;

    #[must_use]
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            entries: RefCell::new(IndexMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    #[must_use]
    pub fn stats(&self) -> TextMeasureCacheStats {
        TextMeasureCacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            size: self.entries.borrow().len(),
        }
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedTextMeasurer<M> {
    fn measure(&self, font: &FontSpec, text: &str) -> ChartResult<TextMetrics> {
        let key = (font.to_string(), text.to_owned());
        if let Some(metrics) = self.entries.borrow().get(&key).copied() {
            self.hits.set(self.hits.get().saturating_add(1));
            return Ok(metrics);
        }

        let metrics = self.inner.measure(font, text)?;
        self.misses.set(self.misses.get().saturating_add(1));
        let mut entries = self.entries.borrow_mut();
        if entries.len() >= Self::MAX_ENTRIES {
            entries.shift_remove_index(0);
        }
        entries.insert(key, metrics);
        Ok(metrics)
    }
}

/// Widest rendered width among `texts`; `0.0` for an empty set.
pub fn widest_text_width<M, I, S>(measurer: &M, font: &FontSpec, texts: I) -> ChartResult<f64>
where
    M: TextMeasurer + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut widest: f64 = 0.0;
    for text in texts {
        widest = widest.max(measurer.measure(font, text.as_ref())?.width);
    }
    Ok(widest)
}

/// Measures `text`, falling back to the heuristic estimate when the service
/// cannot measure. Placement math always gets usable metrics.
pub fn measure_or_estimate<M: TextMeasurer + ?Sized>(
    measurer: &M,
    font: &FontSpec,
    text: &str,
) -> TextMetrics {
    match measurer.measure(font, text) {
        Ok(metrics) => metrics,
        Err(err) => {
            warn!(error = %err, font = %font, "falling back to estimated text metrics");
            HeuristicTextMeasurer::estimate(font, text)
        }
    }
}

/// One-shot linear fit: the size at which `measured_width` (taken at
/// `base_size_px`) would become `target_width`.
#[must_use]
pub fn fit_font_size_linear(base_size_px: f64, target_width: f64, measured_width: f64) -> f64 {
    if measured_width <= 0.0 || !measured_width.is_finite() {
        return base_size_px;
    }
    base_size_px * target_width / measured_width
}
