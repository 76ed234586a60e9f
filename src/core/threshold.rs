use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::gauge_scale::GaugeScale;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandKind {
    Good,
    Borderline,
    Over,
}

/// One threshold bucket over the ratio `value / budget`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdBand {
    pub kind: BandKind,
    /// Inclusive upper bound of the ratio; the last band may be unbounded.
    pub upper_ratio: f64,
    pub color: Color,
}

impl ThresholdBand {
    #[must_use]
    pub const fn new(kind: BandKind, upper_ratio: f64, color: Color) -> Self {
        Self {
            kind,
            upper_ratio,
            color,
        }
    }
}

/// Ordered threshold bands with strictly increasing bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdBands {
    bands: SmallVec<[ThresholdBand; 4]>,
}

impl ThresholdBands {
    pub fn new(bands: impl IntoIterator<Item = ThresholdBand>) -> ChartResult<Self> {
        let bands: SmallVec<[ThresholdBand; 4]> = bands.into_iter().collect();
        if bands.is_empty() {
            return Err(ChartError::InvalidConfig(
                "at least one threshold band is required".to_owned(),
            ));
        }

        let mut previous = 0.0;
        for (index, band) in bands.iter().enumerate() {
            let is_last = index + 1 == bands.len();
            if band.upper_ratio.is_nan() || (band.upper_ratio.is_infinite() && !is_last) {
                return Err(ChartError::InvalidConfig(
                    "only the last threshold band may be unbounded".to_owned(),
                ));
            }
            if band.upper_ratio <= previous {
                return Err(ChartError::InvalidConfig(format!(
                    "threshold band bounds must increase strictly (band {index}: {} <= {previous})",
                    band.upper_ratio
                )));
            }
            band.color.validate()?;
            previous = band.upper_ratio;
        }

        Ok(Self { bands })
    }

    /// `good <= 1.0`, `borderline <= not_bad_ratio`, `over` beyond.
    pub fn standard(
        not_bad_ratio: f64,
        good: Color,
        borderline: Color,
        over: Color,
    ) -> ChartResult<Self> {
        if !not_bad_ratio.is_finite() || not_bad_ratio <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "not-bad ratio must be finite and > 1".to_owned(),
            ));
        }
        Self::new([
            ThresholdBand::new(BandKind::Good, 1.0, good),
            ThresholdBand::new(BandKind::Borderline, not_bad_ratio, borderline),
            ThresholdBand::new(BandKind::Over, f64::INFINITY, over),
        ])
    }

    #[must_use]
    pub fn bands(&self) -> &[ThresholdBand] {
        &self.bands
    }

    /// First band whose bound `budget * upper_ratio` the value does not
    /// exceed; values beyond every bound land in the last band.
    #[must_use]
    pub fn classify(&self, value: f64, budget: f64) -> &ThresholdBand {
        self.bands
            .iter()
            .find(|band| value <= budget * band.upper_ratio)
            .unwrap_or(&self.bands[self.bands.len() - 1])
    }

    /// Half-open angle range `[start, end)` covered by each band.
    #[must_use]
    pub fn angle_ranges(&self, budget: f64, scale: GaugeScale) -> Vec<BandAngleRange> {
        let mut previous_ratio = 0.0;
        self.bands
            .iter()
            .map(|band| {
                let range = BandAngleRange {
                    kind: band.kind,
                    start_angle: scale.value_to_angle(budget * previous_ratio),
                    end_angle: scale.value_to_angle(budget * band.upper_ratio),
                    color: band.color,
                };
                previous_ratio = band.upper_ratio;
                range
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandAngleRange {
    pub kind: BandKind,
    pub start_angle: f64,
    /// `+inf` for an unbounded band.
    pub end_angle: f64,
    pub color: Color,
}

impl BandAngleRange {
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// Filled annular arc, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSegment {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub color: Color,
    /// `None` for the remainder segment.
    pub band: Option<BandKind>,
}

impl ArcSegment {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segmentation {
    /// Band segments in band order, followed by the remainder segment.
    pub segments: Vec<ArcSegment>,
    /// Value reached by the last band segment (`0` when none was emitted).
    pub last_value: f64,
    /// Remainder end angle before it is pinned to `π`.
    pub remainder_raw_end: f64,
}

impl Segmentation {
    #[must_use]
    pub fn band_segments(&self) -> &[ArcSegment] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    #[must_use]
    pub fn remainder(&self) -> Option<&ArcSegment> {
        self.segments.last()
    }
}

/// Splits the to-date ring into colored band segments plus the remainder.
///
/// Band comparisons use the signed `todate`; only the scale total uses
/// magnitudes, so a negative spend yields no band segment at all.
pub fn segment_todate(
    todate: f64,
    budget: f64,
    bands: &ThresholdBands,
    scale: GaugeScale,
    below_color: Color,
    inner_radius: f64,
    outer_radius: f64,
) -> ChartResult<Segmentation> {
    ensure_budget(budget)?;
    if !todate.is_finite() {
        return Err(ChartError::InvalidData(
            "to-date value must be finite".to_owned(),
        ));
    }

    let arc = |start_value: f64, end_value: f64, color: Color, band: Option<BandKind>| {
        ArcSegment {
            start_angle: scale.value_to_angle(start_value),
            end_angle: scale.value_to_angle(end_value),
            inner_radius,
            outer_radius,
            color,
            band,
        }
    };

    let (mut segments, last_value, _) = bands.bands().iter().fold(
        (Vec::with_capacity(bands.bands().len() + 1), 0.0, 0.0),
        |(mut segments, last_value, previous_ratio), band| {
            if todate > budget * previous_ratio {
                let capped = todate.min(budget * band.upper_ratio);
                segments.push(arc(last_value, capped, band.color, Some(band.kind)));
                (segments, capped, band.upper_ratio)
            } else {
                (segments, last_value, band.upper_ratio)
            }
        },
    );

    let mut remainder = arc(last_value, scale.total(), below_color, None);
    let remainder_raw_end = remainder.end_angle;
    // Pinned so the grey remainder never crosses the gauge's start axis.
    remainder.end_angle = PI;
    segments.push(remainder);

    debug!(
        todate,
        budget,
        band_segments = segments.len() - 1,
        last_value,
        "segmented to-date ring"
    );
    Ok(Segmentation {
        segments,
        last_value,
        remainder_raw_end,
    })
}

/// Band summarizing forecast risk, shown as the halo color.
pub fn halo_band(forecast: f64, budget: f64, bands: &ThresholdBands) -> ChartResult<ThresholdBand> {
    ensure_budget(budget)?;
    Ok(*bands.classify(forecast, budget))
}

fn ensure_budget(budget: f64) -> ChartResult<()> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "budget must be finite and > 0 (got {budget})"
        )));
    }
    Ok(())
}
