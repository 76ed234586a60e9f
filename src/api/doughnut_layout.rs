use std::f64::consts::{PI, TAU};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::{
    DoughnutGeometry, FontSpec, LegendEntry, LegendMetrics, Point, TextMeasurer, TextMetrics,
    Viewport, fit_legend_font_size, fit_total_caption_font_size, format_currency, layout_legend,
    measure_or_estimate, readout_fits_annulus, readout_position, resolve_doughnut_geometry,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, RenderFrame, TextBaseline, TextHAlign, TextPrimitive,
};

use super::{DoughnutConfig, DoughnutDatum};

/// Slices start at twelve o'clock.
pub const DOUGHNUT_START_ANGLE: f64 = 1.5 * PI;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutSegment {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color,
}

/// Value label centered on a slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub text: String,
    pub position: Point,
    pub font: FontSpec,
    pub metrics: TextMetrics,
    /// `false` when hidden because the text box leaves the annulus.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalCaption {
    pub text: String,
    pub position: Point,
    pub font: FontSpec,
}

/// Render-ready description of one labeled doughnut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutLayout {
    pub viewport: Viewport,
    pub degenerate: bool,
    pub total: f64,
    pub font_size: f64,
    pub legend_metrics: LegendMetrics,
    pub geometry: Option<DoughnutGeometry>,
    pub segments: Vec<DoughnutSegment>,
    pub readouts: Vec<Readout>,
    pub total_caption: Option<TotalCaption>,
    pub legend: Vec<LegendEntry>,
    pub text_color: Color,
    /// `(width, color)` of the slice outline, `None` when strokes are off.
    pub segment_stroke: Option<(f64, Color)>,
}

impl DoughnutLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.legend.is_empty()
    }

    #[must_use]
    pub fn visible_readouts(&self) -> impl Iterator<Item = &Readout> {
        self.readouts.iter().filter(|readout| readout.visible)
    }

    /// Materializes the layout as draw commands: slices, legend swatches,
    /// legend labels, visible readouts, then the total caption.
    #[must_use]
    pub fn to_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let Some(geometry) = self.geometry else {
            return frame;
        };
        let center = geometry.center;

        frame.arcs.extend(self.segments.iter().map(|segment| {
            let arc = ArcPrimitive::new(
                center.x,
                center.y,
                geometry.inner_radius,
                geometry.outer_radius,
                segment.start_angle,
                segment.end_angle,
                segment.color,
            );
            match self.segment_stroke {
                Some((width, color)) => arc.with_stroke(width, color),
                None => arc,
            }
        }));

        for entry in &self.legend {
            frame.circles.push(CirclePrimitive::new(
                entry.swatch_center.x,
                entry.swatch_center.y,
                entry.swatch_radius,
                entry.color,
            ));
            if !entry.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    entry.label.clone(),
                    entry.text_anchor.x,
                    entry.text_anchor.y,
                    FontSpec::normal(entry.font_size),
                    self.text_color,
                    TextHAlign::Left,
                    TextBaseline::Middle,
                ));
            }
        }

        frame
            .texts
            .extend(self.visible_readouts().map(|readout| {
                TextPrimitive::new(
                    readout.text.clone(),
                    readout.position.x,
                    readout.position.y,
                    readout.font.clone(),
                    self.text_color,
                    TextHAlign::Center,
                    TextBaseline::Middle,
                )
            }));

        if let Some(caption) = &self.total_caption {
            frame.texts.push(TextPrimitive::new(
                caption.text.clone(),
                caption.position.x,
                caption.position.y,
                caption.font.clone(),
                self.text_color,
                TextHAlign::Center,
                TextBaseline::Middle,
            ));
        }

        frame
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize doughnut layout: {e}"))
        })
    }
}

/// Resolves the doughnut, its readouts, the total caption and the legend.
///
/// Slice spans use magnitudes, so negative values still get a slice; their
/// readouts keep the sign.
pub fn build_doughnut_layout<M: TextMeasurer + ?Sized>(
    viewport: Viewport,
    data: &[DoughnutDatum],
    config: &DoughnutConfig,
    measurer: &M,
) -> ChartResult<DoughnutLayout> {
    config.validate()?;
    let viewport = viewport.ensure_finite()?;
    if data.iter().any(|datum| !datum.value.is_finite()) {
        return Err(ChartError::InvalidData(
            "doughnut values must be finite".to_owned(),
        ));
    }
    let total: f64 = data.iter().map(|datum| datum.value.abs()).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(ChartError::InvalidData(
            "doughnut needs a non-zero total".to_owned(),
        ));
    }

    let labels: Vec<&str> = data.iter().map(|datum| datum.label.as_str()).collect();
    let font_size = fit_legend_font_size(
        measurer,
        &labels,
        viewport.width,
        config.percentage_legend_horizontal_padding,
    );
    let legend_metrics = LegendMetrics::new(
        font_size,
        config.percentage_legend_vertical_padding,
        data.len(),
    );

    let mut layout = DoughnutLayout {
        viewport,
        degenerate: false,
        total,
        font_size,
        legend_metrics,
        geometry: None,
        segments: Vec::new(),
        readouts: Vec::new(),
        total_caption: None,
        legend: Vec::new(),
        text_color: config.text_color,
        segment_stroke: config
            .segment_show_stroke
            .then_some((config.segment_stroke_width, config.segment_stroke_color))
            .filter(|(width, _)| *width > 0.0),
    };

    let geometry = match resolve_doughnut_geometry(
        viewport,
        config.segment_stroke_width,
        config.percentage_inner_cutout,
        legend_metrics.block_height(),
        0.5 * font_size,
    ) {
        Ok(geometry) => geometry,
        Err(ChartError::DegenerateLayout { outer_radius }) => {
            warn!(
                outer_radius,
                width = viewport.width,
                height = viewport.height,
                legend_height = legend_metrics.block_height(),
                "doughnut layout is degenerate, nothing renders"
            );
            layout.degenerate = true;
            return Ok(layout);
        }
        Err(err) => return Err(err),
    };

    let readout_font = FontSpec::normal(font_size);
    let mut start_angle = DOUGHNUT_START_ANGLE;
    for datum in data {
        let end_angle = start_angle + TAU * datum.value.abs() / total;
        let text = format_currency(&config.currency_symbol, datum.value);
        let position = readout_position(
            geometry.center,
            geometry.inner_radius,
            geometry.outer_radius,
            start_angle,
            end_angle,
        );
        let metrics = measure_or_estimate(measurer, &readout_font, &text);
        let visible = !config.hide_out_of_range_readout
            || readout_fits_annulus(
                geometry.center,
                geometry.inner_radius,
                geometry.outer_radius,
                position,
                metrics,
            );
        trace!(label = %datum.label, start_angle, end_angle, visible, "doughnut slice");

        layout.segments.push(DoughnutSegment {
            label: datum.label.clone(),
            value: datum.value,
            start_angle,
            end_angle,
            color: datum.color,
        });
        layout.readouts.push(Readout {
            text,
            position,
            font: readout_font.clone(),
            metrics,
            visible,
        });
        start_angle = end_angle;
    }

    let caption_text = format_currency(&config.currency_symbol, total);
    let caption_base = FontSpec::bold(font_size);
    let caption_size = fit_total_caption_font_size(
        measurer,
        &caption_base,
        &caption_text,
        geometry.inner_radius,
        config.percentage_legend_horizontal_padding,
    );
    layout.total_caption = Some(TotalCaption {
        text: caption_text,
        position: geometry.center,
        font: caption_base.with_size(caption_size),
    });

    let entries: Vec<(&str, Color)> = data
        .iter()
        .map(|datum| (datum.label.as_str(), datum.color))
        .collect();
    layout.legend = layout_legend(
        &entries,
        legend_metrics,
        viewport.width,
        viewport.height,
        font_size + 2.0 * geometry.outer_radius,
    );
    layout.geometry = Some(geometry);

    debug!(
        total,
        font_size,
        outer_radius = geometry.outer_radius,
        hidden_readouts = layout.readouts.iter().filter(|r| !r.visible).count(),
        "built doughnut layout"
    );
    Ok(layout)
}
