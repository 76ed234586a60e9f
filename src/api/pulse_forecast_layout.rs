use std::f64::consts::TAU;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{
    ArcSegment, BandKind, DotArc, GaugeRings, GaugeScale, PulseBodyRect, TextMeasurer, TickSpec,
    Viewport, generate_dot_arc, halo_band, place_inner_tick, place_outer_ticks,
    resolve_gauge_rings, segment_todate,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, PolylinePrimitive, RectPrimitive, RenderFrame,
    TextPrimitive,
};

use super::{GaugeInputs, PulseForecastConfig};

/// Render-ready description of one pulse forecast gauge.
///
/// A degenerate layout (viewport too small for any ring) keeps the scale
/// and halo classification but carries no geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeLayout {
    pub viewport: Viewport,
    pub inputs: GaugeInputs,
    pub degenerate: bool,
    pub total: f64,
    pub halo_band: BandKind,
    pub halo_color: Color,
    pub background_color: Color,
    pub rings: Option<GaugeRings>,
    pub pulse_body: Vec<PulseBodyRect>,
    /// Band segments followed by the remainder segment.
    pub segments: Vec<ArcSegment>,
    pub remainder_raw_end: Option<f64>,
    /// Present only when the forecast exceeds the spend to date.
    pub dot_arc: Option<DotArc>,
    /// Forecast tick first, then the left and right outer ticks.
    pub ticks: Vec<TickSpec>,
}

impl GaugeLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pulse_body.is_empty() && self.segments.is_empty() && self.ticks.is_empty()
    }

    /// Materializes the layout as draw commands, in painting order: pulse
    /// body, clear disc, ring segments, dots, tick lines with their end
    /// circles, then labels.
    #[must_use]
    pub fn to_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let Some(rings) = self.rings else {
            return frame;
        };
        let center = rings.center;

        frame.rects.extend(self.pulse_body.iter().map(|body| {
            RectPrimitive::new(body.x, body.y, body.size, body.size, body.color)
                .with_corner_radius(body.corner_radius)
        }));

        if rings.clear_radius() > 0.0 {
            frame.arcs.push(ArcPrimitive::new(
                center.x,
                center.y,
                0.0,
                rings.clear_radius(),
                0.0,
                TAU,
                self.background_color,
            ));
        }
        frame.arcs.extend(self.segments.iter().map(|segment| {
            ArcPrimitive::new(
                center.x,
                center.y,
                segment.inner_radius,
                segment.outer_radius,
                segment.start_angle,
                segment.end_angle,
                segment.color,
            )
        }));

        if let Some(dot_arc) = &self.dot_arc {
            frame.circles.extend(
                dot_arc
                    .dots
                    .iter()
                    .map(|dot| CirclePrimitive::new(dot.x, dot.y, dot_arc.dot_radius, dot.color)),
            );
        }

        for tick in &self.ticks {
            let points = tick.path().into_iter().map(|p| (p.x, p.y)).collect();
            frame
                .polylines
                .push(PolylinePrimitive::new(points, tick.stroke_width, tick.color));
            frame.circles.push(CirclePrimitive::new(
                tick.end.x,
                tick.end.y,
                tick.end_circle_radius,
                tick.color,
            ));
            frame.texts.extend(tick.labels.iter().filter(|l| !l.text.is_empty()).map(
                |label| {
                    TextPrimitive::new(
                        label.text.clone(),
                        label.x,
                        label.y,
                        label.font.clone(),
                        label.color,
                        label.h_align,
                        label.baseline,
                    )
                },
            ));
        }

        frame
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize gauge layout: {e}"))
        })
    }
}

/// Resolves every piece of the pulse forecast gauge for one layout pass.
///
/// Configuration and input errors are returned before any geometry is
/// computed. A viewport too small for the rings yields `Ok` with
/// `degenerate == true`.
pub fn build_pulse_forecast_layout<M: TextMeasurer + ?Sized>(
    viewport: Viewport,
    inputs: GaugeInputs,
    config: &PulseForecastConfig,
    measurer: &M,
) -> ChartResult<GaugeLayout> {
    config.validate()?;
    inputs.validate()?;

    let bands = config.bands()?;
    let scale = GaugeScale::from_values(&[inputs.todate, inputs.budget, inputs.forecast])?;
    let halo = halo_band(inputs.forecast, inputs.budget, &bands)?;

    let mut layout = GaugeLayout {
        viewport,
        inputs,
        degenerate: false,
        total: scale.total(),
        halo_band: halo.kind,
        halo_color: halo.color,
        background_color: config.background_color,
        rings: None,
        pulse_body: Vec::new(),
        segments: Vec::new(),
        remainder_raw_end: None,
        dot_arc: None,
        ticks: Vec::new(),
    };

    let rings = match resolve_gauge_rings(viewport, &config.ring_percentages()) {
        Ok(rings) => rings,
        Err(ChartError::DegenerateLayout { outer_radius }) => {
            warn!(
                outer_radius,
                width = viewport.width,
                height = viewport.height,
                "pulse forecast layout is degenerate, nothing renders"
            );
            layout.degenerate = true;
            return Ok(layout);
        }
        Err(err) => return Err(err),
    };

    let segmentation = segment_todate(
        inputs.todate,
        inputs.budget,
        &bands,
        scale,
        config.below_color,
        rings.inner_cutout_radius,
        rings.outer_radius,
    )?;

    if inputs.forecast > inputs.todate {
        let ranges = bands.angle_ranges(inputs.budget, scale);
        layout.dot_arc = Some(generate_dot_arc(
            rings.center,
            rings.dot_ring_radius,
            rings.dot_radius,
            scale.value_to_angle(inputs.todate),
            scale.value_to_angle(inputs.forecast),
            &ranges,
        )?);
    }

    let style = config.tick_style();
    layout
        .ticks
        .push(place_inner_tick(&rings, scale, inputs.forecast, &style));
    layout.ticks.extend(place_outer_ticks(
        &rings,
        scale,
        inputs.todate,
        inputs.budget,
        &style,
        measurer,
    ));

    layout.pulse_body = rings.pulse_body(config.border_color, halo.color);
    layout.segments = segmentation.segments;
    layout.remainder_raw_end = Some(segmentation.remainder_raw_end);
    layout.rings = Some(rings);

    debug!(
        total = layout.total,
        halo = ?layout.halo_band,
        segments = layout.segments.len(),
        dots = layout.dot_arc.as_ref().map_or(0, |arc| arc.dots.len()),
        "built pulse forecast layout"
    );
    Ok(layout)
}
