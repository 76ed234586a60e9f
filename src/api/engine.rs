use crate::core::{HeuristicTextMeasurer, TextMeasurer, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::{
    DoughnutConfig, DoughnutDatum, DoughnutLayout, GaugeInputs, GaugeLayout, PulseForecastConfig,
    build_doughnut_layout, build_pulse_forecast_layout,
};

/// Main facade consumed by host applications.
///
/// `ChartEngine` pairs a renderer with the text-metric service used during
/// layout. Every `build_*`/`render_*` call is an independent layout pass.
pub struct ChartEngine<R: Renderer, M: TextMeasurer = HeuristicTextMeasurer> {
    renderer: R,
    measurer: M,
}

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine that lays text out with the heuristic measurer.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            measurer: HeuristicTextMeasurer,
        }
    }
}

impl<R: Renderer, M: TextMeasurer> ChartEngine<R, M> {
    /// Swaps the text-metric service, usually for the one matching the
    /// drawing surface.
    #[must_use]
    pub fn with_text_measurer<N: TextMeasurer>(self, measurer: N) -> ChartEngine<R, N> {
        ChartEngine {
            renderer: self.renderer,
            measurer,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn text_measurer(&self) -> &M {
        &self.measurer
    }

    pub fn build_pulse_forecast(
        &self,
        viewport: Viewport,
        inputs: GaugeInputs,
        config: &PulseForecastConfig,
    ) -> ChartResult<GaugeLayout> {
        build_pulse_forecast_layout(viewport, inputs, config, &self.measurer)
    }

    pub fn build_doughnut(
        &self,
        viewport: Viewport,
        data: &[DoughnutDatum],
        config: &DoughnutConfig,
    ) -> ChartResult<DoughnutLayout> {
        build_doughnut_layout(viewport, data, config, &self.measurer)
    }

    /// Lays out and draws the gauge, returning the layout that was drawn.
    pub fn render_pulse_forecast(
        &mut self,
        viewport: Viewport,
        inputs: GaugeInputs,
        config: &PulseForecastConfig,
    ) -> ChartResult<GaugeLayout> {
        let layout = self.build_pulse_forecast(viewport, inputs, config)?;
        self.renderer.render(&layout.to_render_frame())?;
        Ok(layout)
    }

    /// Lays out and draws the doughnut, returning the layout that was drawn.
    pub fn render_doughnut(
        &mut self,
        viewport: Viewport,
        data: &[DoughnutDatum],
        config: &DoughnutConfig,
    ) -> ChartResult<DoughnutLayout> {
        let layout = self.build_doughnut(viewport, data, config)?;
        self.renderer.render(&layout.to_render_frame())?;
        Ok(layout)
    }

    /// Draws the gauge into an external cairo context.
    ///
    /// This path is used by host draw callbacks while keeping the renderer
    /// implementation decoupled from toolkit-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_pulse_forecast_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        viewport: Viewport,
        inputs: GaugeInputs,
        config: &PulseForecastConfig,
    ) -> ChartResult<GaugeLayout>
    where
        R: CairoContextRenderer,
    {
        let layout = self.build_pulse_forecast(viewport, inputs, config)?;
        self.renderer
            .render_on_cairo_context(context, &layout.to_render_frame())?;
        Ok(layout)
    }

    #[cfg(feature = "cairo-backend")]
    pub fn render_doughnut_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        viewport: Viewport,
        data: &[DoughnutDatum],
        config: &DoughnutConfig,
    ) -> ChartResult<DoughnutLayout>
    where
        R: CairoContextRenderer,
    {
        let layout = self.build_doughnut(viewport, data, config)?;
        self.renderer
            .render_on_cairo_context(context, &layout.to_render_frame())?;
        Ok(layout)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
