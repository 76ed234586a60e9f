mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, CirclePrimitive, Color, PolylinePrimitive, RectPrimitive, TextBaseline,
    TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` and draw exactly the
/// geometry it holds; no layout happens past this point.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer,
};
