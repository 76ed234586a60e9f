use serde::Serialize;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

/// Backend-agnostic scene for one widget draw pass.
///
/// Backends draw the lists in field order: rects, arcs, circles, polylines,
/// then texts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub arcs: Vec<ArcPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            arcs: Vec::new(),
            circles: Vec::new(),
            polylines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_arc(mut self, arc: ArcPrimitive) -> Self {
        self.arcs.push(arc);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.circles.push(circle);
        self
    }

    #[must_use]
    pub fn with_polyline(mut self, polyline: PolylinePrimitive) -> Self {
        self.polylines.push(polyline);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.width.is_finite() || !self.viewport.height.is_finite() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for arc in &self.arcs {
            arc.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.arcs.is_empty()
            && self.circles.is_empty()
            && self.polylines.is_empty()
            && self.texts.is_empty()
    }
}
