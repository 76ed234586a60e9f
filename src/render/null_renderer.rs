use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless layout usage.
///
/// It still validates frame content so tests catch invalid geometry before
/// it reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_arc_count: usize,
    pub last_circle_count: usize,
    pub last_polyline_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_arc_count = frame.arcs.len();
        self.last_circle_count = frame.circles.len();
        self.last_polyline_count = frame.polylines.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
