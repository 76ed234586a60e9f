use cairo::{Context, Format, ImageSurface, LineJoin};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::{FontSpec, FontWeight, TextMeasurer, TextMetrics};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextBaseline, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub arcs_drawn: usize,
    pub circles_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to write png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for arc in &frame.arcs {
            context.new_path();
            context.arc(
                arc.cx,
                arc.cy,
                arc.outer_radius,
                arc.start_angle,
                arc.end_angle,
            );
            if arc.inner_radius > 0.0 {
                context.arc_negative(
                    arc.cx,
                    arc.cy,
                    arc.inner_radius,
                    arc.end_angle,
                    arc.start_angle,
                );
            } else {
                context.line_to(arc.cx, arc.cy);
            }
            context.close_path();
            apply_color(context, arc.fill_color);
            if arc.stroke_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill arc", err))?;
                apply_color(context, arc.stroke_color);
                context.set_line_width(arc.stroke_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke arc border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill arc", err))?;
            }
            stats.arcs_drawn += 1;
        }

        for circle in &frame.circles {
            context.new_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            apply_color(context, circle.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }

        for polyline in &frame.polylines {
            context.new_path();
            let mut points = polyline.points.iter();
            if let Some((x, y)) = points.next() {
                context.move_to(*x, *y);
            }
            for (x, y) in points {
                context.line_to(*x, *y);
            }
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context.set_line_join(LineJoin::Miter);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            layout.set_font_description(Some(&font_description(&text.font)));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };
            let y = match text.baseline {
                TextBaseline::Top => text.y,
                TextBaseline::Middle => text.y - f64::from(text_height) / 2.0,
                TextBaseline::Bottom => text.y - f64::from(text_height),
            };

            apply_color(context, text.color);
            context.move_to(x, y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Text-metric service backed by Pango, measuring on a 1x1 scratch surface.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> ChartResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1).map_err(|err| {
            ChartError::MeasurementUnavailable(format!("failed to create scratch surface: {err}"))
        })?;
        let context = Context::new(&surface).map_err(|err| {
            ChartError::MeasurementUnavailable(format!("failed to create cairo context: {err}"))
        })?;
        Ok(Self { context })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure(&self, font: &FontSpec, text: &str) -> ChartResult<TextMetrics> {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&font_description(font)));
        layout.set_text(text);

        let scale = f64::from(pango::SCALE);
        let (_ink, logical) = layout.extents();
        let height = f64::from(logical.height()) / scale;
        let ascent = f64::from(layout.baseline()) / scale;
        Ok(TextMetrics {
            width: f64::from(logical.width()) / scale,
            ascent,
            descent: (height - ascent).max(0.0),
        })
    }
}

fn font_description(font: &FontSpec) -> FontDescription {
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_weight(match font.weight {
        FontWeight::Normal => pango::Weight::Normal,
        FontWeight::Bold => pango::Weight::Bold,
    });
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    description
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    context.new_path();
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
