#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use radial_chart::ChartError;
use radial_chart::api::{ChartEngine, DoughnutConfig, DoughnutDatum, GaugeInputs, PulseForecastConfig};
use radial_chart::core::{FontSpec, TextMeasurer, Viewport};
use radial_chart::render::{CairoRenderer, Color, PangoTextMeasurer, RenderFrame, Renderer};

fn doughnut_data() -> Vec<DoughnutDatum> {
    vec![
        DoughnutDatum::new("Payroll", 620.0, Color::from_rgb8(0x4c, 0xaf, 0x50)),
        DoughnutDatum::new("Hosting", 240.0, Color::from_rgb8(0xff, 0xb3, 0x00)),
        DoughnutDatum::new("Travel", 140.0, Color::from_rgb8(0xe5, 0x39, 0x35)),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn clear_color_rejects_out_of_range_channels() {
    let mut renderer = CairoRenderer::new(120, 80).expect("renderer");
    assert_eq!(renderer.clear_color(), Color::WHITE);

    let err = renderer
        .set_clear_color(Color::rgba(0.0, 0.0, 0.0, 1.5))
        .expect_err("alpha above one");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(renderer.clear_color(), Color::WHITE);

    let backdrop = Color::from_rgb8(0xf5, 0xf5, 0xf5);
    renderer.set_clear_color(backdrop).expect("valid color");
    assert_eq!(renderer.clear_color(), backdrop);
    renderer
        .render(&RenderFrame::new(Viewport::new(120.0, 80.0)))
        .expect("render empty frame");
    assert_eq!(renderer.last_stats().rects_drawn, 0);
}

#[test]
fn cairo_renderer_draws_every_gauge_primitive() {
    let renderer = CairoRenderer::new(900, 600).expect("renderer");
    let mut engine = ChartEngine::new(renderer);
    let layout = engine
        .render_pulse_forecast(
            Viewport::new(900.0, 600.0),
            GaugeInputs::new(500.0, 1000.0, 1200.0),
            &PulseForecastConfig::default(),
        )
        .expect("render");

    let frame = layout.to_render_frame();
    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 3);
    assert_eq!(stats.arcs_drawn, frame.arcs.len());
    assert_eq!(stats.circles_drawn, frame.circles.len());
    assert_eq!(stats.polylines_drawn, 3);
    assert_eq!(stats.texts_drawn, 7);

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_doughnut_on_external_context() {
    let renderer = CairoRenderer::new(400, 500).expect("renderer");
    let mut engine =
        ChartEngine::new(renderer).with_text_measurer(PangoTextMeasurer::new().expect("pango"));

    let surface = ImageSurface::create(Format::ARgb32, 400, 500).expect("surface");
    let context = Context::new(&surface).expect("context");
    let layout = engine
        .render_doughnut_on_cairo_context(
            &context,
            Viewport::new(400.0, 500.0),
            &doughnut_data(),
            &DoughnutConfig::default(),
        )
        .expect("render on context");

    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.arcs_drawn, 3);
    assert_eq!(stats.circles_drawn, 3);
    assert_eq!(
        stats.texts_drawn,
        3 + layout.visible_readouts().count() + 1
    );
}

#[test]
fn pango_measurer_reports_positive_metrics() {
    let measurer = PangoTextMeasurer::new().expect("pango");
    let small = measurer
        .measure(&FontSpec::normal(12.0), "Forecast")
        .expect("measure");
    let large = measurer
        .measure(&FontSpec::normal(24.0), "Forecast")
        .expect("measure");

    assert!(small.width > 0.0);
    assert!(small.ascent > 0.0);
    assert!(large.width > small.width);
}
