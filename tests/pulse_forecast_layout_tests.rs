use approx::assert_relative_eq;
use radial_chart::ChartError;
use radial_chart::api::{
    ChartEngine, GaugeInputs, PulseForecastConfig, build_pulse_forecast_layout,
};
use radial_chart::core::{
    BandKind, HeuristicTextMeasurer, TickKind, UnavailableTextMeasurer, Viewport,
};
use radial_chart::render::NullRenderer;
use std::f64::consts::PI;

fn viewport() -> Viewport {
    Viewport::new(900.0, 600.0)
}

#[test]
fn under_budget_forecast_over_budget_scenario() {
    let config = PulseForecastConfig::default();
    let layout = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(500.0, 1000.0, 1200.0),
        &config,
        &HeuristicTextMeasurer,
    )
    .expect("layout");

    assert!(!layout.degenerate);
    assert_relative_eq!(layout.total, 2400.0);
    assert_eq!(layout.halo_band, BandKind::Borderline);
    assert_eq!(layout.halo_color, config.borderline_color);
    assert_eq!(layout.pulse_body[1].color, config.borderline_color);

    assert_eq!(layout.segments.len(), 2);
    let good = &layout.segments[0];
    assert_eq!(good.band, Some(BandKind::Good));
    assert_relative_eq!(good.start_angle, PI);
    assert_relative_eq!(good.end_angle, PI + 500.0 / 2400.0 * 2.0 * PI, epsilon = 1e-12);
    assert_eq!(layout.segments[1].end_angle, PI);

    let dot_arc = layout.dot_arc.as_ref().expect("forecast exceeds spend");
    assert!(!dot_arc.dots.is_empty());
    assert_relative_eq!(dot_arc.start_angle, good.end_angle);
    assert_relative_eq!(dot_arc.end_angle, 2.0 * PI, epsilon = 1e-12);
    assert_eq!(dot_arc.dots[0].color, config.good_color);

    let kinds: Vec<TickKind> = layout.ticks.iter().map(|tick| tick.kind).collect();
    assert_eq!(
        kinds,
        vec![TickKind::Forecast, TickKind::ToDate, TickKind::Budget]
    );
}

#[test]
fn overspend_scenario_pins_remainder_and_skips_dots() {
    let config = PulseForecastConfig::default();
    let layout = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(1300.0, 1000.0, 1300.0),
        &config,
        &HeuristicTextMeasurer,
    )
    .expect("layout");

    assert_relative_eq!(layout.total, 2600.0);
    assert_eq!(layout.halo_band, BandKind::Over);
    assert_eq!(layout.segments.len(), 4);
    assert_eq!(layout.segments[3].end_angle, PI);
    assert_relative_eq!(
        layout.remainder_raw_end.expect("raw end"),
        3.0 * PI,
        epsilon = 1e-12
    );
    assert!(layout.dot_arc.is_none());
}

#[test]
fn render_frame_holds_every_gauge_primitive() {
    let layout = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(500.0, 1000.0, 1200.0),
        &PulseForecastConfig::default(),
        &HeuristicTextMeasurer,
    )
    .expect("layout");
    let frame = layout.to_render_frame();
    frame.validate().expect("valid frame");

    let dots = layout.dot_arc.as_ref().map_or(0, |arc| arc.dots.len());
    assert_eq!(frame.rects.len(), 3);
    // Clear disc plus the good and remainder segments.
    assert_eq!(frame.arcs.len(), 3);
    assert_eq!(frame.arcs[0].inner_radius, 0.0);
    assert_eq!(frame.circles.len(), dots + 3);
    assert_eq!(frame.polylines.len(), 3);
    assert_eq!(frame.texts.len(), 7);
    assert!(frame.texts.iter().any(|text| text.text == "$1200"));
}

#[test]
fn engine_renders_the_built_layout() {
    let mut engine = ChartEngine::new(NullRenderer::default());
    let layout = engine
        .render_pulse_forecast(
            viewport(),
            GaugeInputs::new(500.0, 1000.0, 1200.0),
            &PulseForecastConfig::default(),
        )
        .expect("render");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_arc_count, layout.to_render_frame().arcs.len());
    assert_eq!(renderer.last_polyline_count, 3);
    assert_eq!(renderer.last_text_count, 7);
}

#[test]
fn degenerate_viewport_returns_flagged_empty_layout() {
    let layout = build_pulse_forecast_layout(
        Viewport::new(0.0, 300.0),
        GaugeInputs::new(500.0, 1000.0, 1200.0),
        &PulseForecastConfig::default(),
        &HeuristicTextMeasurer,
    )
    .expect("degenerate layouts are not errors");

    assert!(layout.degenerate);
    assert!(layout.is_empty());
    assert!(layout.rings.is_none());
    assert!(layout.to_render_frame().is_empty());
    assert_eq!(layout.halo_band, BandKind::Borderline);

    let mut engine = ChartEngine::new(NullRenderer::default());
    engine
        .render_pulse_forecast(
            Viewport::new(0.0, 300.0),
            GaugeInputs::new(500.0, 1000.0, 1200.0),
            &PulseForecastConfig::default(),
        )
        .expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_arc_count, 0);
}

#[test]
fn configuration_errors_surface_before_layout() {
    let inputs = GaugeInputs::new(500.0, 1000.0, 1200.0);

    let err = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(500.0, 0.0, 1200.0),
        &PulseForecastConfig::default(),
        &HeuristicTextMeasurer,
    )
    .expect_err("zero budget");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let inverted = PulseForecastConfig::default().with_ring_percentages(75.0, 145.0, 140.0, 150.0);
    let err = build_pulse_forecast_layout(viewport(), inputs, &inverted, &HeuristicTextMeasurer)
        .expect_err("inverted rings");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let ratio = PulseForecastConfig::default().with_not_bad_ratio(0.9);
    let err = build_pulse_forecast_layout(viewport(), inputs, &ratio, &HeuristicTextMeasurer)
        .expect_err("not-bad ratio below 1");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let err = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(f64::NAN, 1000.0, 1200.0),
        &PulseForecastConfig::default(),
        &HeuristicTextMeasurer,
    )
    .expect_err("nan spend");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn missing_font_engine_still_produces_a_full_layout() {
    let inputs = GaugeInputs::new(500.0, 1000.0, 1200.0);
    let config = PulseForecastConfig::default();
    let measured =
        build_pulse_forecast_layout(viewport(), inputs, &config, &HeuristicTextMeasurer)
            .expect("layout");
    let fallback =
        build_pulse_forecast_layout(viewport(), inputs, &config, &UnavailableTextMeasurer)
            .expect("layout");
    assert_eq!(measured, fallback);
}

#[test]
fn custom_labels_and_currency_flow_into_ticks() {
    let config = PulseForecastConfig::default()
        .with_currency_symbol("€")
        .with_tick_labels("Spent", "Plan");
    let layout = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(499.5, 1000.0, 1200.0),
        &config,
        &HeuristicTextMeasurer,
    )
    .expect("layout");

    let to_date = layout
        .ticks
        .iter()
        .find(|tick| tick.kind == TickKind::ToDate)
        .expect("to-date tick");
    assert_eq!(to_date.label_text, "Spent");
    assert_eq!(to_date.value_text, "€500");
}

#[test]
fn snapshot_json_names_the_halo_band() {
    let layout = build_pulse_forecast_layout(
        viewport(),
        GaugeInputs::new(500.0, 1000.0, 1200.0),
        &PulseForecastConfig::default(),
        &HeuristicTextMeasurer,
    )
    .expect("layout");
    let json = layout.snapshot_json_pretty().expect("json");
    assert!(json.contains("\"halo_band\": \"borderline\""));
    assert!(json.contains("\"halo_color\": \"#ffb300\""));
}
