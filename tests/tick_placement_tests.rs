use approx::assert_relative_eq;
use radial_chart::core::{
    FontSpec, GaugeRingPercentages, GaugeRings, GaugeScale, HeuristicTextMeasurer, TickDirection,
    TickKind, TickStyle, UnavailableTextMeasurer, Viewport, base_tick_font_size, format_currency,
    place_inner_tick, place_outer_ticks, resolve_gauge_rings,
};
use radial_chart::render::{TextBaseline, TextHAlign};

fn rings() -> GaugeRings {
    resolve_gauge_rings(Viewport::new(900.0, 600.0), &GaugeRingPercentages::default())
        .expect("rings")
}

#[test]
fn base_font_is_a_floored_sixth_of_the_outer_radius() {
    assert_eq!(base_tick_font_size(200.0), 33.0);
    assert_eq!(base_tick_font_size(0.5), 1.0);
}

#[test]
fn smaller_value_goes_left() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let ticks = place_outer_ticks(
        &rings,
        scale,
        500.0,
        1000.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );

    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].kind, TickKind::ToDate);
    assert_eq!(ticks[0].direction, Some(TickDirection::Left));
    assert_eq!(ticks[1].kind, TickKind::Budget);
    assert_eq!(ticks[1].direction, Some(TickDirection::Right));

    let swapped = place_outer_ticks(
        &rings,
        scale,
        1000.0,
        500.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );
    assert_eq!(swapped[0].kind, TickKind::Budget);
    assert_eq!(swapped[1].kind, TickKind::ToDate);
}

#[test]
fn equal_values_keep_to_date_on_the_left() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[1000.0, 1000.0, 900.0]).expect("scale");
    let ticks = place_outer_ticks(
        &rings,
        scale,
        1000.0,
        1000.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );
    assert_eq!(ticks[0].kind, TickKind::ToDate);
    assert_eq!(ticks[0].direction, Some(TickDirection::Left));
    assert_eq!(ticks[1].kind, TickKind::Budget);
}

#[test]
fn outer_tick_geometry_follows_the_tick_annulus() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let ticks = place_outer_ticks(
        &rings,
        scale,
        500.0,
        1000.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );

    for tick in &ticks {
        assert_relative_eq!(
            tick.inner.distance_to(rings.center),
            rings.inner_cutout_radius,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            tick.outer.distance_to(rings.center),
            220.0,
            epsilon = 1e-9
        );
        let jog = tick.jog.expect("outer ticks jog");
        assert_relative_eq!(jog.x, tick.outer.x);
        assert_relative_eq!(tick.end.y, jog.y);
        assert_relative_eq!(tick.end_circle_radius, 10.0, epsilon = 1e-9);
        assert_eq!(tick.path().len(), 4);
    }

    // Both ticks sit on their own half, so the turn stays at the tick tip.
    assert_relative_eq!(ticks[0].jog.expect("jog").y, ticks[0].outer.y);
    assert_relative_eq!(ticks[1].jog.expect("jog").y, ticks[1].outer.y);
}

#[test]
fn tick_on_the_opposite_half_is_clamped_above_the_arc_top() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[100.0, 150.0, 2000.0]).expect("scale");
    let ticks = place_outer_ticks(
        &rings,
        scale,
        100.0,
        150.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );

    let budget = &ticks[1];
    assert_eq!(budget.direction, Some(TickDirection::Right));
    assert!(budget.outer.x < rings.center.x);
    let jog = budget.jog.expect("jog");
    assert_relative_eq!(jog.y, rings.arc_top_y - 2.0, epsilon = 1e-9);
    assert!(jog.y < budget.outer.y);
}

#[test]
fn label_end_clears_the_widest_text_plus_padding() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let style = TickStyle::default();
    let ticks = place_outer_ticks(&rings, scale, 500.0, 1000.0, &style, &HeuristicTextMeasurer);

    let base = 33.0;
    let description_font = FontSpec::normal(base);
    let value_font = FontSpec::bold(1.8 * base);
    let h_pad = 0.5 * 1.8 * base;
    let widest = |label: &str, value: f64| {
        HeuristicTextMeasurer::estimate(&description_font, label)
            .width
            .max(HeuristicTextMeasurer::estimate(&value_font, &format_currency("$", value)).width)
    };

    let left = &ticks[0];
    assert_relative_eq!(
        left.end.x,
        rings.pulse_edge_x(-1.0) - (widest("To date", 500.0) + h_pad),
        epsilon = 1e-9
    );
    let right = &ticks[1];
    assert_relative_eq!(
        right.end.x,
        rings.pulse_edge_x(1.0) + widest("Budget", 1000.0) + h_pad,
        epsilon = 1e-9
    );
    assert_relative_eq!(rings.pulse_edge_x(-1.0), 150.0, epsilon = 1e-9);
    assert_relative_eq!(rings.pulse_edge_x(1.0), 750.0, epsilon = 1e-9);
}

#[test]
fn outer_labels_split_around_the_tick_line() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let ticks = place_outer_ticks(
        &rings,
        scale,
        500.0,
        1000.0,
        &TickStyle::default(),
        &HeuristicTextMeasurer,
    );

    let left = &ticks[0];
    assert_eq!(left.labels.len(), 2);
    let (description, value) = (&left.labels[0], &left.labels[1]);
    assert_eq!(description.text, "To date");
    assert_eq!(value.text, "$500");
    assert_eq!(description.baseline, TextBaseline::Bottom);
    assert_eq!(value.baseline, TextBaseline::Top);
    assert_eq!(description.h_align, TextHAlign::Left);
    // v_pad is max(0.25 * 33, end circle radius 10).
    assert_relative_eq!(description.y, left.end.y - 10.0, epsilon = 1e-9);
    assert_relative_eq!(value.y, left.end.y + 10.0, epsilon = 1e-9);
    assert_eq!(value.font, FontSpec::bold(1.8 * 33.0));

    assert_eq!(ticks[1].labels[0].h_align, TextHAlign::Right);
    assert_eq!(ticks[1].value_text, "$1000");
}

#[test]
fn forecast_tick_runs_inward_from_the_ring_edge() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let tick = place_inner_tick(&rings, scale, 1200.0, &TickStyle::default());

    assert_eq!(tick.kind, TickKind::Forecast);
    assert_eq!(tick.direction, None);
    assert_relative_eq!(tick.outer.x, 650.0, epsilon = 1e-9);
    assert_relative_eq!(tick.outer.y, 300.0, epsilon = 1e-9);
    assert_relative_eq!(tick.inner.x, 580.0, epsilon = 1e-9);
    assert_eq!(tick.end, tick.inner);
    assert_eq!(tick.path().len(), 2);

    let texts: Vec<&str> = tick.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["Forecast", "for this period", "$1200"]);
    assert_relative_eq!(tick.labels[0].y, 300.0 - 33.0 - 8.25, epsilon = 1e-9);
    assert_relative_eq!(tick.labels[1].y, 300.0 - 8.25, epsilon = 1e-9);
    assert_relative_eq!(tick.labels[2].y, 300.0 + 8.25, epsilon = 1e-9);
    assert_eq!(tick.labels[2].font, FontSpec::bold(66.0));
    assert!(
        tick.labels
            .iter()
            .all(|label| label.h_align == TextHAlign::Center && label.x == 450.0)
    );
}

#[test]
fn unavailable_measurement_falls_back_to_estimates() {
    let rings = rings();
    let scale = GaugeScale::from_values(&[500.0, 1000.0, 1200.0]).expect("scale");
    let style = TickStyle::default();
    let measured = place_outer_ticks(&rings, scale, 500.0, 1000.0, &style, &HeuristicTextMeasurer);
    let fallback =
        place_outer_ticks(&rings, scale, 500.0, 1000.0, &style, &UnavailableTextMeasurer);
    assert_eq!(measured, fallback);
}
