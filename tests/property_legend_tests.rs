use radial_chart::api::{DoughnutConfig, DoughnutDatum, build_doughnut_layout};
use radial_chart::core::{
    HeuristicTextMeasurer, LEGEND_MIN_FONT_SIZE_PX, Viewport, fit_legend_font_size,
};
use radial_chart::render::Color;
use proptest::prelude::*;
use std::f64::consts::TAU;

proptest! {
    #[test]
    fn legend_font_respects_the_floor(
        labels in prop::collection::vec("[A-Za-z ]{1,40}", 1..12),
        width in 50.0f64..2000.0,
        padding in 0.0f64..45.0,
    ) {
        let font_size = fit_legend_font_size(&HeuristicTextMeasurer, &labels, width, padding);
        prop_assert!(font_size >= LEGEND_MIN_FONT_SIZE_PX);
        prop_assert_eq!(font_size, font_size.round());
    }

    #[test]
    fn doughnut_slices_cover_one_full_turn(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..16),
    ) {
        prop_assume!(values.iter().any(|value| value.abs() > 1e-6));
        let data: Vec<DoughnutDatum> = values
            .iter()
            .enumerate()
            .map(|(index, value)| DoughnutDatum::new(format!("Item {index}"), *value, Color::BLACK))
            .collect();

        let layout = build_doughnut_layout(
            Viewport::new(600.0, 900.0),
            &data,
            &DoughnutConfig::default(),
            &HeuristicTextMeasurer,
        )
        .expect("layout");

        let swept: f64 = layout
            .segments
            .iter()
            .map(|segment| segment.end_angle - segment.start_angle)
            .sum();
        prop_assert!((swept - TAU).abs() <= 1e-9);
        prop_assert!(layout.segments.iter().all(|segment| segment.end_angle >= segment.start_angle));
        prop_assert_eq!(layout.legend.len(), data.len());
        prop_assert_eq!(layout.readouts.len(), data.len());
        layout.to_render_frame().validate().expect("valid frame");
    }

    #[test]
    fn doughnut_layout_is_deterministic(
        values in prop::collection::vec(1.0f64..1000.0, 1..10),
        width in 100.0f64..1200.0,
        height in 100.0f64..1200.0,
    ) {
        let data: Vec<DoughnutDatum> = values
            .iter()
            .map(|value| DoughnutDatum::new("Cost center", *value, Color::WHITE))
            .collect();
        let config = DoughnutConfig::default();
        let first = build_doughnut_layout(Viewport::new(width, height), &data, &config, &HeuristicTextMeasurer)
            .expect("first");
        let second = build_doughnut_layout(Viewport::new(width, height), &data, &config, &HeuristicTextMeasurer)
            .expect("second");
        prop_assert_eq!(first, second);
    }
}
