pub mod dot_arc;
pub mod format;
pub mod gauge_scale;
pub mod legend;
pub mod rings;
pub mod text;
pub mod threshold;
pub mod ticks;
pub mod types;

pub use dot_arc::{Dot, DotArc, generate_dot_arc};
pub use format::{format_currency, round_half_up};
pub use gauge_scale::{GaugeScale, point_at};
pub use legend::{
    LEGEND_MIN_FONT_SIZE_PX, LEGEND_TRIAL_FONT_SIZE_PX, LegendEntry, LegendMetrics,
    fit_legend_font_size, fit_total_caption_font_size, layout_legend, readout_fits_annulus,
    readout_position,
};
pub use rings::{
    DoughnutGeometry, GaugeRingPercentages, GaugeRings, PulseBodyRect, resolve_doughnut_geometry,
    resolve_gauge_rings,
};
pub use text::{
    CachedTextMeasurer, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX, FontSpec, FontWeight,
    HeuristicTextMeasurer, TextMeasureCacheStats, TextMeasurer, TextMetrics,
    UnavailableTextMeasurer, fit_font_size_linear, measure_or_estimate, widest_text_width,
};
pub use threshold::{
    ArcSegment, BandAngleRange, BandKind, Segmentation, ThresholdBand, ThresholdBands, halo_band,
    segment_todate,
};
pub use ticks::{
    TickDirection, TickKind, TickLabel, TickSpec, TickStyle, base_tick_font_size,
    place_inner_tick, place_outer_ticks,
};
pub use types::{Point, Viewport};
