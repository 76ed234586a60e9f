//! radial-chart-rs: layout engine for radial budget widgets.
//!
//! Two widgets are provided, a pulse forecast gauge (spend to date against a
//! budget, with a forecast) and a labeled doughnut. Layout is pure math in
//! `core`, `api` turns it into render-ready descriptions, and `render` draws
//! them through any `Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{
    ChartEngine, DoughnutConfig, DoughnutDatum, GaugeInputs, PulseForecastConfig,
    build_doughnut_layout, build_pulse_forecast_layout,
};
pub use error::{ChartError, ChartResult};
