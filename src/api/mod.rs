mod doughnut_config;
mod doughnut_layout;
mod engine;
mod pulse_forecast_config;
mod pulse_forecast_layout;

pub use doughnut_config::{DoughnutConfig, DoughnutDatum};
pub use doughnut_layout::{
    DOUGHNUT_START_ANGLE, DoughnutLayout, DoughnutSegment, Readout, TotalCaption,
    build_doughnut_layout,
};
pub use engine::ChartEngine;
pub use pulse_forecast_config::{GaugeInputs, PulseForecastConfig};
pub use pulse_forecast_layout::{GaugeLayout, build_pulse_forecast_layout};
