use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("degenerate layout: resolved outer radius {outer_radius} is not positive")]
    DegenerateLayout { outer_radius: f64 },

    #[error("text measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
