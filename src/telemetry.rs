//! Opt-in `tracing` subscriber for hosts and the snapshot tool.
//!
//! Layout passes emit events under the `radial_chart` target. Hosts that wire
//! their own subscriber never need this module.

use crate::error::ChartResult;

/// Filter used when `RUST_LOG` is unset: layout fallbacks and degenerate
/// layouts at `info` and above, nothing from other crates.
pub const DEFAULT_LOG_FILTER: &str = "radial_chart=info";

/// Filter directives from `RUST_LOG`, or [`DEFAULT_LOG_FILTER`] when the
/// variable is unset or blank.
#[must_use]
pub fn filter_directives_from_env() -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned())
}

/// Installs a compact subscriber filtered by `RUST_LOG`.
///
/// An unparsable `RUST_LOG` falls back to [`DEFAULT_LOG_FILTER`].
/// Returns `false` when the `telemetry` feature is off or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    let directives = filter_directives_from_env();
    match init_tracing_with_filter(&directives) {
        Ok(installed) => installed,
        Err(_) => init_tracing_with_filter(DEFAULT_LOG_FILTER).unwrap_or(false),
    }
}

/// Installs a compact subscriber for explicit filter directives such as
/// `radial_chart=debug`.
///
/// Malformed directives are an `InvalidConfig` error. `Ok(false)` means the
/// feature is off or another subscriber won the global slot.
#[cfg(feature = "telemetry")]
pub fn init_tracing_with_filter(directives: &str) -> ChartResult<bool> {
    use crate::error::ChartError;

    let filter = tracing_subscriber::EnvFilter::try_new(directives).map_err(|err| {
        ChartError::InvalidConfig(format!("invalid log filter `{directives}`: {err}"))
    })?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .is_ok())
}

#[cfg(not(feature = "telemetry"))]
pub fn init_tracing_with_filter(_directives: &str) -> ChartResult<bool> {
    Ok(false)
}
