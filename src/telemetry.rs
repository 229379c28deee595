//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! [`LoggingConfig::level`].

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Failed to install tracing subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Builds the filter used by [`init`].
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) if !directive.trim().is_empty() => Ok(EnvFilter::try_new(directive)?),
        _ => Ok(EnvFilter::try_new(&config.level)?),
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// - `InvalidFilter` if the filter directive does not parse
/// - `AlreadyInitialized` if a global subscriber is already set
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    tracing::debug!(format = ?config.format, "tracing initialized");
    Ok(())
}
