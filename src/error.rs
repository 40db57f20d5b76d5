//! Error types for the forecast decoding and configuration layers.
//!
//! Curve construction and interpolation never fail: too few samples is a
//! valid, empty chart and is reported through `Option` instead.

use thiserror::Error;

/// Errors raised while decoding Open-Meteo forecast and geocoding payloads.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Forecast response has no {0} data")]
    MissingData(&'static str),

    #[error("Forecast field {field} has {found} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),

    #[error("Unreadable time: {0}")]
    InvalidTime(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
