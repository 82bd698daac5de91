//! Error types for the date range picker library

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the date range picker library
///
/// The selection engine itself never fails; these errors come from parsing
/// text input and loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Date parsing error
    #[error("Invalid date expression: {0}")]
    InvalidDate(String),

    /// Month parsing error
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Unknown preset key
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Event script parsing error
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Configuration value error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
