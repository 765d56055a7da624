//! Error types for the sumo engine.

use thiserror::Error;

/// Fatal simulation failures. The solver never reports these itself; they are
/// detected by validating body state after each sub-step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// A body's position, angle or velocity became NaN or infinite.
    #[error("body {body} has non-finite state (mistuned muscle strength, damping or sub-step count?)")]
    NonFinite {
        /// Debug name of the offending body.
        body: String,
    },
}

/// Errors loading a decorative head skin. Always recoverable: the head is drawn plain.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The source could not be read.
    #[error("failed to read {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The URI scheme is not one the loader can fetch.
    #[error("unsupported skin source scheme: {0}")]
    UnsupportedScheme(String),

    /// The bytes are not a PNG image.
    #[error("{0} is not a PNG image")]
    NotPng(String),

    /// The PNG header ended early or has a zero-sized image.
    #[error("{0} has a truncated or empty PNG header")]
    Truncated(String),
}

/// Errors loading configuration. Callers fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but a value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}
