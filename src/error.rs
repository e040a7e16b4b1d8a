//! Error types for the row mapping pipeline.
//!
//! - [`ConfigError`] - mapping configuration could not be loaded or is malformed
//! - [`LoadError`] - tabular input could not be read
//! - [`OutputError`] - the output document could not be written
//!
//! Skipped rows and unparsable geolocation values are not errors; they are
//! reported through `tracing` and [`crate::batch::BatchOutcome`].

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while loading or validating a mapping configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A mapping key is the empty string.
    #[error("mapping contains an empty target path")]
    EmptyPath,

    /// A mapping key has an empty segment such as `a..b` or `.a`.
    #[error("target path '{0}' contains an empty segment")]
    EmptyPathSegment(String),

    /// A column rule, required field or passthrough entry names a blank column.
    #[error("{context} references a blank column name")]
    BlankColumn { context: String },
}

// =============================================================================
// Input Errors
// =============================================================================

/// Errors raised while reading tabular input.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open input {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors raised while writing the output document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}
