//! Error types for the chronostrip pipeline.
//!
//! Per-image decode failures are absorbed inside the worker pool and only
//! surfaced as an end-of-run count; the variants here cover the failures
//! that abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for chronostrip operations.
#[derive(Error, Debug)]
pub enum ChronostripError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Barcode encode/write failed
    #[error("Encode error for {path} as {format}: {message}")]
    Encode {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Input path does not exist
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Convenience type alias for chronostrip results.
pub type Result<T> = std::result::Result<T, ChronostripError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
