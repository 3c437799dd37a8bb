//! Chronostrip Core - image collection barcode library.
//!
//! Chronostrip reduces every image in a directory to one average color and
//! renders the sequence as a single "barcode" strip: one column per image,
//! optionally in chronological order derived from EXIF dates.
//!
//! # Architecture
//!
//! ```text
//! Discover → (probe) → [Temporal sort] → Worker pool (avg color) → Compose → Encode
//! ```
//!
//! The worker pool is the only concurrent stage: a shared atomic cursor
//! hands out input indices and each worker writes its result into a
//! pre-sized, position-stable slot, so output order never depends on
//! scheduling.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chronostrip_core::{Config, Pipeline, RunSettings};
//!
//! let config = Config::load()?;
//! let pipeline = Pipeline::new(&config, settings);
//! let report = pipeline.run()?;
//! println!("{} columns written", report.columns);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, OutputFormat};
pub use error::{ChronostripError, ConfigError, PipelineError, PipelineResult, Result};
pub use pipeline::{Pipeline, RunSettings, TemporalResolver, TimestampedPath, WorkerPool};
pub use types::{Color, ColorOutcome, RunReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
