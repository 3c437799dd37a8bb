//! Image reduction pipeline components.
//!
//! This module contains all the stages of the barcode pipeline:
//! - **discovery**: Find image files in directories
//! - **probe**: Fast magic-byte image type check
//! - **average**: Reduce one image to its average color
//! - **pool**: Fixed worker pool with pull-based distribution
//! - **temporal**: Chronological ordering from EXIF dates
//! - **composer**: Barcode canvas synthesis and date labels
//! - **processor**: Orchestrates the full pipeline

pub mod average;
pub mod composer;
pub mod discovery;
pub mod pool;
pub mod probe;
pub mod processor;
pub mod temporal;

// Re-exports for convenient access
pub use composer::{BarcodeSpec, HEIGHT_RATIO};
pub use discovery::FileDiscovery;
pub use pool::WorkerPool;
pub use processor::{Pipeline, RunSettings};
pub use temporal::{TemporalResolver, TimestampedPath};
