//! Pipeline orchestration - wires together all processing stages.

use std::path::PathBuf;

use crate::config::{Config, OutputFormat};
use crate::error::{ConfigError, PipelineError, Result};
use crate::types::{Color, RunReport};

use super::composer;
use super::discovery::FileDiscovery;
use super::pool::WorkerPool;
use super::probe;
use super::temporal::{TemporalResolver, TimestampedPath};

/// Immutable snapshot of the options for one run, resolved from the config
/// file and CLI overrides before any processing starts.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory scanned for images
    pub input: PathBuf,

    /// Where the barcode is written
    pub output: PathBuf,

    /// Output raster format
    pub format: OutputFormat,

    /// Worker thread count (>= 1)
    pub threads: usize,

    /// Re-order images chronologically by EXIF date
    pub sort_by_date: bool,

    /// Probe file headers and drop non-images before processing
    pub check_types: bool,

    /// Maximum traversal depth (unlimited when absent)
    pub max_depth: Option<usize>,

    /// Overlay date labels on sorted strips
    pub date_labels: bool,
}

/// The full reduction-and-composition pipeline for one run.
pub struct Pipeline {
    settings: RunSettings,
    discovery: FileDiscovery,
}

impl Pipeline {
    /// Create a pipeline from resolved settings.
    pub fn new(config: &Config, settings: RunSettings) -> Self {
        Self {
            discovery: FileDiscovery::new(config.processing.clone()),
            settings,
        }
    }

    /// Run the pipeline to completion and write the barcode.
    ///
    /// Per-image decode failures are absorbed into the failure count;
    /// configuration problems and the final encode abort the run. When no
    /// image survives, nothing is written and the report says so.
    pub fn run(&self) -> Result<RunReport> {
        let settings = &self.settings;

        if !settings.input.exists() {
            return Err(PipelineError::InputNotFound(settings.input.clone()).into());
        }
        if !settings.input.is_dir() {
            return Err(PipelineError::NotADirectory(settings.input.clone()).into());
        }
        self.check_output_writable()?;

        let mut report = RunReport {
            output: settings.output.clone(),
            ..RunReport::default()
        };

        // Discovery, plus the optional header probe.
        let mut paths = self.discovery.discover(&settings.input, settings.max_depth);
        report.discovered = paths.len();
        if settings.check_types {
            paths.retain(|path| probe::looks_like_image(path));
            report.skipped_non_image = report.discovered - paths.len();
            if report.skipped_non_image > 0 {
                tracing::info!(
                    "Type probe rejected {} of {} files",
                    report.skipped_non_image,
                    report.discovered
                );
            }
        }

        // Chronological re-ordering runs strictly before the pool.
        let timeline: Option<Vec<TimestampedPath>> = if settings.sort_by_date {
            let timeline = TemporalResolver::resolve(&paths);
            report.missing_timestamp = paths.len() - timeline.len();
            if report.missing_timestamp > 0 {
                tracing::warn!(
                    "{} image(s) had no usable EXIF date and were excluded",
                    report.missing_timestamp
                );
            }
            paths = timeline.iter().map(|entry| entry.path.clone()).collect();
            Some(timeline)
        } else {
            None
        };

        tracing::info!(
            "Reducing {} image(s) on {} thread(s)",
            paths.len(),
            settings.threads
        );
        let outcomes = WorkerPool::new(settings.threads).run(&paths);
        report.failed = outcomes.iter().filter(|o| o.is_failed()).count();
        if report.failed > 0 {
            tracing::warn!("{} image(s) could not be decoded", report.failed);
        }

        // Failed slots vanish from the strip; keep the timeline aligned so
        // labels still match their columns.
        let colors: Vec<Color> = outcomes.iter().filter_map(|o| o.color()).collect();
        let surviving_timeline: Option<Vec<TimestampedPath>> = timeline.map(|timeline| {
            timeline
                .into_iter()
                .zip(outcomes.iter())
                .filter(|(_, outcome)| !outcome.is_failed())
                .map(|(entry, _)| entry)
                .collect()
        });

        let mut canvas = composer::compose(&colors);
        report.columns = canvas.width();
        report.rows = canvas.height();

        if settings.date_labels {
            if let Some(timeline) = &surviving_timeline {
                composer::overlay_dates(&mut canvas, timeline);
            }
        }

        if canvas.width() == 0 {
            tracing::warn!("No images survived; nothing written to {:?}", settings.output);
            return Ok(report);
        }

        self.encode(&canvas)?;
        tracing::info!(
            "Wrote {}x{} {} barcode to {:?}",
            report.columns,
            report.rows,
            settings.format,
            settings.output
        );

        Ok(report)
    }

    /// Reject an unusable output location before any decoding starts.
    ///
    /// A run that discovers, probes, and decodes the whole collection only
    /// to fail on the final write wastes all of that work; an unwritable
    /// output is a configuration mistake and aborts up front.
    fn check_output_writable(&self) -> Result<()> {
        let output = &self.settings.output;
        let out_dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !out_dir.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "output directory {} does not exist",
                out_dir.display()
            ))
            .into());
        }
        if output.is_dir() {
            return Err(ConfigError::ValidationError(format!(
                "output path {} is a directory",
                output.display()
            ))
            .into());
        }
        let meta = std::fs::metadata(&out_dir)?;
        if meta.permissions().readonly() {
            return Err(ConfigError::ValidationError(format!(
                "output directory {} is not writable",
                out_dir.display()
            ))
            .into());
        }

        Ok(())
    }

    /// Encode the canvas to the configured path and format.
    ///
    /// A failed encode removes any partial output file before returning.
    fn encode(&self, canvas: &image::RgbImage) -> Result<()> {
        let settings = &self.settings;
        canvas
            .save_with_format(&settings.output, settings.format.to_image_format())
            .map_err(|e| {
                let _ = std::fs::remove_file(&settings.output);
                PipelineError::Encode {
                    path: settings.output.clone(),
                    format: settings.format.to_string(),
                    message: e.to_string(),
                }
            })?;
        Ok(())
    }
}
