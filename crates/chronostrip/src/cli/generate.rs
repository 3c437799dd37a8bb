//! The `chronostrip generate` command.

use clap::Args;
use std::path::PathBuf;

use chronostrip_core::{Config, OutputFormat, Pipeline, RunReport, RunSettings};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory of images to scan
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output image file (defaults to ./_barcode.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (png, jpeg, tiff, bmp); inferred from the output
    /// extension when omitted
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Number of worker threads
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Sort images chronologically by EXIF capture date
    #[arg(short, long)]
    pub sort: bool,

    /// Skip the magic-byte image type probe
    #[arg(long)]
    pub no_type_check: bool,

    /// Maximum directory traversal depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Do not overlay date labels on sorted strips
    #[arg(long)]
    pub no_labels: bool,
}

/// Execute the generate command.
pub fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let settings = resolve_settings(&args, &config)?;
    tracing::debug!("Resolved settings: {settings:?}");

    let spinner = create_spinner();
    let start = std::time::Instant::now();

    let report = Pipeline::new(&config, settings).run()?;

    spinner.finish_and_clear();
    print_summary(&report, start.elapsed());

    Ok(())
}

/// Merge CLI arguments over file-config defaults into one immutable
/// snapshot for the run.
fn resolve_settings(args: &GenerateArgs, config: &Config) -> anyhow::Result<RunSettings> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("_barcode.png"));

    // Explicit -f wins, then the output extension, then the config default.
    let format = match args.format {
        Some(format) => format,
        None => output
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse::<OutputFormat>().ok())
            .unwrap_or(config.barcode.format),
    };

    let threads = args.threads.unwrap_or(config.processing.threads);
    if threads == 0 {
        anyhow::bail!("thread count must be at least 1");
    }

    Ok(RunSettings {
        input: args.input.clone(),
        output,
        format,
        threads,
        sort_by_date: args.sort,
        check_types: config.processing.check_types && !args.no_type_check,
        max_depth: args.max_depth,
        date_labels: config.barcode.date_labels && !args.no_labels,
    })
}

/// Create a spinner for the run-to-completion pipeline.
fn create_spinner() -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("reducing images...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}

/// Print a formatted summary block after the run.
fn print_summary(report: &RunReport, elapsed: std::time::Duration) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Discovered:   {:>8}", report.discovered);
    if report.skipped_non_image > 0 {
        eprintln!("    Not images:   {:>8}", report.skipped_non_image);
    }
    if report.missing_timestamp > 0 {
        eprintln!("    No EXIF date: {:>8}", report.missing_timestamp);
    }
    if report.failed > 0 {
        eprintln!("    Failed:       {:>8}", report.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Strip:        {:>4} x {} px", report.columns, report.rows);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    if report.columns > 0 {
        eprintln!("    Output:       {}", report.output.display());
    } else {
        eprintln!("    Output:       (nothing written)");
    }
    eprintln!("  ====================================");

    if report.failed > 0 {
        tracing::warn!(
            "Partial success: {} image(s) failed to decode and were left out of the strip",
            report.failed
        );
    }
}
