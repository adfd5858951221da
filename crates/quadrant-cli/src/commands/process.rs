//! Process command - crop captures into configured regions.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadrant_adapters::{collect_captures, FsCaptureSource, FsCropWriter, JsonConfigStore};
use quadrant_core::{
    validate_blur_settings, BatchProcessor, BatchResult, BatchStatus, CancellationToken,
    ConfigStore,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::ExitCode;
use crate::config::{resolve_config_dir, AppConfig};
use crate::output::{ProgressBar, SummaryWriter};

/// Arguments for the process command.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ProcessArgs {
    /// Capture files or directories to process
    pub paths: Vec<PathBuf>,

    /// Name of the stored region configuration
    #[arg(short, long, value_name = "NAME")]
    pub config: String,

    /// Output root directory (one subdirectory per region)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Blur intensity applied before cropping (1-10)
    #[arg(long, value_name = "N")]
    pub blur: Option<i32>,

    /// Blur mode: gaussian, box or motion
    #[arg(long, value_name = "MODE")]
    pub blur_mode: Option<String>,

    /// Print the batch record as JSON instead of the summary line
    #[arg(long)]
    pub json: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory holding stored configurations (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    app: Option<AppConfig>,
}

impl ProcessArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in `run`)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Output root, blur defaults, config dir: CLI > config file
        if args.output.is_none() {
            args.output.clone_from(&config.process.output);
        }
        args.blur = args.blur.or(config.blur.intensity);
        if args.blur_mode.is_none() {
            args.blur_mode.clone_from(&config.blur.mode);
        }
        if args.config_dir.is_none() {
            args.config_dir.clone_from(&config.general.config_dir);
        }

        // Progress: CLI flag wins, then config
        if !args.progress {
            args.progress = config.process.progress.unwrap_or(false);
        }

        args.app = Some(config.clone());
        args
    }
}

/// Result of running the process command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ProcessResult {
    /// Finalized batch record.
    pub batch: BatchResult,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the process command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ProcessArgs) -> Result<ProcessResult> {
    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let app = args.app.clone().unwrap_or_default();
    let config_dir = resolve_config_dir(args.config_dir.as_deref(), &app)?;
    let store = JsonConfigStore::new(&config_dir);

    let configuration = store.load(&args.config)?.with_context(|| {
        format!(
            "Configuration '{}' not found in {}. Run `quadrant init` first.",
            args.config,
            config_dir.display()
        )
    })?;
    if !configuration.is_valid() {
        anyhow::bail!("Configuration '{}' has no usable regions", args.config);
    }

    let captures = collect_captures(&args.paths, args.recursive);
    if captures.is_empty() {
        anyhow::bail!("No captures found under the given paths");
    }
    info!("Processing {} captures", captures.len());

    let output_root = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("output"));

    let source = FsCaptureSource;
    let writer = FsCropWriter;
    let mut processor = BatchProcessor::new(&source, &writer);

    if let Some(intensity) = args.blur {
        let settings =
            validate_blur_settings(intensity, args.blur_mode.as_deref().unwrap_or("gaussian"));
        if let Some(ref warning) = settings.warning {
            eprintln!("warning: {warning}");
        }
        debug!("Blur enabled: {} at intensity {}", settings.mode, settings.intensity);
        processor = processor.with_blur(&settings);
    }

    let total = captures.len() * configuration.enabled_regions().count();
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let bar = ProgressBar::new(total as u64, show_progress);

    let token = CancellationToken::new();
    let mut batch = processor.process_images(&captures, &configuration, &output_root, Some(&bar), &token);

    if let Some((start, end)) = capture_date_range(&captures) {
        batch.set_date_range(start, end);
    }

    bar.finish(batch.summary());

    for error in &batch.errors {
        eprintln!("error: {}: {}", error.source, error.message);
    }

    let summary = SummaryWriter::stdout();
    if args.json {
        summary.write_json(&batch)?;
    } else {
        summary.write_human(&batch)?;
    }

    let exit_code = match batch.status {
        BatchStatus::Failed => ExitCode::BatchFailed,
        BatchStatus::Cancelled => ExitCode::Cancelled,
        _ => ExitCode::Success,
    };

    Ok(ProcessResult {
        batch,
        exit_code,
    })
}

/// Earliest and latest modification time across the capture files.
fn capture_date_range(captures: &[PathBuf]) -> Option<(OffsetDateTime, OffsetDateTime)> {
    let mut range: Option<(OffsetDateTime, OffsetDateTime)> = None;

    for path in captures {
        let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let stamp = OffsetDateTime::from(modified);
        range = Some(match range {
            None => (stamp, stamp),
            Some((start, end)) => (start.min(stamp), end.max(stamp)),
        });
    }

    range
}
