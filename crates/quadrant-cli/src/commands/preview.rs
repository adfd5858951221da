//! Preview command - render a region overlay onto a capture.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quadrant_adapters::{FsCaptureSource, FsCropWriter, JsonConfigStore};
use quadrant_core::{render_preview, CaptureSource, ConfigStore, CropWriter};

use crate::config::{resolve_config_dir, AppConfig};

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Capture file to render the overlay onto
    pub image: PathBuf,

    /// Name of the stored region configuration
    #[arg(short, long, value_name = "NAME")]
    pub config: String,

    /// Draw region names and dimensions
    #[arg(short, long)]
    pub labels: bool,

    /// Output file (defaults to `<image>_preview.png`)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory holding stored configurations (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Run the preview command.
pub fn run(args: &PreviewArgs, app: &AppConfig) -> Result<()> {
    let config_dir = resolve_config_dir(args.config_dir.as_deref(), app)?;
    let store = JsonConfigStore::new(&config_dir);

    let configuration = store
        .load(&args.config)?
        .with_context(|| format!("Configuration '{}' not found", args.config))?;

    let source = FsCaptureSource;
    let image = source.load(&args.image)?;

    let rendered = render_preview(&image, &configuration, args.labels);

    let destination = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.image));
    FsCropWriter.write(&rendered, &destination)?;

    println!("Wrote preview to {}", destination.display());
    Ok(())
}

/// `shot.png` becomes `shot_preview.png` next to the input.
fn default_output(image: &PathBuf) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("preview");
    image.with_file_name(format!("{stem}_preview.png"))
}
