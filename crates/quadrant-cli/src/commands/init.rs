//! Init command - create and store a default grid configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quadrant_adapters::JsonConfigStore;
use quadrant_core::{ConfigStore, RegionConfiguration};

use crate::config::{resolve_config_dir, AppConfig};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Screen width in pixels
    #[arg(long, value_name = "W")]
    pub width: i32,

    /// Screen height in pixels
    #[arg(long, value_name = "H")]
    pub height: i32,

    /// Configuration name
    #[arg(short, long, default_value = "Default")]
    pub name: String,

    /// Overwrite an existing configuration with the same name
    #[arg(long)]
    pub force: bool,

    /// Directory holding stored configurations (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Run the init command.
pub fn run(args: &InitArgs, app: &AppConfig) -> Result<()> {
    if args.width <= 0 || args.height <= 0 {
        anyhow::bail!("Screen dimensions must be positive, got {}x{}", args.width, args.height);
    }

    let config_dir = resolve_config_dir(args.config_dir.as_deref(), app)?;
    let store = JsonConfigStore::new(&config_dir);

    if !args.force && store.load(&args.name)?.is_some() {
        anyhow::bail!(
            "Configuration '{}' already exists in {}. Pass --force to overwrite.",
            args.name,
            config_dir.display()
        );
    }

    let configuration = RegionConfiguration::default_grid(&args.name, args.width, args.height);
    store.save(&configuration)?;

    println!(
        "Created configuration '{}' ({}x{}, {} regions) in {}",
        configuration.name,
        configuration.screen_width,
        configuration.screen_height,
        configuration.regions.len(),
        config_dir.display()
    );
    Ok(())
}
