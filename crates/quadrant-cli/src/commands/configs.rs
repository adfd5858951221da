//! Configs command - list stored configurations.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use quadrant_adapters::JsonConfigStore;
use quadrant_core::ConfigStore;

use crate::config::{resolve_config_dir, AppConfig};

/// Arguments for the configs command.
#[derive(Args)]
pub struct ConfigsArgs {
    /// Directory holding stored configurations (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

/// Run the configs command.
pub fn run(args: &ConfigsArgs, app: &AppConfig) -> Result<()> {
    let config_dir = resolve_config_dir(args.config_dir.as_deref(), app)?;
    let store = JsonConfigStore::new(&config_dir);

    let configurations = store.list()?;

    println!("Configurations directory: {}", config_dir.display());
    println!();

    if configurations.is_empty() {
        println!("  (none; run `quadrant init` to create one)");
        return Ok(());
    }

    for configuration in &configurations {
        let enabled = configuration.enabled_regions().count();
        let marker = if configuration.is_valid() { "" } else { " [invalid]" };
        println!(
            "  {} - {}x{}, {} regions ({} enabled){}",
            configuration.name,
            configuration.screen_width,
            configuration.screen_height,
            configuration.regions.len(),
            enabled,
            marker
        );
    }

    println!();
    println!("{} configuration(s)", configurations.len());
    Ok(())
}
