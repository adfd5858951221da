//! Configuration file support for quadrant.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/quadrant/config.toml` (lowest priority)
//! - Project-local: `.quadrant.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Batch processing defaults.
    pub process: ProcessConfig,
    /// Default blur applied before cropping.
    pub blur: BlurConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Directory holding stored region configurations.
    pub config_dir: Option<PathBuf>,
}

/// Batch processing defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Default output root directory.
    pub output: Option<PathBuf>,
    /// Show a progress bar by default.
    pub progress: Option<bool>,
}

/// Blur defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Blur intensity (1-10).
    pub intensity: Option<i32>,
    /// Blur mode: "gaussian", "box" or "motion".
    pub mode: Option<String>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/quadrant/config.toml`
    /// 2. Project-local: `.quadrant.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(i) = self.blur.intensity {
            if !(1..=10).contains(&i) {
                return Err(format!("blur.intensity must be 1-10, got {i}"));
            }
        }

        if let Some(ref m) = self.blur.mode {
            if m != "gaussian" && m != "box" && m != "motion" {
                return Err(format!(
                    "blur.mode must be 'gaussian', 'box' or 'motion', got '{m}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);
        self.general.config_dir = other
            .general
            .config_dir
            .or_else(|| self.general.config_dir.take());

        // Process
        self.process.output = other.process.output.or_else(|| self.process.output.take());
        self.process.progress = other.process.progress.or(self.process.progress);

        // Blur
        self.blur.intensity = other.blur.intensity.or(self.blur.intensity);
        self.blur.mode = other.blur.mode.or_else(|| self.blur.mode.take());
    }
}

/// Resolve the region-configuration directory.
///
/// Priority: CLI flag, config file, then `~/.config/quadrant/configs`.
pub fn resolve_config_dir(cli_dir: Option<&Path>, config: &AppConfig) -> Result<PathBuf> {
    if let Some(dir) = cli_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(ref dir) = config.general.config_dir {
        return Ok(dir.clone());
    }
    dirs::config_dir()
        .map(|d| d.join("quadrant").join("configs"))
        .context("No configuration directory available; pass --config-dir")
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quadrant").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.quadrant.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".quadrant.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
