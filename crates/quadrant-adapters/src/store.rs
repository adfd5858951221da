//! JSON file-per-configuration store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quadrant_core::domain::RegionConfiguration;
use quadrant_core::ports::ConfigStore;
use tracing::{debug, warn};

/// Stores each [`RegionConfiguration`] as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    dir: PathBuf,
}

impl JsonConfigStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created lazily on the first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_safe_name(name)))
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self, name: &str) -> Result<Option<RegionConfiguration>> {
        let path = self.path_for(name);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read configuration {}", path.display()))
            }
        };
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration {}", path.display()))?;
        Ok(Some(config))
    }

    fn save(&self, configuration: &RegionConfiguration) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create configuration directory {}", self.dir.display())
        })?;

        let path = self.path_for(&configuration.name);
        let json = serde_json::to_string_pretty(configuration)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration {}", path.display()))?;
        debug!("Saved configuration '{}' to {}", configuration.name, path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<RegionConfiguration>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read configuration directory {}", self.dir.display())
                })
            }
        };

        let mut configs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|c| serde_json::from_str(&c).map_err(anyhow::Error::from))
            {
                Ok(config) => configs.push(config),
                Err(e) => warn!("Skipping unreadable configuration {}: {e}", path.display()),
            }
        }
        configs.sort_by(|a: &RegionConfiguration, b: &RegionConfiguration| a.name.cmp(&b.name));
        Ok(configs)
    }
}

/// Replaces path-hostile characters in a configuration name.
fn file_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
