//! Region configuration store port.

use crate::domain::RegionConfiguration;

/// Port for loading and persisting region configurations by name.
pub trait ConfigStore: Send + Sync {
    /// Loads a configuration by name, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored document exists but cannot be read.
    fn load(&self, name: &str) -> anyhow::Result<Option<RegionConfiguration>>;

    /// Persists a configuration, replacing any previous document of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&self, configuration: &RegionConfiguration) -> anyhow::Result<()>;

    /// Lists all stored configurations.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated.
    fn list(&self) -> anyhow::Result<Vec<RegionConfiguration>>;
}
