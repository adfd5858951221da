//! Capture source port supplying in-memory rasters by path.

use std::path::Path;

use image::DynamicImage;

/// Port for resolving source capture paths into decoded rasters.
pub trait CaptureSource: Send + Sync {
    /// Returns whether a capture exists at the given path.
    fn exists(&self, path: &Path) -> bool;

    /// Loads and decodes the capture at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the capture cannot be read or decoded.
    fn load(&self, path: &Path) -> anyhow::Result<DynamicImage>;
}
