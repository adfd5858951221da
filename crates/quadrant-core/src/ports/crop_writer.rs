//! Output writer port for persisting region crops.

use std::path::Path;

use image::DynamicImage;

/// Port for writing region crops to their destination.
pub trait CropWriter: Send + Sync {
    /// Ensures the output directory for a region exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created. The orchestrator
    /// treats this as fatal for the whole batch.
    fn ensure_dir(&self, dir: &Path) -> anyhow::Result<()>;

    /// Returns whether a destination file already exists.
    fn exists(&self, path: &Path) -> bool;

    /// Encodes and writes a crop to the destination path.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write(&self, image: &DynamicImage, path: &Path) -> anyhow::Result<()>;
}
