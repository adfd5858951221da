//! Filesystem adapters for loading captures and writing crops.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use quadrant_core::ports::{CaptureSource, CropWriter};
use tracing::{debug, warn};

/// Extensions scanned when collecting captures from a directory.
const CAPTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// Fixed JPEG quality for destination encoding.
const JPEG_QUALITY: u8 = 90;

/// Capture source reading screenshots from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCaptureSource;

impl CaptureSource for FsCaptureSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Result<DynamicImage> {
        image::open(path).with_context(|| format!("Failed to open capture: {}", path.display()))
    }
}

/// Crop writer choosing the destination encoding from the file extension.
///
/// `.jpg`/`.jpeg` encode as JPEG at quality 90, `.bmp`/`.gif`/`.tiff` as
/// their named formats, and anything else as PNG data (keeping whatever
/// extension the destination carries). The mapping matches the processed
/// archives already on disk and must not drift.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCropWriter;

impl CropWriter for FsCropWriter {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "jpg" | "jpeg" => {
                let file = fs::File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
                // JPEG has no alpha channel
                image
                    .to_rgb8()
                    .write_with_encoder(encoder)
                    .with_context(|| format!("Failed to encode JPEG {}", path.display()))?;
            }
            "bmp" => save_as(image, path, ImageFormat::Bmp)?,
            "gif" => save_as(image, path, ImageFormat::Gif)?,
            "tiff" => save_as(image, path, ImageFormat::Tiff)?,
            _ => save_as(image, path, ImageFormat::Png)?,
        }
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn save_as(image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    image
        .save_with_format(path, format)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Collects capture files from the given paths, in deterministic order.
///
/// Files are taken as-is when they carry a supported extension; directories
/// are scanned (recursively when asked) with entries sorted by name so batch
/// runs are reproducible.
#[must_use]
pub fn collect_captures(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_capture(path) {
                files.push(path.clone());
            } else {
                warn!("Unsupported file type: {}", path.display());
            }
        } else if path.is_dir() {
            collect_from_dir(path, recursive, &mut files);
        } else {
            // Missing paths are kept: the orchestrator records them as
            // file-not-found errors instead of silently dropping them
            files.push(path.clone());
        }
    }

    files
}

fn collect_from_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_file() && is_supported_capture(&path) {
            files.push(path);
        } else if path.is_dir() && recursive {
            collect_from_dir(&path, recursive, files);
        }
    }
}

/// Checks whether a path has a supported capture extension.
fn is_supported_capture(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| CAPTURE_EXTENSIONS.contains(&e.as_str()))
}
