//! The sequential batch orchestrator.
//!
//! One logical thread of control per run: the processor is the only writer of
//! its [`BatchResult`], iterates images and regions in order, and polls the
//! cancellation token before each image and each region. Every 5th completed
//! operation yields the thread so a host UI stays responsive. Nothing runs
//! concurrently within a batch; throughput scales with I/O and kernel cost
//! only.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{BatchResult, Region, RegionConfiguration};
use crate::filters::{apply_blur, crop_region, BlurMode, BlurSettings};
use crate::ports::{CancellationToken, CaptureSource, CropWriter, ProgressEvent, ProgressSink};

/// Number of completed operations between cooperative yields.
const YIELD_INTERVAL: usize = 5;

/// Drives a set of source captures through the enabled regions of a
/// configuration, writing each crop into a region-specific folder.
pub struct BatchProcessor<'a> {
    source: &'a dyn CaptureSource,
    writer: &'a dyn CropWriter,
    blur: Option<(i32, BlurMode)>,
}

impl<'a> BatchProcessor<'a> {
    /// Creates a processor over the given capture source and output writer.
    #[must_use]
    pub fn new(source: &'a dyn CaptureSource, writer: &'a dyn CropWriter) -> Self {
        Self {
            source,
            writer,
            blur: None,
        }
    }

    /// Applies a blur to every loaded capture before cropping.
    ///
    /// Settings should come from
    /// [`validate_blur_settings`](crate::filters::validate_blur_settings) so
    /// the intensity is already clamped.
    #[must_use]
    pub fn with_blur(mut self, settings: &BlurSettings) -> Self {
        self.blur = Some((settings.intensity, settings.mode));
        self
    }

    /// Runs every enabled region of `configuration` against every image, in
    /// input order, and returns the finalized [`BatchResult`].
    ///
    /// Recoverable failures (missing file, zero-area crop, per-region write
    /// errors) are recorded and processing continues; they never abort the
    /// batch. An error escaping the per-image scope marks the whole run
    /// `Failed`. Cancellation is honored at the next checkpoint and leaves
    /// the run `Cancelled` without invoking the completion finalizer.
    pub fn process_images(
        &self,
        image_paths: &[PathBuf],
        configuration: &RegionConfiguration,
        output_root: &Path,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancellationToken,
    ) -> BatchResult {
        let enabled: Vec<&Region> = configuration.enabled_regions().collect();
        let total = image_paths.len() * enabled.len();
        let mut result = BatchResult::new(&configuration.name, total);

        info!(
            "Starting batch '{}': {} images x {} regions = {} operations",
            configuration.name,
            image_paths.len(),
            enabled.len(),
            total
        );

        match self.run(image_paths, &enabled, output_root, progress, cancel, &mut result) {
            Ok(()) => {
                if !result.cancelled {
                    result.mark_completed();
                }
            }
            Err(e) => {
                warn!("Batch '{}' aborted: {e:#}", configuration.name);
                result.mark_failed(format!("Batch aborted: {e:#}"));
            }
        }

        info!("{}", result.summary());
        result
    }

    /// The per-image/per-region loop. Returns `Err` only for unrecoverable
    /// failures; cancellation returns `Ok` with the result already marked.
    fn run(
        &self,
        image_paths: &[PathBuf],
        enabled: &[&Region],
        output_root: &Path,
        progress: Option<&dyn ProgressSink>,
        cancel: &CancellationToken,
        result: &mut BatchResult,
    ) -> anyhow::Result<()> {
        let total = result.total_operations;
        let mut completed = 0usize;

        'images: for path in image_paths {
            if cancel.is_cancelled() {
                result.mark_cancelled();
                break;
            }

            let source_name = file_name_of(path);

            if !self.source.exists(path) {
                // The unreached region operations stay in the denominator;
                // progress under-counts on this path by design.
                result.record_error(&source_name, "file not found");
                continue;
            }

            let mut image = match self.source.load(path) {
                Ok(img) => img,
                Err(e) => {
                    result.record_error(&source_name, format!("failed to load: {e:#}"));
                    continue;
                }
            };

            if let Some((intensity, mode)) = self.blur {
                match apply_blur(&image, intensity, mode) {
                    Ok(blurred) => image = blurred,
                    Err(e) => {
                        result.record_error(&source_name, format!("blur failed: {e:#}"));
                        continue;
                    }
                }
            }

            for region in enabled {
                if cancel.is_cancelled() {
                    result.mark_cancelled();
                    break 'images;
                }

                let folder = region.folder_name();
                let dir = output_root.join(&folder);
                self.writer.ensure_dir(&dir)?;
                let dest = dir.join(destination_name(path, &folder));

                let description = match crop_region(&image, region) {
                    None => {
                        result.record_error(
                            &source_name,
                            format!("region '{}' yields no crop for this capture", region.name),
                        );
                        format!("No crop for region '{}'", region.name)
                    }
                    Some(cropped) => {
                        if self.writer.exists(&dest) {
                            debug!("Skipping existing output {}", dest.display());
                            result.record_skip(
                                &source_name,
                                format!("{} already exists", dest.display()),
                            );
                            format!("Skipped region '{}' (exists)", region.name)
                        } else {
                            match self.writer.write(&cropped, &dest) {
                                Ok(()) => {
                                    result.record_processed();
                                    format!("Wrote region '{}'", region.name)
                                }
                                Err(e) => {
                                    result.record_error(
                                        &source_name,
                                        format!("failed to write {}: {e:#}", dest.display()),
                                    );
                                    format!("Failed region '{}'", region.name)
                                }
                            }
                        }
                    }
                };

                completed += 1;
                if let Some(sink) = progress {
                    sink.on_event(ProgressEvent {
                        index: completed,
                        total,
                        source: source_name.clone(),
                        description,
                    });
                }
                if completed % YIELD_INTERVAL == 0 {
                    std::thread::yield_now();
                }
            }
        }

        Ok(())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Destination file name: `originalName_<folder>.ext`, keeping the source
/// extension (the writer picks the encoding from it). Extension-less sources
/// get `.png`.
fn destination_name(path: &Path, folder: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{folder}.{ext}"),
        None => format!("{stem}_{folder}.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_name_with_extension() {
        assert_eq!(
            destination_name(Path::new("/caps/shot1.png"), "Left"),
            "shot1_Left.png"
        );
    }

    #[test]
    fn test_destination_name_without_extension() {
        assert_eq!(
            destination_name(Path::new("/caps/shot1"), "Left"),
            "shot1_Left.png"
        );
    }

    #[test]
    fn test_destination_name_sanitized_folder() {
        assert_eq!(
            destination_name(Path::new("shot.jpg"), "A_B"),
            "shot_A_B.jpg"
        );
    }
}
