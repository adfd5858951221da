//! Mock implementations of core port traits.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::anyhow;
use image::{DynamicImage, GenericImageView};
use quadrant_core::ports::{
    CancellationToken, CaptureSource, CropWriter, ProgressEvent, ProgressSink,
};

/// Mock capture source backed by an in-memory path map.
#[derive(Default)]
pub struct MockCaptureSource {
    images: HashMap<PathBuf, DynamicImage>,
}

impl MockCaptureSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raster under a path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: DynamicImage) {
        self.images.insert(path.into(), image);
    }
}

impl CaptureSource for MockCaptureSource {
    fn exists(&self, path: &Path) -> bool {
        self.images.contains_key(path)
    }

    fn load(&self, path: &Path) -> anyhow::Result<DynamicImage> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("no mock image at {}", path.display()))
    }
}

/// Mock crop writer recording directories and written files in memory.
///
/// Destinations can be preloaded to simulate prior runs, and individual
/// paths can be failed to exercise recoverable-error handling.
#[derive(Default)]
pub struct MockCropWriter {
    dirs: Mutex<HashSet<PathBuf>>,
    files: Mutex<HashMap<PathBuf, (u32, u32)>>,
    failing_paths: Mutex<HashSet<PathBuf>>,
    fail_ensure_dir: Mutex<bool>,
}

impl MockCropWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a destination as already existing (0x0 placeholder dimensions).
    pub fn preload(&self, path: impl Into<PathBuf>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), (0, 0));
    }

    /// Makes writes to the given path fail.
    pub fn fail_path(&self, path: impl Into<PathBuf>) {
        self.failing_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    /// Makes every `ensure_dir` call fail, to exercise fatal-error handling.
    pub fn fail_ensure_dir(&self) {
        *self
            .fail_ensure_dir
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Returns the written destinations in no particular order.
    #[must_use]
    pub fn written(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Returns the dimensions recorded for a written destination.
    #[must_use]
    pub fn dimensions_of(&self, path: &Path) -> Option<(u32, u32)> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
    }

    /// Returns the directories that were ensured.
    #[must_use]
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl CropWriter for MockCropWriter {
    fn ensure_dir(&self, dir: &Path) -> anyhow::Result<()> {
        if *self
            .fail_ensure_dir
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(anyhow!("mock ensure_dir failure for {}", dir.display()));
        }
        self.dirs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(dir.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn write(&self, image: &DynamicImage, path: &Path) -> anyhow::Result<()> {
        if self
            .failing_paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
        {
            return Err(anyhow!("mock write failure for {}", path.display()));
        }
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), image.dimensions());
        Ok(())
    }
}

/// Mock progress sink capturing events for assertions.
#[derive(Default)]
pub struct MockProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of captured events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Progress sink that requests cancellation after a fixed number of events,
/// for exercising mid-batch cancellation.
pub struct CancelAfterSink {
    token: CancellationToken,
    after: usize,
    seen: Mutex<usize>,
}

impl CancelAfterSink {
    /// Cancels `token` once `after` events have been observed.
    #[must_use]
    pub fn new(token: CancellationToken, after: usize) -> Self {
        Self {
            token,
            after,
            seen: Mutex::new(0),
        }
    }
}

impl ProgressSink for CancelAfterSink {
    fn on_event(&self, _event: ProgressEvent) {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        *seen += 1;
        if *seen >= self.after {
            self.token.cancel();
        }
    }
}
