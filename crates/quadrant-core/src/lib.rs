//! Quadrant Core - Region model and image processing engine
//!
//! This crate contains the domain types for screen regions and batch runs,
//! the pixel-level blur and crop filters, the preview overlay renderer, and
//! the sequential batch orchestrator that drives many captures through many
//! regions.

pub mod batch;
pub mod domain;
pub mod filters;
pub mod ports;

pub use batch::BatchProcessor;
pub use domain::{BatchError, BatchResult, BatchStatus, Region, RegionConfiguration, SkipRecord};
pub use filters::{
    apply_blur, crop_region, render_preview, validate_blur_settings, BlurMode, BlurSettings,
};
pub use ports::{
    CancellationToken, CaptureSource, ConfigStore, CropWriter, ProgressEvent, ProgressSink,
};
