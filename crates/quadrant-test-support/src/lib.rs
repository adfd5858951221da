//! Test support utilities for quadrant.
//!
//! Provides mock ports and synthetic raster builders for testing the
//! processing engine without touching the real filesystem.
//!
//! # Example
//!
//! ```
//! use quadrant_test_support::{MockCaptureSource, SyntheticRasterBuilder};
//!
//! let mut source = MockCaptureSource::new();
//! source.insert("/caps/shot1.png", SyntheticRasterBuilder::checkerboard(64, 64));
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticRasterBuilder;
pub use mocks::{CancelAfterSink, MockCaptureSource, MockCropWriter, MockProgressSink};
