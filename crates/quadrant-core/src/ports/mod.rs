//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the processing engine and its
//! external collaborators: the capture source, the output writer, the
//! configuration store, and the progress-consuming caller.

mod cancel;
mod capture_source;
mod config_store;
mod crop_writer;
mod progress;

pub use cancel::CancellationToken;
pub use capture_source::CaptureSource;
pub use config_store::ConfigStore;
pub use crop_writer::CropWriter;
pub use progress::{ProgressEvent, ProgressSink};
