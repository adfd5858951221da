//! Quadrant Adapters - Filesystem adapters for the processing engine.
//!
//! This crate provides:
//! - A capture source that decodes screenshots from disk
//! - A crop writer with extension-driven encoding and idempotent writes
//! - A JSON file-per-configuration store

pub mod fs;
pub mod store;

pub use fs::{collect_captures, FsCaptureSource, FsCropWriter};
pub use store::JsonConfigStore;
