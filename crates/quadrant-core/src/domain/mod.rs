//! Core domain types for quadrant processing.

mod batch;
mod configuration;
mod region;

pub use batch::{BatchError, BatchResult, BatchStatus, SkipRecord};
pub use configuration::RegionConfiguration;
pub use region::Region;
