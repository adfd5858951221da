//! Batch orchestration: many captures through many regions, sequentially.

mod processor;

pub use processor::BatchProcessor;
