//! Batch run accumulator and its bookkeeping records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle state of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Created but not yet started.
    Pending,
    /// Currently processing.
    Running,
    /// Finished every planned operation.
    Completed,
    /// Aborted by an unrecoverable error.
    Failed,
    /// Stopped at a cancellation checkpoint.
    Cancelled,
}

/// A recoverable per-operation failure, attributed to its source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// When the failure was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Source file the failure is attributed to.
    pub source: String,
    /// Human-readable message.
    pub message: String,
}

/// A non-error skip: the destination already existed and was left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipRecord {
    /// Source file of the skipped operation.
    pub source: String,
    /// Why the operation was skipped.
    pub reason: String,
}

/// Accumulator produced by one orchestrator run.
///
/// Created at orchestration start, mutated only by the orchestrator for the
/// duration of the run, finalized exactly once, never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Run identifier.
    pub id: String,
    /// When the run started.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// When the run was finalized, if it has been.
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    /// Lifecycle state.
    pub status: BatchStatus,
    /// Planned operations: image count x enabled-region count.
    pub total_operations: usize,
    /// Operations that produced a new output file.
    pub processed: usize,
    /// Operations skipped because the output already existed.
    pub skipped: usize,
    /// Operations (or source files) that failed recoverably.
    pub failed: usize,
    /// Recoverable failures in the order they occurred.
    pub errors: Vec<BatchError>,
    /// Skips in the order they occurred.
    pub skips: Vec<SkipRecord>,
    /// Name of the configuration that produced the run.
    pub configuration: String,
    /// Start of the capture date range covered by the run, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub range_start: Option<OffsetDateTime>,
    /// End of the capture date range covered by the run, if known.
    #[serde(with = "time::serde::rfc3339::option")]
    pub range_end: Option<OffsetDateTime>,
    /// Whether cancellation was honored during the run.
    pub cancelled: bool,
}

impl BatchResult {
    /// Creates a running result seeded with the planned operation count.
    #[must_use]
    pub fn new(configuration: impl Into<String>, total_operations: usize) -> Self {
        let started_at = OffsetDateTime::now_utc();
        Self {
            id: format!("batch-{}", started_at.unix_timestamp_nanos()),
            started_at,
            ended_at: None,
            status: BatchStatus::Running,
            total_operations,
            processed: 0,
            skipped: 0,
            failed: 0,
            errors: Vec::new(),
            skips: Vec::new(),
            configuration: configuration.into(),
            range_start: None,
            range_end: None,
            cancelled: false,
        }
    }

    /// Sets the capture date range covered by this run.
    pub fn set_date_range(&mut self, start: OffsetDateTime, end: OffsetDateTime) {
        self.range_start = Some(start);
        self.range_end = Some(end);
    }

    /// Records a recoverable failure attributed to `source`.
    pub fn record_error(&mut self, source: &str, message: impl Into<String>) {
        self.errors.push(BatchError {
            timestamp: OffsetDateTime::now_utc(),
            source: source.to_string(),
            message: message.into(),
        });
        self.failed += 1;
    }

    /// Records a skip (destination already exists).
    pub fn record_skip(&mut self, source: &str, reason: impl Into<String>) {
        self.skips.push(SkipRecord {
            source: source.to_string(),
            reason: reason.into(),
        });
        self.skipped += 1;
    }

    /// Records a successfully written output.
    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    /// Finalizes the run as completed.
    pub fn mark_completed(&mut self) {
        self.status = BatchStatus::Completed;
        self.ended_at = Some(OffsetDateTime::now_utc());
    }

    /// Finalizes the run as failed with a summary message.
    ///
    /// The message is appended to the error list but does not count as a
    /// failed operation.
    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.errors.push(BatchError {
            timestamp: OffsetDateTime::now_utc(),
            source: "batch".to_string(),
            message: message.into(),
        });
        self.status = BatchStatus::Failed;
        self.ended_at = Some(OffsetDateTime::now_utc());
    }

    /// Finalizes the run as cancelled.
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
        self.status = BatchStatus::Cancelled;
        self.ended_at = Some(OffsetDateTime::now_utc());
    }

    /// Completion percentage over the planned operation count.
    ///
    /// A missing source file records one error while its unreached region
    /// operations stay in the denominator, so runs with missing files finish
    /// below 100. Kept for compatibility with historical batch records.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        if self.total_operations == 0 {
            return 0.0;
        }
        (self.processed + self.skipped + self.failed) as f64 / self.total_operations as f64 * 100.0
    }

    /// Elapsed duration: end (or now, while running) minus start.
    #[must_use]
    pub fn elapsed(&self) -> time::Duration {
        self.ended_at.unwrap_or_else(OffsetDateTime::now_utc) - self.started_at
    }

    /// One-line human-readable outcome.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Processed: {}, Skipped: {}, Errors: {} (Total: {}) in {}s",
            self.processed,
            self.skipped,
            self.errors.len(),
            self.total_operations,
            self.elapsed().whole_seconds()
        )
    }
}
