//! Progress reporting port for UI integration.

/// Notification describing one just-completed region operation.
///
/// Transient: emitted once per operation, never buffered or replayed.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// 1-based index of the completed operation.
    pub index: usize,
    /// Total planned operations in the batch.
    pub total: usize,
    /// File name of the current source capture.
    pub source: String,
    /// Human-readable description of the operation outcome.
    pub description: String,
}

/// Port for receiving progress events.
///
/// Invoked synchronously on the orchestrator's thread; a slow implementation
/// throttles the whole batch.
pub trait ProgressSink: Send + Sync {
    /// Called after every completed operation.
    fn on_event(&self, event: ProgressEvent);
}
