//! Progress handler trait and events

use std::time::Duration;

/// Events emitted while an assessment runs
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Assessment started on a document of the given size
    Started { document_chars: usize },

    /// A pipeline phase started
    PhaseStarted { phase: String },

    /// A phase could not parse the model output and fell back to its sentinel record
    PhaseFallback { phase: String, error: String },

    /// A pipeline phase completed
    PhaseComplete { phase: String, duration: Duration },

    /// Both phases completed
    Completed { total_time: Duration },

    /// The assessment was aborted
    Failed { error: String },
}

/// Trait for handling progress events during an assessment
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
