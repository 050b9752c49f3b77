//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { document_chars } => {
                info!(document_chars, "Starting credit assessment");
            }
            ProgressEvent::PhaseStarted { phase } => {
                info!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseFallback { phase, error } => {
                warn!(phase = %phase, error = %error, "Model output unusable, using fallback record");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                info!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::Completed { total_time } => {
                info!(
                    total_time_ms = total_time.as_millis(),
                    "Credit assessment complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Credit assessment failed");
            }
        }
    }
}
