use super::context::PipelineContext;
use super::error::PipelineError;
use super::phase_trait::{PhaseStatus, WorkflowPhase};
use super::phases::{DecisionPhase, RiskPhase};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::records::{LoanDecision, RiskAssessment};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelineOrchestrator {
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self { progress_handler }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    /// Runs the risk phase then the decision phase over `context`
    pub async fn execute(
        &self,
        context: &mut PipelineContext,
    ) -> Result<(RiskAssessment, LoanDecision), PipelineError> {
        let start = Instant::now();
        info!(
            "Starting credit assessment ({} chars of document text)",
            context.document_text.len()
        );
        self.emit(ProgressEvent::Started {
            document_chars: context.document_text.len(),
        });

        let workflow_phases: Vec<Box<dyn WorkflowPhase>> =
            vec![Box::new(RiskPhase), Box::new(DecisionPhase)];

        for phase in workflow_phases {
            let phase_name = phase.name();
            info!("Phase: {}", phase_name);
            self.emit(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            let status = match phase.execute(context).await {
                Ok(status) => status,
                Err(e) => {
                    self.emit(ProgressEvent::Failed {
                        error: e.to_string(),
                    });
                    return Err(e);
                }
            };

            if let PhaseStatus::Fallback(error) = status {
                self.emit(ProgressEvent::PhaseFallback {
                    phase: phase_name.to_string(),
                    error: error.to_string(),
                });
            }

            self.emit(ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });
            debug!("Phase {} complete", phase_name);
        }

        let risk = context.risk.clone().ok_or(PipelineError::MissingInput {
            phase: "PipelineOrchestrator",
            missing: "risk assessment",
        })?;
        let decision = context.decision.clone().ok_or(PipelineError::MissingInput {
            phase: "PipelineOrchestrator",
            missing: "loan decision",
        })?;

        info!("Credit assessment complete");
        self.emit(ProgressEvent::Completed {
            total_time: start.elapsed(),
        });

        Ok((risk, decision))
    }
}
