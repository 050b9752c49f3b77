use super::context::PipelineContext;
use super::error::PipelineError;
use crate::response::ParseError;
use async_trait::async_trait;

/// How a phase obtained its record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseStatus {
    Parsed,
    /// The model answered but its output was unusable; a sentinel record was stored
    Fallback(ParseError),
}

#[async_trait]
pub trait WorkflowPhase: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, context: &mut PipelineContext) -> Result<PhaseStatus, PipelineError>;
}
