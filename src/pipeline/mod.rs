pub mod assessment;
pub mod config;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod prompt;

pub use assessment::CreditAssessment;
pub use config::{PipelineConfig, StageProfile};
pub use context::PipelineContext;
pub use error::PipelineError;
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::{PhaseStatus, WorkflowPhase};
pub use phases::{run_decision_stage, run_risk_stage, StageOutput};
