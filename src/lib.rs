//! creditlens - credit report risk analysis and loan decisions
//!
//! This library runs a two-stage assessment over the text of a credit report:
//! a language model first produces a structured risk assessment, then a loan
//! decision based on that assessment. Both records are combined and written
//! as a human-readable report and a JSON record.
//!
//! # Core Concepts
//!
//! - **Stage records**: [`RiskAssessment`] and [`LoanDecision`], lenient
//!   structures in which every model-provided field is optional
//! - **Response handling**: locating the JSON payload in free-form model text,
//!   validating it, attaching metadata and synthesizing a text report when the
//!   model did not include one
//! - **Sentinel records**: unusable model output never aborts a run; the stage
//!   substitutes a record that carries the raw reply for diagnosis
//!
//! # Example Usage
//!
//! ```ignore
//! use creditlens::{CreditAssessment, CreditLensConfig, OutputWriter, WorkflowConfig};
//!
//! async fn assess(document_text: String) -> anyhow::Result<()> {
//!     let config = CreditLensConfig::default();
//!     config.validate()?;
//!     let workflow = WorkflowConfig::load(&config.config_dir)?;
//!
//!     let assessment =
//!         CreditAssessment::new(config.create_client(), config.pipeline_config(&workflow));
//!     let combined = assessment.run(document_text).await?;
//!
//!     let written = OutputWriter::new(&config.output_dir).write(&combined)?;
//!     println!("{:?}", written);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`response`]: payload extraction and normalization
//! - [`report`]: deterministic text reports
//! - [`pipeline`]: the two model-backed stages and their orchestration
//! - [`output`]: combined results and their on-disk layout
//! - [`llm`]: model client abstraction, genai client and mock client

pub mod audit;
pub mod cli;
pub mod config;
pub mod document;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod records;
pub mod report;
pub mod response;
pub mod util;
pub mod workflow_config;

pub use config::{ConfigError, CreditLensConfig};
pub use document::{find_document, read_document_text, DocumentError};
pub use llm::{BackendError, GenAIClient, LLMClient, MockLLMClient};
pub use output::{aggregate, render_text, CombinedOutput, OutputError, OutputWriter};
pub use pipeline::{CreditAssessment, PipelineConfig, PipelineError};
pub use records::{LoanDecision, RiskAssessment};
pub use report::{synthesize_decision_report, synthesize_risk_report};
pub use response::{extract_json, parse_and_normalize, ParseError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};
pub use workflow_config::{WorkflowConfig, WorkflowConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_creditlens() {
        assert_eq!(NAME, "creditlens");
    }
}
