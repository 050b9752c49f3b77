use super::llm_helper::{query_stage, StageOutput};
use crate::audit::ExchangeLogger;
use crate::llm::LLMClient;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::error::PipelineError;
use crate::pipeline::phase_trait::{PhaseStatus, WorkflowPhase};
use crate::pipeline::prompt::build_decision_prompt;
use crate::records::{LoanDecision, RiskAssessment};
use crate::response::format_timestamp;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

const PHASE: &str = "DecisionPhase";

/// Asks the model for a loan decision on every applicant in `risk`
pub async fn run_decision_stage(
    llm_client: &dyn LLMClient,
    risk: &RiskAssessment,
    config: &PipelineConfig,
    exchange_log: &ExchangeLogger,
) -> Result<StageOutput<LoanDecision>, PipelineError> {
    let profile = &config.decision;
    let prompt = build_decision_prompt(profile, risk);

    let output = match query_stage::<LoanDecision>(
        llm_client,
        prompt,
        config,
        PHASE,
        &profile.role,
        exchange_log,
    )
    .await?
    {
        Ok(record) => {
            info!("Loan decision complete for {} applicant(s)", record.decisions.len());
            StageOutput {
                record,
                fallback: None,
            }
        }
        Err((raw_text, error)) => {
            let details = error.to_string();
            StageOutput {
                record: LoanDecision::parse_failure(
                    raw_text,
                    details,
                    format_timestamp(&Utc::now()),
                ),
                fallback: Some(error),
            }
        }
    };

    Ok(output)
}

pub struct DecisionPhase;

#[async_trait]
impl WorkflowPhase for DecisionPhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    async fn execute(&self, context: &mut PipelineContext) -> Result<PhaseStatus, PipelineError> {
        let risk = context.risk.as_ref().ok_or(PipelineError::MissingInput {
            phase: PHASE,
            missing: "risk assessment",
        })?;

        let output = run_decision_stage(
            context.llm_client.as_ref(),
            risk,
            &context.config,
            &context.exchange_log,
        )
        .await?;

        context.decision = Some(output.record);
        Ok(match output.fallback {
            Some(error) => PhaseStatus::Fallback(error),
            None => PhaseStatus::Parsed,
        })
    }
}
