use super::llm_helper::{query_stage, StageOutput};
use crate::audit::ExchangeLogger;
use crate::llm::LLMClient;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::context::PipelineContext;
use crate::pipeline::error::PipelineError;
use crate::pipeline::phase_trait::{PhaseStatus, WorkflowPhase};
use crate::pipeline::prompt::build_risk_prompt;
use crate::records::RiskAssessment;
use async_trait::async_trait;
use tracing::info;

const PHASE: &str = "RiskPhase";

/// Asks the model for a risk assessment of `document_text`
///
/// Unusable model output yields the sentinel from
/// [`RiskAssessment::parse_failure`] carrying the raw reply as its report.
pub async fn run_risk_stage(
    llm_client: &dyn LLMClient,
    document_text: &str,
    config: &PipelineConfig,
    exchange_log: &ExchangeLogger,
) -> Result<StageOutput<RiskAssessment>, PipelineError> {
    let profile = &config.risk;
    let prompt = build_risk_prompt(profile, document_text);

    let output = match query_stage::<RiskAssessment>(
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
            info!(
                "Risk analysis complete for {} applicant(s)",
                record.applicants.len()
            );
            StageOutput {
                record,
                fallback: None,
            }
        }
        Err((raw_text, error)) => StageOutput {
            record: RiskAssessment::parse_failure(raw_text),
            fallback: Some(error),
        },
    };

    Ok(output)
}

pub struct RiskPhase;

#[async_trait]
impl WorkflowPhase for RiskPhase {
    fn name(&self) -> &'static str {
        PHASE
    }

    async fn execute(&self, context: &mut PipelineContext) -> Result<PhaseStatus, PipelineError> {
        let output = run_risk_stage(
            context.llm_client.as_ref(),
            &context.document_text,
            &context.config,
            &context.exchange_log,
        )
        .await?;

        context.risk = Some(output.record);
        Ok(match output.fallback {
            Some(error) => PhaseStatus::Fallback(error),
            None => PhaseStatus::Parsed,
        })
    }
}
