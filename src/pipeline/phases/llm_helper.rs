use crate::audit::ExchangeLogger;
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::error::PipelineError;
use crate::response::{parse_response, ParseError, StageRecord};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error};

/// Record produced by one stage, plus the parse error when it is a sentinel
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput<R> {
    pub record: R,
    pub fallback: Option<ParseError>,
}

impl<R> StageOutput<R> {
    pub fn into_record(self) -> R {
        self.record
    }
}

/// Sends one prompt and parses the reply into `R`
///
/// Transport failures abort with [`PipelineError::Transport`]. Unusable output
/// comes back as `Err((raw_text, parse_error))` inside `Ok` so the caller can
/// build its sentinel record.
pub async fn query_stage<R: StageRecord>(
    llm_client: &dyn LLMClient,
    prompt: String,
    config: &PipelineConfig,
    phase: &'static str,
    role: &str,
    exchange_log: &ExchangeLogger,
) -> Result<Result<R, (String, ParseError)>, PipelineError> {
    let start = Instant::now();

    let request = LLMRequest::new(vec![ChatMessage::user(prompt)])
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

    let response = llm_client
        .chat(request.clone())
        .await
        .map_err(|source| PipelineError::Transport { phase, source })?;

    let latency_ms = start.elapsed().as_millis() as u64;
    exchange_log.log_exchange(phase, &request, &response, latency_ms);
    debug!(
        "{} response from {} ({} chars, {} ms)",
        phase,
        response.model_used,
        response.content.len(),
        latency_ms
    );

    match parse_response::<R>(&response.content, role, Utc::now()) {
        Ok(record) => Ok(Ok(record)),
        Err(e) => {
            error!("Failed to parse {} response: {}", phase, e);
            Ok(Err((response.content, e)))
        }
    }
}
