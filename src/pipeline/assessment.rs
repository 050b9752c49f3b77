//! End-to-end entry point for assessing one document

use std::sync::Arc;

use crate::audit::ExchangeLogger;
use crate::llm::LLMClient;
use crate::output::{aggregate, CombinedOutput};
use crate::progress::ProgressHandler;

use super::config::PipelineConfig;
use super::context::PipelineContext;
use super::error::PipelineError;
use super::orchestrator::PipelineOrchestrator;

/// Runs both stages against one model client and combines their records
pub struct CreditAssessment {
    llm_client: Arc<dyn LLMClient>,
    config: PipelineConfig,
    exchange_log: Arc<ExchangeLogger>,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl CreditAssessment {
    pub fn new(llm_client: Arc<dyn LLMClient>, config: PipelineConfig) -> Self {
        Self {
            llm_client,
            config,
            exchange_log: Arc::new(ExchangeLogger::disabled()),
            progress_handler: None,
        }
    }

    pub fn with_exchange_log(mut self, exchange_log: ExchangeLogger) -> Self {
        self.exchange_log = Arc::new(exchange_log);
        self
    }

    pub fn with_progress_handler(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = Some(handler);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Assesses `document_text`; transport failures abort before anything is combined
    pub async fn run(
        &self,
        document_text: impl Into<String>,
    ) -> Result<CombinedOutput, PipelineError> {
        let mut context = PipelineContext::new(
            self.llm_client.clone(),
            self.exchange_log.clone(),
            self.config.clone(),
            document_text,
        );

        let orchestrator = PipelineOrchestrator::new(self.progress_handler.clone());
        let (risk, decision) = orchestrator.execute(&mut context).await?;

        Ok(aggregate(risk, decision))
    }
}
