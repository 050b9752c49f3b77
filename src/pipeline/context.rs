//! State handed from one pipeline phase to the next

use std::sync::Arc;

use crate::audit::ExchangeLogger;
use crate::llm::LLMClient;
use crate::records::{LoanDecision, RiskAssessment};

use super::config::PipelineConfig;

pub struct PipelineContext {
    pub llm_client: Arc<dyn LLMClient>,

    /// Receives every prompt/response pair
    pub exchange_log: Arc<ExchangeLogger>,

    pub config: PipelineConfig,

    /// Text of the credit report under assessment
    pub document_text: String,

    /// Set by the risk phase
    pub risk: Option<RiskAssessment>,

    /// Set by the decision phase
    pub decision: Option<LoanDecision>,
}

impl PipelineContext {
    pub fn new(
        llm_client: Arc<dyn LLMClient>,
        exchange_log: Arc<ExchangeLogger>,
        config: PipelineConfig,
        document_text: impl Into<String>,
    ) -> Self {
        Self {
            llm_client,
            exchange_log,
            config,
            document_text: document_text.into(),
            risk: None,
            decision: None,
        }
    }

    /// Context without an exchange log
    pub fn without_exchange_log(
        llm_client: Arc<dyn LLMClient>,
        config: PipelineConfig,
        document_text: impl Into<String>,
    ) -> Self {
        Self::new(
            llm_client,
            Arc::new(ExchangeLogger::disabled()),
            config,
            document_text,
        )
    }
}

impl std::fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineContext")
            .field("llm_client", &self.llm_client.name())
            .field("model", &self.llm_client.model_info())
            .field("config", &self.config)
            .field("document_chars", &self.document_text.len())
            .field("has_risk", &self.risk.is_some())
            .field("has_decision", &self.decision.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLLMClient;

    #[test]
    fn test_context_creation() {
        let context = PipelineContext::without_exchange_log(
            Arc::new(MockLLMClient::new()),
            PipelineConfig::default(),
            "report text",
        );

        assert_eq!(context.document_text, "report text");
        assert!(context.risk.is_none());
        assert!(context.decision.is_none());
        assert!(!context.exchange_log.is_enabled());
    }

    #[test]
    fn test_context_debug_omits_document() {
        let context = PipelineContext::without_exchange_log(
            Arc::new(MockLLMClient::new()),
            PipelineConfig::default(),
            "SSN 123-45-6789",
        );

        let debug = format!("{:?}", context);
        assert!(debug.contains("document_chars: 15"));
        assert!(debug.contains("model: Some(\"mock-model\")"));
        assert!(!debug.contains("123-45-6789"));
    }
}
