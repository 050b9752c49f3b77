use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;

/// A chat-completion backend used by the assessment stages
///
/// One call per stage; failures come back per call as [`BackendError`] and are
/// never accumulated on the client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Sends `request` and waits for the complete reply
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    /// Short backend identifier used in logs
    fn name(&self) -> &str;

    /// Model identifier, when the backend is bound to one
    fn model_info(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;
    use std::time::Duration;

    struct EchoClient;

    #[async_trait]
    impl LLMClient for EchoClient {
        async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
            let prompt = request
                .messages
                .last()
                .map(|message| message.content.clone())
                .ok_or_else(|| BackendError::Other {
                    message: "empty conversation".to_string(),
                })?;
            Ok(LLMResponse::text(prompt, "echo", Duration::from_millis(1)))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let client: Box<dyn LLMClient> = Box::new(EchoClient);
        assert_eq!(client.name(), "echo");
        assert_eq!(client.model_info(), None);

        let response = client
            .chat(LLMRequest::new(vec![ChatMessage::user("credit report")]))
            .await
            .unwrap();
        assert_eq!(response.content, "credit report");
    }

    #[tokio::test]
    async fn test_errors_are_returned_per_call() {
        let client = EchoClient;
        let error = client.chat(LLMRequest::new(vec![])).await.unwrap_err();
        assert!(matches!(error, BackendError::Other { .. }));

        assert!(client
            .chat(LLMRequest::new(vec![ChatMessage::user("retry")]))
            .await
            .is_ok());
    }
}
