//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for model communication,
//! allowing the GenAI-backed client and the scripted mock to be used
//! interchangeably by the pipeline stages.

mod client;
mod error;
mod genai_client;
mod mock;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use genai_client::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
