//! Runtime configuration for creditlens
//!
//! Settings are loaded from environment variables with defaults, then checked
//! with [`CreditLensConfig::validate`]. Agent roles, task descriptions and
//! output formats live in the YAML workflow configuration instead (see
//! [`crate::workflow_config`]).
//!
//! # Environment Variables
//!
//! - `CREDITLENS_PROVIDER`: genai adapter (openai|anthropic|ollama|gemini|xai|groq|...) - default: "openai"
//! - `CREDITLENS_MODEL`: Model name - default: "gpt-4o"
//! - `CREDITLENS_REQUEST_TIMEOUT`: Timeout per model call in seconds - default: "120"
//! - `CREDITLENS_MAX_TOKENS`: Token budget per model call - default: "3000"
//! - `CREDITLENS_OUTPUT_DIR`: Directory for written reports - default: "output"
//! - `CREDITLENS_CONFIG_DIR`: Directory holding the YAML configuration - default: "config"
//! - `CREDITLENS_EXCHANGE_LOG`: JSONL file receiving every prompt/response pair - optional
//! - `CREDITLENS_LOG_LEVEL`: Logging level - default: "info"
//! - `CREDITLENS_API_BASE_URL`: Custom provider endpoint - optional
//!
//! Provider credentials are read by genai from its standard variables
//! (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `OLLAMA_HOST`, ...).
//!
//! # Example
//!
//! ```no_run
//! use creditlens::CreditLensConfig;
//!
//! let config = CreditLensConfig::default();
//! config.validate().expect("Invalid configuration");
//! let client = config.create_client();
//! ```

use crate::llm::GenAIClient;
use crate::pipeline::PipelineConfig;
use crate::workflow_config::WorkflowConfig;
use genai::adapter::AdapterKind;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const DEFAULT_PROVIDER: AdapterKind = AdapterKind::OpenAI;
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_TOKENS: u32 = crate::pipeline::config::DEFAULT_MAX_TOKENS;
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_CONFIG_DIR: &str = "config";

const MAX_TOKENS_LIMIT: u32 = 128_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider: {0}. Valid options: openai, anthropic, ollama, gemini, xai, groq")]
    InvalidProvider(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Parses a genai adapter name such as `openai` or `anthropic`
pub fn parse_provider(s: &str) -> Result<AdapterKind, ConfigError> {
    AdapterKind::from_lower_str(&s.trim().to_lowercase())
        .ok_or_else(|| ConfigError::InvalidProvider(s.to_string()))
}

#[derive(Debug, Clone)]
pub struct CreditLensConfig {
    pub provider: AdapterKind,

    pub model: String,

    /// Upper bound for a single model call
    pub request_timeout_secs: u64,

    pub max_tokens: u32,

    pub output_dir: PathBuf,

    pub config_dir: PathBuf,

    pub exchange_log: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for CreditLensConfig {
    /// Loads from `CREDITLENS_*` environment variables, falling back to defaults
    fn default() -> Self {
        let provider = match env::var("CREDITLENS_PROVIDER") {
            Ok(value) => parse_provider(&value).unwrap_or_else(|e| {
                warn!("{}; using {}", e, DEFAULT_PROVIDER.as_str());
                DEFAULT_PROVIDER
            }),
            Err(_) => DEFAULT_PROVIDER,
        };

        let model = env::var("CREDITLENS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let request_timeout_secs = env::var("CREDITLENS_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_tokens = env::var("CREDITLENS_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let output_dir = env::var("CREDITLENS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let config_dir = env::var("CREDITLENS_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let exchange_log = env::var("CREDITLENS_EXCHANGE_LOG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("CREDITLENS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            provider,
            model,
            request_timeout_secs,
            max_tokens,
            output_dir,
            config_dir,
            exchange_log,
            log_level,
        }
    }
}

impl CreditLensConfig {
    /// Checks numeric ranges and the log level
    ///
    /// Credentials are not checked here; genai reports them on the first call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "Max tokens must be between 1 and {}",
                MAX_TOKENS_LIMIT
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the genai-backed model client for the configured provider
    pub fn create_client(&self) -> Arc<GenAIClient> {
        Arc::new(GenAIClient::new(
            self.provider,
            self.model.clone(),
            self.request_timeout(),
        ))
    }

    /// Stage settings combining these runtime limits with the workflow's agents
    pub fn pipeline_config(&self, workflow: &WorkflowConfig) -> PipelineConfig {
        PipelineConfig::new()
            .with_max_tokens(self.max_tokens)
            .with_risk_profile(workflow.risk_profile())
            .with_decision_profile(workflow.decision_profile())
    }
}

impl fmt::Display for CreditLensConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CreditLens Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider.as_str())?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Tokens: {}", self.max_tokens)?;
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        writeln!(f, "  Config Dir: {}", self.config_dir.display())?;
        if let Some(ref path) = self.exchange_log {
            writeln!(f, "  Exchange Log: {}", path.display())?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ENV_KEYS: &[&str] = &[
        "CREDITLENS_PROVIDER",
        "CREDITLENS_MODEL",
        "CREDITLENS_REQUEST_TIMEOUT",
        "CREDITLENS_MAX_TOKENS",
        "CREDITLENS_OUTPUT_DIR",
        "CREDITLENS_CONFIG_DIR",
        "CREDITLENS_EXCHANGE_LOG",
        "CREDITLENS_LOG_LEVEL",
    ];

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid_config() -> CreditLensConfig {
        CreditLensConfig {
            provider: AdapterKind::OpenAI,
            model: "gpt-4o".to_string(),
            request_timeout_secs: 120,
            max_tokens: 3000,
            output_dir: PathBuf::from("output"),
            config_dir: PathBuf::from("config"),
            exchange_log: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards: Vec<EnvGuard> = ENV_KEYS.iter().map(|key| EnvGuard::unset(key)).collect();

        let config = CreditLensConfig::default();

        assert_eq!(config.provider, AdapterKind::OpenAI);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.max_tokens, 3000);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.config_dir, PathBuf::from("config"));
        assert!(config.exchange_log.is_none());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("CREDITLENS_PROVIDER", "Anthropic"),
            EnvGuard::set("CREDITLENS_MODEL", "claude-3-5-sonnet"),
            EnvGuard::set("CREDITLENS_REQUEST_TIMEOUT", "45"),
            EnvGuard::set("CREDITLENS_MAX_TOKENS", "2000"),
            EnvGuard::set("CREDITLENS_OUTPUT_DIR", "/tmp/reports"),
            EnvGuard::set("CREDITLENS_CONFIG_DIR", "/etc/creditlens"),
            EnvGuard::set("CREDITLENS_EXCHANGE_LOG", "/tmp/exchanges.jsonl"),
            EnvGuard::set("CREDITLENS_LOG_LEVEL", "DEBUG"),
        ];

        let config = CreditLensConfig::default();

        assert_eq!(config.provider, AdapterKind::Anthropic);
        assert_eq!(config.model, "claude-3-5-sonnet");
        assert_eq!(config.request_timeout_secs, 45);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.config_dir, PathBuf::from("/etc/creditlens"));
        assert_eq!(
            config.exchange_log,
            Some(PathBuf::from("/tmp/exchanges.jsonl"))
        );
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unparsable_values_fall_back() {
        let _guards = vec![
            EnvGuard::set("CREDITLENS_PROVIDER", "carrier-pigeon"),
            EnvGuard::set("CREDITLENS_REQUEST_TIMEOUT", "soon"),
            EnvGuard::set("CREDITLENS_EXCHANGE_LOG", "  "),
        ];

        let config = CreditLensConfig::default();

        assert_eq!(config.provider, AdapterKind::OpenAI);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.exchange_log.is_none());
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider("ollama").unwrap(), AdapterKind::Ollama);
        assert_eq!(parse_provider("OpenAI").unwrap(), AdapterKind::OpenAI);
        assert!(matches!(
            parse_provider("invalid"),
            Err(ConfigError::InvalidProvider(_))
        ));
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = valid_config();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 601;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_max_tokens() {
        let mut config = valid_config();
        config.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = valid_config();
        config.log_level = "loud".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level: loud"));
    }

    #[test]
    fn test_pipeline_config_uses_workflow_roles() {
        let mut config = valid_config();
        config.max_tokens = 1234;

        let pipeline = config.pipeline_config(&WorkflowConfig::default());
        assert_eq!(pipeline.max_tokens, 1234);
        assert_eq!(pipeline.temperature, 0.0);
        assert_eq!(pipeline.risk.role, "Senior Credit Analyst");
        assert_eq!(pipeline.decision.role, "Senior Loan Officer");
    }

    #[test]
    fn test_config_display() {
        let mut config = valid_config();
        config.exchange_log = Some(PathBuf::from("/tmp/x.jsonl"));

        let display = format!("{}", config);
        assert!(display.contains("CreditLens Configuration:"));
        assert!(display.contains("Provider: OpenAI"));
        assert!(display.contains("Exchange Log: /tmp/x.jsonl"));
    }
}
