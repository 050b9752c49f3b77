//! YAML workflow configuration
//!
//! A configuration directory may hold three files, each optional:
//!
//! - `config.yaml`: `output.save_format` (list of `text` / `json`)
//! - `agents.yaml`: `risk_agent` and `loan_agent`, each with `role` and `goal`
//! - `tasks.yaml`: `research_credit_report_task` and `loan_assesment_task`,
//!   each with a `description` that replaces the stage's built-in instruction
//!
//! Missing files are logged and fall back to defaults. Unknown keys are ignored.

use crate::output::OutputFormat;
use crate::pipeline::config::{DEFAULT_DECISION_ROLE, DEFAULT_RISK_ROLE};
use crate::pipeline::StageProfile;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const MAIN_CONFIG_FILE: &str = "config.yaml";
pub const AGENTS_FILE: &str = "agents.yaml";
pub const TASKS_FILE: &str = "tasks.yaml";

pub const RISK_AGENT: &str = "risk_agent";
pub const LOAN_AGENT: &str = "loan_agent";
pub const RISK_TASK: &str = "research_credit_report_task";
pub const LOAN_TASK: &str = "loan_assesment_task";

#[derive(Debug, Error)]
pub enum WorkflowConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSettings {
    #[serde(default)]
    pub description: Option<String>,
}

fn default_save_format() -> Vec<String> {
    OutputFormat::all().iter().map(ToString::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_save_format")]
    pub save_format: Vec<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            save_format: default_save_format(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MainConfigFile {
    #[serde(default)]
    output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub output: OutputSettings,
    pub agents: HashMap<String, AgentSettings>,
    pub tasks: HashMap<String, TaskSettings>,
}

impl WorkflowConfig {
    /// Loads and merges the YAML files found in `dir`
    pub fn load(dir: &Path) -> Result<Self, WorkflowConfigError> {
        info!("Loading workflow configuration from {}", dir.display());

        let main: MainConfigFile = load_yaml(&dir.join(MAIN_CONFIG_FILE))?.unwrap_or_default();
        let agents = load_yaml(&dir.join(AGENTS_FILE))?.unwrap_or_default();
        let tasks = load_yaml(&dir.join(TASKS_FILE))?.unwrap_or_default();

        Ok(Self {
            output: main.output,
            agents,
            tasks,
        })
    }

    /// Output formats to write; unknown names are skipped with a warning
    pub fn output_formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        for name in &self.output.save_format {
            match name.parse::<OutputFormat>() {
                Ok(format) if !formats.contains(&format) => formats.push(format),
                Ok(_) => {}
                Err(e) => warn!("{}", e),
            }
        }
        formats
    }

    pub fn risk_profile(&self) -> StageProfile {
        self.profile(RISK_AGENT, RISK_TASK, DEFAULT_RISK_ROLE)
    }

    pub fn decision_profile(&self) -> StageProfile {
        self.profile(LOAN_AGENT, LOAN_TASK, DEFAULT_DECISION_ROLE)
    }

    fn profile(&self, agent: &str, task: &str, default_role: &str) -> StageProfile {
        let role = self
            .agents
            .get(agent)
            .and_then(|settings| settings.role.clone())
            .unwrap_or_else(|| default_role.to_string());

        let mut profile = StageProfile::new(role);
        if let Some(description) = self.tasks.get(task).and_then(|t| t.description.clone()) {
            profile = profile.with_task_description(description);
        }
        profile
    }
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, WorkflowConfigError> {
    if !path.exists() {
        warn!("Configuration file not found: {}", path.display());
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| WorkflowConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        warn!("Configuration file is empty: {}", path.display());
        return Ok(None);
    }

    let value = serde_yaml::from_str(&content).map_err(|source| WorkflowConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded configuration from {}", path.display());
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = WorkflowConfig::load(&dir.path().join("nope")).unwrap();

        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.output_formats(), OutputFormat::all());
        assert_eq!(config.risk_profile(), StageProfile::new("Senior Credit Analyst"));
        assert_eq!(config.decision_profile(), StageProfile::new("Senior Loan Officer"));
    }

    #[test]
    fn test_merges_all_files() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            MAIN_CONFIG_FILE,
            "output:\n  save_format: [json]\n  include_metadata: true\nportkey:\n  enabled: false\n",
        );
        write(
            dir.path(),
            AGENTS_FILE,
            "risk_agent:\n  role: Chief Risk Officer\n  goal: Find risk\n  backstory: Decades of experience\nloan_agent:\n  goal: Decide\n",
        );
        write(
            dir.path(),
            TASKS_FILE,
            "research_credit_report_task:\n  description: Review the report carefully.\n  expected_output: JSON\n",
        );

        let config = WorkflowConfig::load(dir.path()).unwrap();

        assert_eq!(config.output_formats(), vec![OutputFormat::Json]);

        let risk = config.risk_profile();
        assert_eq!(risk.role, "Chief Risk Officer");
        assert_eq!(
            risk.task_description.as_deref(),
            Some("Review the report carefully.")
        );

        let decision = config.decision_profile();
        assert_eq!(decision.role, "Senior Loan Officer");
        assert!(decision.task_description.is_none());
    }

    #[test]
    fn test_unknown_formats_skipped() {
        let config = WorkflowConfig {
            output: OutputSettings {
                save_format: vec!["pdf".into(), "text".into(), "TEXT".into()],
            },
            ..Default::default()
        };
        assert_eq!(config.output_formats(), vec![OutputFormat::Text]);
    }

    #[test]
    fn test_empty_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), AGENTS_FILE, "\n");

        let config = WorkflowConfig::load(dir.path()).unwrap();
        assert!(config.agents.is_empty());
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), TASKS_FILE, "research_credit_report_task: [unclosed");

        let err = WorkflowConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, WorkflowConfigError::Parse { ref path, .. } if path.ends_with(TASKS_FILE)));
    }
}
