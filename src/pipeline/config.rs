/// Token budget for every stage's model call
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

pub const DEFAULT_RISK_ROLE: &str = "Senior Credit Analyst";
pub const DEFAULT_DECISION_ROLE: &str = "Senior Loan Officer";

/// Who a stage speaks as and what it is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProfile {
    pub role: String,
    /// Replaces the stage's built-in instruction when set
    pub task_description: Option<String>,
}

impl StageProfile {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            task_description: None,
        }
    }

    pub fn with_task_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub risk: StageProfile,
    pub decision: StageProfile,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            risk: StageProfile::new(DEFAULT_RISK_ROLE),
            decision: StageProfile::new(DEFAULT_DECISION_ROLE),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_risk_profile(mut self, profile: StageProfile) -> Self {
        self.risk = profile;
        self
    }

    pub fn with_decision_profile(mut self, profile: StageProfile) -> Self {
        self.decision = profile;
        self
    }
}
