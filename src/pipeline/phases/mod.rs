//! Model-backed stages of a credit assessment
//!
//! Each stage builds its prompt, queries the model once and falls back to a
//! sentinel record when the reply cannot be parsed.

pub mod llm_helper;

#[path = "01_risk.rs"]
pub mod risk;
#[path = "02_decision.rs"]
pub mod decision;

pub use decision::{run_decision_stage, DecisionPhase};
pub use llm_helper::StageOutput;
pub use risk::{run_risk_stage, RiskPhase};
