//! Structured records exchanged between the pipeline stages
//!
//! Every field a model is asked for is optional at the type level; renderers
//! substitute `N/A` explicitly when reading.

mod decision;
mod field;
mod risk;

pub use decision::{
    Decision, DecisionDetails, DecisionMetadata, DecisionStatus, LoanDecision, LoanTerms,
};
pub use field::{display_or_missing, FieldValue, MISSING};
pub use risk::{
    Applicant, CreditHistory, DebtIncomeAnalysis, EmploymentStability, OverallAssessment,
    PersonalInfo, RiskAssessment, RiskMetadata,
};

/// Version tag written into every stage's metadata
pub const AGENT_VERSION: &str = "1.0.0";
