//! The per-run result that gets persisted

use crate::records::{LoanDecision, RiskAssessment};
use crate::report::{synthesize_decision_report, synthesize_risk_report};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: &str = "1.0";

const SECTION_SEPARATOR: &str = "==================================================";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub timestamp: DateTime<Utc>,
    pub format_version: String,
}

/// Risk assessment and loan decision of one run, stamped once at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedOutput {
    pub risk_analysis: RiskAssessment,
    pub loan_decision: LoanDecision,
    pub metadata: OutputMetadata,
}

impl CombinedOutput {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.metadata.timestamp
    }
}

pub fn aggregate(risk: RiskAssessment, decision: LoanDecision) -> CombinedOutput {
    aggregate_at(risk, decision, Utc::now())
}

pub fn aggregate_at(
    risk: RiskAssessment,
    decision: LoanDecision,
    timestamp: DateTime<Utc>,
) -> CombinedOutput {
    CombinedOutput {
        risk_analysis: risk,
        loan_decision: decision,
        metadata: OutputMetadata {
            timestamp,
            format_version: FORMAT_VERSION.to_string(),
        },
    }
}

/// Renders the human-readable report written to the `.txt` output
///
/// The stray code fence ahead of the separator is part of the established
/// file layout.
pub fn render_text(combined: &CombinedOutput) -> String {
    let risk_text = match &combined.risk_analysis.text_format {
        Some(text) => text.clone(),
        None => synthesize_risk_report(&combined.risk_analysis),
    };
    let decision_text = match &combined.loan_decision.text_format {
        Some(text) => text.clone(),
        None => synthesize_decision_report(&combined.loan_decision),
    };

    let mut out = String::with_capacity(risk_text.len() + decision_text.len() + 128);
    out.push_str("Risk Analysis Results:\n\n");
    out.push_str(&risk_text);
    out.push_str("```\n");
    out.push_str(SECTION_SEPARATOR);
    out.push_str("\n\n");
    out.push_str("Loan Decision:\n\n");
    out.push_str(&decision_text);
    out
}
