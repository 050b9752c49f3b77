//! Loan decision record produced by the decision stage

use super::field::{nullable_list, nullable_object, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured loan decision for every applicant in a risk assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    #[serde(default, deserialize_with = "nullable_list")]
    pub decisions: Vec<Decision>,

    /// Human-readable report; always present once the record is normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DecisionMetadata>,

    /// Keys the model emitted beyond the requested schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable_object")]
    pub decision: DecisionDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DecisionStatus>,
    #[serde(default, deserialize_with = "nullable_object")]
    pub loan_terms: LoanTerms,
    #[serde(default, deserialize_with = "nullable_list")]
    pub conditions: Vec<FieldValue>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub rationale: Vec<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<FieldValue>,
}

/// Decision outcome
///
/// Matching is exact, so `"Approved"` from a sloppy model lands in `Other`
/// and is rendered verbatim without loan terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionStatus {
    Approved,
    Denied,
    Conditional,
    Error,
    Other(String),
}

impl DecisionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DecisionStatus::Approved => "APPROVED",
            DecisionStatus::Denied => "DENIED",
            DecisionStatus::Conditional => "CONDITIONAL",
            DecisionStatus::Error => "ERROR",
            DecisionStatus::Other(raw) => raw,
        }
    }

    /// Loan terms and conditions only carry meaning for these outcomes
    pub fn grants_loan(&self) -> bool {
        matches!(self, DecisionStatus::Approved | DecisionStatus::Conditional)
    }
}

impl From<String> for DecisionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "APPROVED" => DecisionStatus::Approved,
            "DENIED" => DecisionStatus::Denied,
            "CONDITIONAL" => DecisionStatus::Conditional,
            "ERROR" => DecisionStatus::Error,
            _ => DecisionStatus::Other(raw),
        }
    }
}

impl From<DecisionStatus> for String {
    fn from(status: DecisionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to a decision record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionMetadata {
    Decided {
        decision_timestamp: String,
        agent_role: String,
        agent_version: String,
    },
    Failed {
        error: String,
        details: String,
        timestamp: String,
    },
}

impl LoanDecision {
    /// Stand-in record used when the model output could not be parsed
    pub fn parse_failure(
        raw_text: impl Into<String>,
        details: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            decisions: vec![Decision {
                applicant_name: Some(FieldValue::from("Error Parsing")),
                decision: DecisionDetails {
                    status: Some(DecisionStatus::Error),
                    loan_terms: LoanTerms {
                        amount: Some(FieldValue::from(0)),
                        interest_rate: Some(FieldValue::from(0)),
                        term_months: Some(FieldValue::from(0)),
                    },
                    conditions: vec![FieldValue::from("Failed to parse response")],
                    rationale: vec![FieldValue::from("Error in processing decision")],
                },
            }],
            text_format: Some(raw_text.into()),
            metadata: Some(DecisionMetadata::Failed {
                error: "Failed to parse response".to_string(),
                details: details.into(),
                timestamp: timestamp.into(),
            }),
            extra: Map::new(),
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self.metadata, Some(DecisionMetadata::Failed { .. }))
    }
}
