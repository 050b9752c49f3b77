//! Risk assessment record produced by the risk stage

use super::field::{nullable_list, nullable_object, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured risk assessment for one credit report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(default, deserialize_with = "nullable_list")]
    pub applicants: Vec<Applicant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Human-readable report; always present once the record is normalized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RiskMetadata>,

    /// Keys the model emitted beyond the requested schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    #[serde(default, deserialize_with = "nullable_object")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "nullable_object")]
    pub credit_history: CreditHistory,
    #[serde(default, deserialize_with = "nullable_object")]
    pub debt_income_analysis: DebtIncomeAnalysis,
    #[serde(default, deserialize_with = "nullable_object")]
    pub employment_stability: EmploymentStability,
    #[serde(default, deserialize_with = "nullable_object")]
    pub overall_assessment: OverallAssessment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_history: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_utilization: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtIncomeAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_debt: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dti_ratio: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentStability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_employer: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_employed: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub risk_factors: Vec<FieldValue>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub recommendations: Vec<FieldValue>,
}

/// Processing metadata attached after a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMetadata {
    pub analysis_timestamp: String,
    pub agent_role: String,
    pub agent_version: String,
}

/// Applicant name used by the parse-failure stand-in
const PARSE_FAILURE_NAME: &str = "Error Parsing";

impl RiskAssessment {
    /// Stand-in record used when the model output could not be parsed
    ///
    /// `raw_text` is kept as the report so the failing response stays visible
    /// in the written outputs.
    pub fn parse_failure(raw_text: impl Into<String>) -> Self {
        let zero = || Some(FieldValue::from(0));
        let error = || Some(FieldValue::from("Error"));

        Self {
            applicants: vec![Applicant {
                personal_info: PersonalInfo {
                    name: Some(FieldValue::from(PARSE_FAILURE_NAME)),
                    ssn: Some(FieldValue::from("N/A")),
                    address: Some(FieldValue::from("N/A")),
                },
                credit_history: CreditHistory {
                    credit_score: zero(),
                    payment_history: error(),
                    credit_utilization: zero(),
                },
                debt_income_analysis: DebtIncomeAnalysis {
                    monthly_income: zero(),
                    total_debt: zero(),
                    dti_ratio: zero(),
                },
                employment_stability: EmploymentStability {
                    current_employer: error(),
                    years_employed: zero(),
                    employment_type: error(),
                },
                overall_assessment: OverallAssessment {
                    risk_level: error(),
                    risk_factors: vec![FieldValue::from("Failed to parse response")],
                    recommendations: Vec::new(),
                },
            }],
            conclusion: Some(
                "Failed to parse model response. Please check logs for details.".to_string(),
            ),
            text_format: Some(raw_text.into()),
            metadata: None,
            extra: Map::new(),
        }
    }

    /// True when this is the stand-in produced by [`RiskAssessment::parse_failure`]
    ///
    /// Normalized records always carry metadata, the stand-in never does.
    pub fn is_parse_failure(&self) -> bool {
        if self.metadata.is_some() || self.applicants.len() != 1 {
            return false;
        }
        let applicant = &self.applicants[0];
        let has_text = |value: &Option<FieldValue>, expected: &str| {
            value
                .as_ref()
                .map(|v| v.to_string() == expected)
                .unwrap_or(false)
        };
        has_text(&applicant.personal_info.name, PARSE_FAILURE_NAME)
            && has_text(&applicant.overall_assessment.risk_level, "Error")
    }

    /// Applicant names in order, `Applicant` standing in for missing names
    pub fn applicant_names(&self) -> Vec<String> {
        self.applicants
            .iter()
            .map(|applicant| {
                applicant
                    .personal_info
                    .name
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "Applicant".to_string())
            })
            .collect()
    }
}
