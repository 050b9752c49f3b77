//! Prompt templates for the two model-backed stages

use super::config::StageProfile;
use crate::records::RiskAssessment;

pub const DEFAULT_RISK_INSTRUCTION: &str = "Analyze the credit report and provide a risk assessment in JSON format. \
Include credit history, DTI ratio, employment stability, and other risk factors.";

pub const DEFAULT_DECISION_INSTRUCTION: &str = "Based on the risk factors, provide a loan decision. \
Include approval status, loan terms, and detailed rationale.";

const RISK_SCHEMA: &str = r#"{"applicants": [{"personal_info": {"name": "str", "ssn": "str", "address": "str"}, "credit_history": {"credit_score": "int", "payment_history": "str", "credit_utilization": "float"}, "debt_income_analysis": {"monthly_income": "float", "total_debt": "float", "dti_ratio": "float"}, "employment_stability": {"current_employer": "str", "years_employed": "float", "employment_type": "str"}, "overall_assessment": {"risk_level": "str", "risk_factors": ["str"], "recommendations": ["str"]}}], "conclusion": "str", "text_format": "str" }"#;

pub fn build_risk_prompt(profile: &StageProfile, document_text: &str) -> String {
    let instruction = profile
        .task_description
        .as_deref()
        .unwrap_or(DEFAULT_RISK_INSTRUCTION);

    format!(
        "As a {role}, {instruction}\n\n\
Credit Report Content: {document_text}\n\n\
Format your response in a way that will be displayed in a text file called 'credit_report_langgraph_timestamp.txt'. \
The report should be well-structured with headings and sections, following this format: \
1. Start with '**Comprehensive Credit Report Analysis**' \
2. Include sections for Personal Information, Credit History, Debt-Income Analysis, Employment Stability, and Overall Risk Assessment \
3. Conclude with an overall assessment paragraph\n\n\
Return a JSON object that contains all this formatted information with this structure:\n\
{schema}",
        role = profile.role,
        instruction = instruction,
        document_text = document_text,
        schema = RISK_SCHEMA,
    )
}

pub fn build_decision_prompt(profile: &StageProfile, risk: &RiskAssessment) -> String {
    let instruction = profile
        .task_description
        .as_deref()
        .unwrap_or(DEFAULT_DECISION_INSTRUCTION);

    let names = risk.applicant_names();
    let applicant_name = if names.is_empty() {
        "Applicant".to_string()
    } else {
        names.join(", ")
    };

    let risk_json = serde_json::to_string_pretty(risk).unwrap_or_else(|_| "{}".to_string());

    format!(
        "As a {role}, {instruction}\n\n\
Risk Analysis Results: {risk_json}\n\n\
Format your response in a way that will be displayed in a text file called 'credit_report_langgraph_timestamp.txt'. \
The decision should follow the Risk Analysis Results section and be well-structured with headings. \
Include a section titled '**Loan Decision Report**', followed by applicant information, \
creditworthiness assessment, risk factors, and recommendation.\n\n\
Return a JSON object with this structure:\n\
{{\"decisions\": [{{\"applicant_name\": \"{applicant_name}\", \"decision\": {{\"status\": \"APPROVED|DENIED|CONDITIONAL\", \
\"loan_terms\": {{\"amount\": \"float\", \"interest_rate\": \"float\", \"term_months\": \"int\"}}, \
\"conditions\": [\"str\"], \"rationale\": [\"str\"]}}}}], \"text_format\": \"str\"}}",
        role = profile.role,
        instruction = instruction,
        risk_json = risk_json,
        applicant_name = applicant_name,
    )
}
