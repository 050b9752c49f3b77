use crate::records::{display_or_missing, DecisionStatus, LoanDecision, MISSING};

pub const DECISION_REPORT_HEADER: &str = "**Loan Decision Report**";

/// Label used for a rationale line without a colon
pub const DEFAULT_FACTOR_LABEL: &str = "Factor";

/// Splits a rationale line into a bold label and its text
///
/// The label is everything before the first `:` and the text everything after
/// it, untrimmed. Lines without a colon get [`DEFAULT_FACTOR_LABEL`] and keep
/// their full text.
pub fn split_factor_label(item: &str) -> (&str, &str) {
    match item.split_once(':') {
        Some((label, rest)) => (label, rest),
        None => (DEFAULT_FACTOR_LABEL, item),
    }
}

/// Phrase naming the outcome in the report's closing sentence
fn outcome_phrase(status: Option<&DecisionStatus>) -> &'static str {
    match status {
        Some(DecisionStatus::Approved) => "approval",
        Some(DecisionStatus::Denied) => "denial",
        _ => "conditional approval",
    }
}

/// Deterministically renders a loan decision as a text report
///
/// The closing sentence reflects only the status of the last decision in the
/// record, even when several applicants were decided differently.
pub fn synthesize_decision_report(record: &LoanDecision) -> String {
    let mut out = format!("{}\n\n", DECISION_REPORT_HEADER);
    let mut last_status: Option<&DecisionStatus> = None;

    for decision in &record.decisions {
        out.push_str("**Applicant Information:**\n");
        out.push_str(&format!(
            "- **Name:** {}\n\n",
            display_or_missing(&decision.applicant_name)
        ));

        let details = &decision.decision;
        let rationale: Vec<String> = details.rationale.iter().map(ToString::to_string).collect();

        out.push_str("**Creditworthiness Assessment:**\n");
        match rationale.first() {
            Some(first) => out.push_str(&format!("{}\n\n", first)),
            None => out.push_str("Assessment not available.\n\n"),
        }

        out.push_str("**Risk Factors:**\n");
        if rationale.len() > 1 {
            for (number, item) in rationale.iter().skip(1).enumerate() {
                let (label, text) = split_factor_label(item);
                out.push_str(&format!("{}. **{}:** {}\n", number + 1, label, text));
            }
        } else {
            out.push_str("No specific risk factors listed.\n");
        }
        out.push('\n');

        let status = details.status.as_ref();
        let status_text = status.map(DecisionStatus::as_str).unwrap_or(MISSING);
        out.push_str(&format!(
            "**Recommendation:**\n**Decision: {}**\n\n",
            status_text
        ));

        out.push_str("**Justification:**\n");
        if rationale.is_empty() {
            out.push_str("No detailed justification available.\n\n");
        } else {
            for item in &rationale {
                out.push_str(&format!("{}\n\n", item));
            }
        }

        let grants_loan = status.map(DecisionStatus::grants_loan).unwrap_or(false);
        if grants_loan {
            let terms = &details.loan_terms;
            out.push_str("**Loan Terms:**\n");
            out.push_str(&format!(
                "- **Amount:** ${}\n",
                display_or_missing(&terms.amount)
            ));
            out.push_str(&format!(
                "- **Interest Rate:** {}%\n",
                display_or_missing(&terms.interest_rate)
            ));
            out.push_str(&format!(
                "- **Term:** {} months\n\n",
                display_or_missing(&terms.term_months)
            ));
        }

        if grants_loan && !details.conditions.is_empty() {
            out.push_str("**Conditions for Approval:**\n");
            for condition in &details.conditions {
                out.push_str(&format!("- {}\n", condition));
            }
            out.push('\n');
        }

        last_status = status;
    }

    out.push_str("This structured decision report provides a clear rationale for the ");
    out.push_str(&format!("{} ", outcome_phrase(last_status)));
    out.push_str(
        "of the loan application, based on the comprehensive credit report analysis and identified risk factors.",
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> LoanDecision {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_split_factor_label() {
        assert_eq!(
            split_factor_label("Credit: strong history"),
            ("Credit", " strong history")
        );
        assert_eq!(split_factor_label("a:b:c"), ("a", "b:c"));
        assert_eq!(
            split_factor_label("no colon here"),
            ("Factor", "no colon here")
        );
    }

    #[test]
    fn test_approved_layout() {
        let report = synthesize_decision_report(&record(json!({
            "decisions": [{
                "applicant_name": "Jane Doe",
                "decision": {
                    "status": "APPROVED",
                    "loan_terms": {"amount": 25000, "interest_rate": 6.5, "term_months": 60},
                    "conditions": ["Proof of income"],
                    "rationale": ["Strong credit profile", "DTI: within limits", "stable job"]
                }
            }]
        })));

        let expected = "**Loan Decision Report**\n\n\
**Applicant Information:**\n\
- **Name:** Jane Doe\n\n\
**Creditworthiness Assessment:**\n\
Strong credit profile\n\n\
**Risk Factors:**\n\
1. **DTI:**  within limits\n\
2. **Factor:** stable job\n\n\
**Recommendation:**\n\
**Decision: APPROVED**\n\n\
**Justification:**\n\
Strong credit profile\n\n\
DTI: within limits\n\n\
stable job\n\n\
**Loan Terms:**\n\
- **Amount:** $25000\n\
- **Interest Rate:** 6.5%\n\
- **Term:** 60 months\n\n\
**Conditions for Approval:**\n\
- Proof of income\n\n\
This structured decision report provides a clear rationale for the approval of the loan application, \
based on the comprehensive credit report analysis and identified risk factors.";

        assert_eq!(report, expected);
    }

    #[test]
    fn test_empty_rationale_fallbacks() {
        let report = synthesize_decision_report(&record(json!({
            "decisions": [{"applicant_name": "Sam", "decision": {"status": "DENIED"}}]
        })));

        assert!(report.contains("**Creditworthiness Assessment:**\nAssessment not available.\n\n"));
        assert!(report.contains("**Risk Factors:**\nNo specific risk factors listed.\n\n"));
        assert!(report.contains("**Justification:**\nNo detailed justification available.\n\n"));
        assert!(!report.contains("**Loan Terms:**"));
    }

    #[test]
    fn test_single_rationale_has_no_factors() {
        let report = synthesize_decision_report(&record(json!({
            "decisions": [{"decision": {"status": "DENIED", "rationale": ["Too much debt"]}}]
        })));

        assert!(report.contains("- **Name:** N/A\n"));
        assert!(report.contains("**Risk Factors:**\nNo specific risk factors listed.\n"));
    }

    #[test]
    fn test_closing_phrase_uses_last_status() {
        let report = synthesize_decision_report(&record(json!({
            "decisions": [
                {"applicant_name": "A", "decision": {"status": "APPROVED"}},
                {"applicant_name": "B", "decision": {"status": "DENIED"}}
            ]
        })));

        assert!(report.contains("clear rationale for the denial of the loan application"));
        assert!(!report.contains("for the approval of"));
    }

    #[test]
    fn test_conditions_only_for_granting_status() {
        let conditional = synthesize_decision_report(&record(json!({
            "decisions": [{"decision": {"status": "CONDITIONAL", "conditions": ["Co-signer", "Escrow"]}}]
        })));
        assert!(conditional.contains("**Conditions for Approval:**\n- Co-signer\n- Escrow\n\n"));
        assert!(conditional.contains("**Loan Terms:**\n- **Amount:** $N/A\n"));
        assert!(conditional.contains("for the conditional approval of"));

        let denied = synthesize_decision_report(&record(json!({
            "decisions": [{"decision": {"status": "DENIED", "conditions": ["Co-signer", "Escrow"]}}]
        })));
        assert!(!denied.contains("**Conditions for Approval:**"));
        assert!(!denied.contains("Co-signer"));
    }

    #[test]
    fn test_missing_status() {
        let report = synthesize_decision_report(&record(json!({
            "decisions": [{"applicant_name": "A", "decision": {}}]
        })));

        assert!(report.contains("**Decision: N/A**"));
        assert!(report.contains("for the conditional approval of"));
    }

    #[test]
    fn test_no_decisions() {
        let report = synthesize_decision_report(&LoanDecision::default());
        assert!(report.starts_with("**Loan Decision Report**\n\nThis structured decision report"));
        assert!(report.contains("conditional approval"));
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let input = record(json!({
            "decisions": [{"decision": {"status": "APPROVED", "rationale": ["x", "y: z"]}}]
        }));
        assert_eq!(
            synthesize_decision_report(&input),
            synthesize_decision_report(&input)
        );
    }
}
