use crate::records::{display_or_missing, FieldValue, RiskAssessment};

pub const RISK_REPORT_HEADER: &str = "**Comprehensive Credit Report Analysis**";

/// Rendered when the model gave no SSN at all
const DEFAULT_SSN: &str = "XXX-XX-0000";

/// Masks an SSN down to its last four characters
pub fn mask_ssn(ssn: &str) -> String {
    let chars: Vec<char> = ssn.chars().collect();
    if chars.len() >= 4 {
        let last_four: String = chars[chars.len() - 4..].iter().collect();
        format!("XXX-XX-{}", last_four)
    } else {
        "XXX-XX-XXXX".to_string()
    }
}

/// Deterministically renders a risk assessment as a text report
pub fn synthesize_risk_report(record: &RiskAssessment) -> String {
    let mut out = format!("{}\n\n", RISK_REPORT_HEADER);
    let last = record.applicants.len().saturating_sub(1);

    for (index, applicant) in record.applicants.iter().enumerate() {
        let personal = &applicant.personal_info;
        let ssn = personal
            .ssn
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| DEFAULT_SSN.to_string());

        out.push_str("**1. Personal Information:**\n");
        out.push_str(&format!(
            "   - **Name:** {}\n",
            display_or_missing(&personal.name)
        ));
        out.push_str(&format!("   - **SSN:** {}\n", mask_ssn(&ssn)));
        out.push_str(&format!(
            "   - **Address:** {}\n\n",
            display_or_missing(&personal.address)
        ));

        let credit = &applicant.credit_history;
        out.push_str("**2. Credit History:**\n");
        out.push_str(&format!(
            "   - **Credit Score:** {}\n",
            display_or_missing(&credit.credit_score)
        ));
        out.push_str(&format!(
            "   - **Payment History:** {}\n",
            display_or_missing(&credit.payment_history)
        ));
        out.push_str(&format!(
            "   - **Credit Utilization:** {}\n\n",
            display_or_missing(&credit.credit_utilization)
        ));

        let dti = &applicant.debt_income_analysis;
        out.push_str("**3. Debt-Income Analysis:**\n");
        out.push_str(&format!(
            "   - **Monthly Income:** ${}\n",
            display_or_missing(&dti.monthly_income)
        ));
        out.push_str(&format!(
            "   - **Total Debt:** ${}\n",
            display_or_missing(&dti.total_debt)
        ));
        out.push_str(&format!(
            "   - **DTI Ratio:** {}\n\n",
            display_or_missing(&dti.dti_ratio)
        ));

        let employment = &applicant.employment_stability;
        out.push_str("**4. Employment Stability:**\n");
        out.push_str(&format!(
            "   - **Current Employer:** {}\n",
            display_or_missing(&employment.current_employer)
        ));
        out.push_str(&format!(
            "   - **Years Employed:** {}\n",
            display_or_missing(&employment.years_employed)
        ));
        out.push_str(&format!(
            "   - **Employment Type:** {}\n\n",
            display_or_missing(&employment.employment_type)
        ));

        let assessment = &applicant.overall_assessment;
        out.push_str("**5. Overall Risk Assessment:**\n");
        out.push_str(&format!(
            "   - **Risk Level:** {}\n",
            display_or_missing(&assessment.risk_level)
        ));
        push_bullets(&mut out, "Risk Factors", &assessment.risk_factors);
        push_bullets(&mut out, "Recommendations", &assessment.recommendations);

        if index < last {
            out.push_str("\n---\n\n");
        }
    }

    if let Some(conclusion) = &record.conclusion {
        out.push_str("\n**Conclusion:**\n");
        out.push_str(conclusion);
        out.push('\n');
    }

    out
}

fn push_bullets(out: &mut String, title: &str, items: &[FieldValue]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("   - **{}:**\n", title));
    for item in items {
        out.push_str(&format!("     - {}\n", item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RiskAssessment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mask_ssn() {
        assert_eq!(mask_ssn("123-45-6789"), "XXX-XX-6789");
        assert_eq!(mask_ssn("12"), "XXX-XX-XXXX");
        assert_eq!(mask_ssn("6789"), "XXX-XX-6789");
        assert_eq!(mask_ssn(""), "XXX-XX-XXXX");
    }

    #[test]
    fn test_full_applicant_layout() {
        let report = synthesize_risk_report(&record(json!({
            "applicants": [{
                "personal_info": {"name": "Jane Doe", "ssn": "123-45-6789", "address": "1 Main St"},
                "credit_history": {"credit_score": 720, "payment_history": "Good", "credit_utilization": 0.3},
                "debt_income_analysis": {"monthly_income": 5000.0, "total_debt": 1200, "dti_ratio": 0.24},
                "employment_stability": {"current_employer": "Acme", "years_employed": 4.5, "employment_type": "Full-time"},
                "overall_assessment": {"risk_level": "Low", "risk_factors": ["Short history"], "recommendations": ["Approve"]}
            }]
        })));

        let expected = "**Comprehensive Credit Report Analysis**\n\n\
**1. Personal Information:**\n\
\x20  - **Name:** Jane Doe\n\
\x20  - **SSN:** XXX-XX-6789\n\
\x20  - **Address:** 1 Main St\n\n\
**2. Credit History:**\n\
\x20  - **Credit Score:** 720\n\
\x20  - **Payment History:** Good\n\
\x20  - **Credit Utilization:** 0.3\n\n\
**3. Debt-Income Analysis:**\n\
\x20  - **Monthly Income:** $5000.0\n\
\x20  - **Total Debt:** $1200\n\
\x20  - **DTI Ratio:** 0.24\n\n\
**4. Employment Stability:**\n\
\x20  - **Current Employer:** Acme\n\
\x20  - **Years Employed:** 4.5\n\
\x20  - **Employment Type:** Full-time\n\n\
**5. Overall Risk Assessment:**\n\
\x20  - **Risk Level:** Low\n\
\x20  - **Risk Factors:**\n\
\x20    - Short history\n\
\x20  - **Recommendations:**\n\
\x20    - Approve\n";

        assert_eq!(report, expected);
    }

    #[test]
    fn test_missing_fields_render_na() {
        let report = synthesize_risk_report(&record(json!({"applicants": [{}]})));

        assert!(report.contains("   - **Name:** N/A\n"));
        assert!(report.contains("   - **SSN:** XXX-XX-0000\n"));
        assert!(report.contains("   - **Monthly Income:** $N/A\n"));
        assert!(report.contains("   - **Risk Level:** N/A\n"));
        assert!(!report.contains("**Risk Factors:**"));
        assert!(!report.contains("**Recommendations:**"));
        assert!(!report.contains("**Conclusion:**"));
    }

    #[test]
    fn test_separator_only_between_applicants() {
        let report = synthesize_risk_report(&record(json!({
            "applicants": [
                {"personal_info": {"name": "A"}},
                {"personal_info": {"name": "B"}},
                {"personal_info": {"name": "C"}}
            ]
        })));

        assert_eq!(report.matches("\n---\n\n").count(), 2);
        assert!(!report.trim_end().ends_with("---"));
    }

    #[test]
    fn test_conclusion_block() {
        let report = synthesize_risk_report(&record(json!({
            "applicants": [{"personal_info": {"name": "Jane Doe"}}],
            "conclusion": "ok"
        })));

        assert!(report.contains("**Name:** Jane Doe"));
        assert!(report.ends_with("\n**Conclusion:**\nok\n"));
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let input = record(json!({
            "applicants": [{"personal_info": {"name": "Jane"}}, {}],
            "conclusion": "done"
        }));

        assert_eq!(synthesize_risk_report(&input), synthesize_risk_report(&input));
    }

    #[test]
    fn test_no_applicants_renders_header_only() {
        let report = synthesize_risk_report(&RiskAssessment::default());
        assert_eq!(report, "**Comprehensive Credit Report Analysis**\n\n");
    }
}
