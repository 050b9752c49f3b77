//! Deterministic text reports
//!
//! Used whenever a model answered with structured data but no `text_format`
//! of its own, and for offline re-rendering of saved results.

mod decision;
mod risk;

pub use decision::{
    split_factor_label, synthesize_decision_report, DECISION_REPORT_HEADER, DEFAULT_FACTOR_LABEL,
};
pub use risk::{mask_ssn, synthesize_risk_report, RISK_REPORT_HEADER};
