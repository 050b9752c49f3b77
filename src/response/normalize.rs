//! Turning an extracted payload into a normalized stage record

use super::extract::{extract_json, recover_object};
use super::ParseError;
use crate::records::{
    DecisionMetadata, LoanDecision, RiskAssessment, RiskMetadata, AGENT_VERSION,
};
use crate::report::{synthesize_decision_report, synthesize_risk_report};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Formats a timestamp the way every record's metadata carries it
pub fn format_timestamp(now: &DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A record one pipeline stage asks the model for
pub trait StageRecord: DeserializeOwned {
    /// Short name used in logs and error messages
    const KIND: &'static str;

    /// Replaces the record's metadata with freshly generated metadata
    fn attach_metadata(&mut self, agent_role: &str, timestamp: String);

    fn text_format(&self) -> Option<&str>;

    fn set_text_format(&mut self, text: String);

    /// Renders the record without relying on model-provided text
    fn synthesize_text(&self) -> String;
}

impl StageRecord for RiskAssessment {
    const KIND: &'static str = "risk assessment";

    fn attach_metadata(&mut self, agent_role: &str, timestamp: String) {
        self.metadata = Some(RiskMetadata {
            analysis_timestamp: timestamp,
            agent_role: agent_role.to_string(),
            agent_version: AGENT_VERSION.to_string(),
        });
    }

    fn text_format(&self) -> Option<&str> {
        self.text_format.as_deref()
    }

    fn set_text_format(&mut self, text: String) {
        self.text_format = Some(text);
    }

    fn synthesize_text(&self) -> String {
        synthesize_risk_report(self)
    }
}

impl StageRecord for LoanDecision {
    const KIND: &'static str = "loan decision";

    fn attach_metadata(&mut self, agent_role: &str, timestamp: String) {
        self.metadata = Some(DecisionMetadata::Decided {
            decision_timestamp: timestamp,
            agent_role: agent_role.to_string(),
            agent_version: AGENT_VERSION.to_string(),
        });
    }

    fn text_format(&self) -> Option<&str> {
        self.text_format.as_deref()
    }

    fn set_text_format(&mut self, text: String) {
        self.text_format = Some(text);
    }

    fn synthesize_text(&self) -> String {
        synthesize_decision_report(self)
    }
}

/// Parses `payload` as a JSON object, retrying once on the brace-delimited span
pub fn parse_object(payload: &str) -> Result<Map<String, Value>, ParseError> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(first_err) => {
            warn!("Payload is not valid JSON ({}), retrying on object span", first_err);
            let candidate = recover_object(payload)?;
            serde_json::from_str(candidate).map_err(|e| {
                ParseError::MalformedResponse(format!(
                    "{}: {}",
                    e,
                    candidate.chars().take(100).collect::<String>()
                ))
            })?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::MalformedResponse(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Parses, validates and normalizes one stage record
///
/// Missing keys are tolerated. Model-supplied `metadata` is discarded in favor
/// of generated metadata, and a report is synthesized when the model did not
/// include `text_format`.
pub fn parse_and_normalize<R: StageRecord>(
    payload: &str,
    agent_role: &str,
    now: DateTime<Utc>,
) -> Result<R, ParseError> {
    let mut object = parse_object(payload)?;
    object.remove("metadata");

    let mut record: R = serde_json::from_value(Value::Object(object)).map_err(|e| {
        ParseError::MalformedResponse(format!("{} does not match schema: {}", R::KIND, e))
    })?;

    record.attach_metadata(agent_role, format_timestamp(&now));

    if record.text_format().is_none() {
        debug!("No text_format in {} response, synthesizing report", R::KIND);
        let text = record.synthesize_text();
        record.set_text_format(text);
    }

    Ok(record)
}

/// Extracts and normalizes a record straight from raw model output
pub fn parse_response<R: StageRecord>(
    raw_text: &str,
    agent_role: &str,
    now: DateTime<Utc>,
) -> Result<R, ParseError> {
    debug!("Parsing {} response ({} chars)", R::KIND, raw_text.len());
    parse_and_normalize(extract_json(raw_text), agent_role, now)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
