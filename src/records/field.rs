//! Lenient leaf values for model-produced records
//!
//! Models routinely return `"720"` where `720` was asked for, or `"35%"` for a
//! ratio. Leaves are therefore stored as the JSON value the model produced and
//! rendered as text on demand; the record type states which leaves exist, not
//! how strictly the model followed the schema.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Placeholder rendered for absent leaves
pub const MISSING: &str = "N/A";

/// A single leaf value as produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(Value);

impl FieldValue {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Null => f.write_str(MISSING),
            other => write!(f, "{}", other),
        }
    }
}

/// Renders an optional leaf, substituting [`MISSING`] when absent
pub fn display_or_missing(value: &Option<FieldValue>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Deserializes a list that the model may have emitted as `null`
pub(crate) fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a nested object that the model may have emitted as `null`
pub(crate) fn nullable_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_renders_strings_verbatim() {
        assert_eq!(FieldValue::from("Excellent").to_string(), "Excellent");
    }

    #[test]
    fn test_display_renders_numbers() {
        assert_eq!(FieldValue::from(720).to_string(), "720");
        assert_eq!(FieldValue::from(0.35).to_string(), "0.35");
        assert_eq!(FieldValue::from(5000.0).to_string(), "5000.0");
    }

    #[test]
    fn test_display_or_missing() {
        assert_eq!(display_or_missing(&None), "N/A");
        assert_eq!(display_or_missing(&Some(FieldValue::from("x"))), "x");
    }

    #[test]
    fn test_null_deserializes_as_none() {
        let value: Option<FieldValue> = serde_json::from_value(json!(null)).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_nested_values_are_tolerated() {
        let value: FieldValue = serde_json::from_value(json!({"score": 700})).unwrap();
        assert_eq!(value.to_string(), r#"{"score":700}"#);
    }
}
