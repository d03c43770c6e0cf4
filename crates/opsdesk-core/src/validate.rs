//! Field validation rules shared by the resource forms.

use serde_json::Value;

use crate::error::ValidationErrors;
use crate::types::Timestamp;

/// Declared type of a game configuration value.
///
/// The value itself is always stored as a string; the type says how the
/// game server will read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Json,
    Array,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Json => "json",
            ValueType::Array => "array",
        }
    }

    /// Check that `value` can be read as this type.
    ///
    /// - `number`: a finite number
    /// - `boolean`: `true`, `false`, `1` or `0`, any case
    /// - `json`: a JSON object or array
    /// - `array`: a JSON array
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            ValueType::String => Ok(()),
            ValueType::Number => {
                let v = value.trim();
                match v.parse::<f64>() {
                    Ok(n) if !v.is_empty() && n.is_finite() => Ok(()),
                    _ => Err("must be a valid number".to_string()),
                }
            }
            ValueType::Boolean => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "false" | "1" | "0" => Ok(()),
                _ => Err("must be true, false, 1 or 0".to_string()),
            },
            ValueType::Json => match serde_json::from_str::<Value>(value) {
                Ok(Value::Object(_)) | Ok(Value::Array(_)) => Ok(()),
                Ok(_) => Err("must be a JSON object or array".to_string()),
                Err(_) => Err("is not valid JSON".to_string()),
            },
            ValueType::Array => match serde_json::from_str::<Value>(value) {
                Ok(Value::Array(_)) => Ok(()),
                Ok(_) => Err("must be a JSON array".to_string()),
                Err(_) => Err("is not a valid JSON array".to_string()),
            },
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required, trimmed, with a character-count range.
pub fn text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.add(field, "is required");
    } else if len < min {
        errors.add(field, format!("must be at least {} characters", min));
    } else if len > max {
        errors.add(field, format!("must be at most {} characters", max));
    }
}

/// Optional text with an upper bound.
pub fn max_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max
    {
        errors.add(field, format!("must be at most {} characters", max));
    }
}

pub fn required<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<&T>) {
    if value.is_none() {
        errors.add(field, "is required");
    }
}

/// Both ends required and `end` strictly after `start`.
pub fn time_range(
    errors: &mut ValidationErrors,
    start_field: &'static str,
    start: Option<Timestamp>,
    end_field: &'static str,
    end: Option<Timestamp>,
) {
    required(errors, start_field, start.as_ref());
    required(errors, end_field, end.as_ref());

    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        errors.add(end_field, "must be after the start time");
    }
}
