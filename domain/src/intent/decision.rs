//! Backend decisions: tagged parsing of language-backend answers.
//!
//! The language backend answers with arbitrary JSON. Both decision kinds are
//! parsed here into closed variants with explicit failure, so nothing from
//! the backend reaches the tracker without passing through a typed shape.
//!
//! Selection answer:
//!
//! ```json
//! {"tool": "get_issue", "reason": "asks for issue details"}
//! {"tool": null, "reason": "small talk"}
//! ```
//!
//! Extraction answer:
//!
//! ```json
//! {"arguments": {"issue_key": "SCRUM-123"}}
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

/// The backend answer could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionParseError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' must be {expected}")]
    WrongFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("missing field '{0}'")]
    MissingField(&'static str),
}

/// Outcome of tool selection as reported by the backend.
///
/// The name is unchecked here; the selector validates it against the
/// live catalog before anything is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDecision {
    /// The backend named a tool
    Tool {
        name: String,
        reason: Option<String>,
    },
    /// The backend found no applicable tool
    NoTool { reason: Option<String> },
}

impl SelectionDecision {
    pub fn parse(value: &Value) -> Result<Self, DecisionParseError> {
        let obj = as_object(value)?;
        let reason = optional_string(obj, "reason")?;

        match obj.get("tool") {
            None => Err(DecisionParseError::MissingField("tool")),
            Some(Value::Null) => Ok(SelectionDecision::NoTool { reason }),
            Some(Value::String(s)) if s.trim().is_empty() || is_none_marker(s) => {
                Ok(SelectionDecision::NoTool { reason })
            }
            Some(Value::String(s)) => Ok(SelectionDecision::Tool {
                name: s.trim().to_string(),
                reason,
            }),
            Some(_) => Err(DecisionParseError::WrongFieldType {
                field: "tool",
                expected: "a string or null",
            }),
        }
    }

    pub fn tool_name(&self) -> Option<&str> {
        match self {
            SelectionDecision::Tool { name, .. } => Some(name),
            SelectionDecision::NoTool { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            SelectionDecision::Tool { reason, .. } | SelectionDecision::NoTool { reason } => {
                reason.as_deref()
            }
        }
    }
}

/// Raw argument mapping returned by the backend, not yet validated
/// against a tool's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionDecision {
    pub arguments: Map<String, Value>,
}

impl ExtractionDecision {
    /// Accepts `{"arguments": {...}}`. A bare object without an
    /// `arguments` key is taken as the argument map itself.
    pub fn parse(value: &Value) -> Result<Self, DecisionParseError> {
        let obj = as_object(value)?;
        let arguments = match obj.get("arguments") {
            Some(Value::Object(args)) => args.clone(),
            Some(Value::Null) => Map::new(),
            Some(_) => {
                return Err(DecisionParseError::WrongFieldType {
                    field: "arguments",
                    expected: "an object",
                });
            }
            None => obj.clone(),
        };
        Ok(Self { arguments })
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, DecisionParseError> {
    value
        .as_object()
        .ok_or_else(|| DecisionParseError::NotAnObject(json_type_name(value)))
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DecisionParseError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecisionParseError::WrongFieldType {
            field,
            expected: "a string",
        }),
    }
}

fn is_none_marker(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "none" | "null")
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
