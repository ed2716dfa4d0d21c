//! Tool domain traits
//!
//! Contains pure domain logic for checking arguments against a tool's
//! declared parameters. The async `ToolExecutorPort` is defined in the
//! application layer (ports).

use super::entities::{ParamType, ToolCall, ToolDefinition, ToolParameter};
use crate::intent::decision::json_type_name;
use serde_json::{Map, Value};
use thiserror::Error;

/// Arguments did not satisfy a tool's declared parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Missing required {} for {tool}: {}", plural(.fields.len()), .fields.join(", "))]
    MissingRequired { tool: String, fields: Vec<String> },

    #[error("Argument '{field}' for {tool} must be {expected}, got {actual}")]
    TypeMismatch {
        tool: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Argument '{field}' for {tool} must be one of {}, got '{value}'", .allowed.join(", "))]
    InvalidChoice {
        tool: String,
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Unknown argument '{field}' for {tool}")]
    UnknownParameter { tool: String, field: String },

    #[error("Could not extract arguments for {tool}: {reason}")]
    Unparseable { tool: String, reason: String },
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "argument" } else { "arguments" }
}

impl ExtractionError {
    /// Names of the missing fields, if that is what went wrong
    pub fn missing_fields(&self) -> &[String] {
        match self {
            ExtractionError::MissingRequired { fields, .. } => fields,
            _ => &[],
        }
    }
}

/// Validator for tool calls
///
/// This is a pure domain trait that checks tool arguments against their
/// definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate an already-built tool call against its definition (strict:
    /// unknown arguments are an error).
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ExtractionError>;

    /// Turn a raw argument map into a [`ToolCall`]: stray keys are dropped,
    /// defaults are applied, types and required fields are enforced.
    fn normalize(
        &self,
        raw: &Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<ToolCall, ExtractionError>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl DefaultToolValidator {
    /// Check one present value. Returns the normalized value, or None when
    /// the value counts as absent (null or blank).
    fn check_value(
        definition: &ToolDefinition,
        param: &ToolParameter,
        value: &Value,
    ) -> Result<Option<String>, ExtractionError> {
        let text = match value {
            Value::Null => return Ok(None),
            Value::String(s) => s,
            other => {
                return Err(ExtractionError::TypeMismatch {
                    tool: definition.name.clone(),
                    field: param.name.clone(),
                    expected: expected_for(&param.param_type),
                    actual: json_type_name(other),
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(None);
        }

        match &param.param_type {
            ParamType::Text => Ok(Some(text.clone())),
            ParamType::String => Ok(Some(text.trim().to_string())),
            ParamType::Enum(allowed) => allowed
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(text.trim()))
                .map(|candidate| Some(candidate.clone()))
                .ok_or_else(|| ExtractionError::InvalidChoice {
                    tool: definition.name.clone(),
                    field: param.name.clone(),
                    value: text.clone(),
                    allowed: allowed.clone(),
                }),
        }
    }
}

fn expected_for(param_type: &ParamType) -> &'static str {
    match param_type {
        ParamType::String | ParamType::Text => "a string",
        ParamType::Enum(_) => "one of the allowed string values",
    }
}

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), ExtractionError> {
        for arg_name in call.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(ExtractionError::UnknownParameter {
                    tool: definition.name.clone(),
                    field: arg_name.clone(),
                });
            }
        }

        let mut missing = Vec::new();
        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                Some(value) => {
                    if Self::check_value(definition, param, value)?.is_none() && param.required {
                        missing.push(param.name.clone());
                    }
                }
                None if param.required => missing.push(param.name.clone()),
                None => {}
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ExtractionError::MissingRequired {
                tool: definition.name.clone(),
                fields: missing,
            })
        }
    }

    fn normalize(
        &self,
        raw: &Map<String, Value>,
        definition: &ToolDefinition,
    ) -> Result<ToolCall, ExtractionError> {
        let mut call = ToolCall::new(&definition.name);
        let mut missing = Vec::new();

        for param in &definition.parameters {
            let value = match raw.get(&param.name) {
                Some(value) => Self::check_value(definition, param, value)?,
                None => None,
            };

            match value.or_else(|| param.default.clone()) {
                Some(v) => call = call.with_arg(&param.name, v),
                None if param.required => missing.push(param.name.clone()),
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(ExtractionError::MissingRequired {
                tool: definition.name.clone(),
                fields: missing,
            });
        }

        Ok(call)
    }
}
