//! Tracker error taxonomy.

use crate::tool::value_objects::{ErrorKind, ToolError};
use thiserror::Error;

/// Errors reported by a tracker adapter.
///
/// Domain rejections (`NotFound`, `InvalidProject`, `InvalidTransition`,
/// `Rejected`) are final answers from the tracker. `Unavailable` covers
/// transport, auth, rate-limit and timeout failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Issue {key} was not found")]
    NotFound { key: String },

    #[error("Project {key} was not found")]
    InvalidProject { key: String },

    #[error("Transition of {key} was rejected: {message}")]
    InvalidTransition { key: String, message: String },

    #[error("Tracker rejected the request: {message}")]
    Rejected {
        message: String,
        /// Field names the tracker complained about
        fields: Vec<String>,
    },

    #[error("Tracker unavailable: {0}")]
    Unavailable(String),
}

impl TrackerError {
    pub fn rejected(message: impl Into<String>) -> Self {
        TrackerError::Rejected {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::NotFound { .. } => ErrorKind::NotFound,
            TrackerError::InvalidProject { .. } => ErrorKind::InvalidProject,
            TrackerError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            TrackerError::Rejected { .. } => ErrorKind::Rejected,
            TrackerError::Unavailable(_) => ErrorKind::TrackerUnavailable,
        }
    }

    /// Entity key the error refers to
    pub fn key(&self) -> Option<&str> {
        match self {
            TrackerError::NotFound { key }
            | TrackerError::InvalidProject { key }
            | TrackerError::InvalidTransition { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether the tracker complained about a specific field
    pub fn mentions_field(&self, field: &str) -> bool {
        match self {
            TrackerError::Rejected { fields, message } => {
                fields.iter().any(|f| f.eq_ignore_ascii_case(field))
                    || message.to_ascii_lowercase().contains(&field.to_ascii_lowercase())
            }
            _ => false,
        }
    }
}

impl From<TrackerError> for ToolError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound { key } => ToolError::not_found(key),
            TrackerError::InvalidProject { key } => ToolError::invalid_project(key),
            TrackerError::InvalidTransition { key, message } => {
                ToolError::invalid_transition(key, message)
            }
            TrackerError::Rejected { message, .. } => {
                ToolError::rejected(format!("The tracker rejected the request: {}", message))
            }
            TrackerError::Unavailable(message) => ToolError::tracker_unavailable(format!(
                "The issue tracker is unavailable right now, please retry later ({})",
                message
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_key() {
        let err = TrackerError::NotFound {
            key: "SCRUM-9".into(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.key(), Some("SCRUM-9"));
        assert_eq!(TrackerError::Unavailable("timeout".into()).key(), None);
    }

    #[test]
    fn test_into_tool_error_keeps_key() {
        let tool_err: ToolError = TrackerError::InvalidProject { key: "NOPE".into() }.into();
        assert_eq!(tool_err.kind, ErrorKind::InvalidProject);
        assert_eq!(tool_err.key.as_deref(), Some("NOPE"));
        assert!(tool_err.message.contains("NOPE"));
    }

    #[test]
    fn test_mentions_field() {
        let err = TrackerError::Rejected {
            message: "Field errors".into(),
            fields: vec!["issuetype".into()],
        };
        assert!(err.mentions_field("IssueType"));
        assert!(TrackerError::rejected("issuetype: invalid").mentions_field("issuetype"));
        assert!(!TrackerError::Unavailable("x".into()).mentions_field("issuetype"));
    }
}
