//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of the tool pipeline. Every tool
//! execution produces a [`ToolResult`] whose [`ToolOutcome`] is either a
//! success payload or a [`ToolError`], never both.
//!
//! [`ErrorKind`] drives how a failure is presented:
//!
//! | Kind | Retryable? | Meaning |
//! |------|-----------|---------|
//! | `UNKNOWN_TOOL` | No | Tool name not in the registry |
//! | `DUPLICATE_TOOL` | No | Registry misuse at startup |
//! | `SELECTION_FAILED` | Yes | Backend could not be asked or answered nonsense |
//! | `EXTRACTION_FAILED` | No | Required arguments missing or malformed |
//! | `INVALID_PROJECT` | No | Project key does not exist |
//! | `NOT_FOUND` | No | Issue key does not exist |
//! | `INVALID_TRANSITION` | No | Workflow does not allow the status change |
//! | `REJECTED` | No | Tracker refused the request (e.g. bad field value) |
//! | `TRACKER_UNAVAILABLE` | Yes | Network, auth, rate limit or timeout |

use serde::{Deserialize, Serialize};

/// Classification of a tool failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    UnknownTool,
    DuplicateTool,
    #[serde(rename = "SELECTION_FAILED")]
    Selection,
    #[serde(rename = "EXTRACTION_FAILED")]
    Extraction,
    InvalidProject,
    NotFound,
    InvalidTransition,
    Rejected,
    TrackerUnavailable,
}

impl ErrorKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownTool => "UNKNOWN_TOOL",
            ErrorKind::DuplicateTool => "DUPLICATE_TOOL",
            ErrorKind::Selection => "SELECTION_FAILED",
            ErrorKind::Extraction => "EXTRACTION_FAILED",
            ErrorKind::InvalidProject => "INVALID_PROJECT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidTransition => "INVALID_TRANSITION",
            ErrorKind::Rejected => "REJECTED",
            ErrorKind::TrackerUnavailable => "TRACKER_UNAVAILABLE",
        }
    }

    /// Whether the caller may retry the whole request
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::TrackerUnavailable | ErrorKind::Selection)
    }

    /// Domain-level rejection coming from the tracker
    pub fn is_domain_rejection(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidProject
                | ErrorKind::NotFound
                | ErrorKind::InvalidTransition
                | ErrorKind::Rejected
        )
    }

    /// HTTP-equivalent status. Domain rejections are 4xx, never 500.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::NotFound | ErrorKind::InvalidProject | ErrorKind::UnknownTool => 404,
            ErrorKind::InvalidTransition => 409,
            ErrorKind::Rejected | ErrorKind::Extraction => 400,
            ErrorKind::Selection => 502,
            ErrorKind::TrackerUnavailable => 503,
            ErrorKind::DuplicateTool => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    /// Human-readable, single-sentence message
    pub message: String,
    /// Entity key the failure refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            key: None,
            details: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(ErrorKind::UnknownTool, format!("Unknown tool: {}", name)).with_key(name)
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Extraction, message)
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorKind::NotFound, format!("Issue {} was not found.", key)).with_key(key)
    }

    pub fn invalid_project(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorKind::InvalidProject,
            format!(
                "Project with key '{}' was not found. Please provide a correct project key.",
                key
            ),
        )
        .with_key(key)
    }

    pub fn invalid_transition(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message).with_key(key)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Rejected, message)
    }

    pub fn tracker_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TrackerUnavailable, message)
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Tagged outcome of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome {
    Success {
        /// Text summary of the tracker response
        output: String,
        /// Structured payload for machine consumers
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
    Failure(ToolError),
}

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    pub outcome: ToolOutcome,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
///
/// | Tool | `duration_ms` | `entity_count` | `issue_key` |
/// |------|:---:|:---:|:---:|
/// | `get_issue` | yes | - | yes |
/// | `search_issues` | yes | yes | - |
/// | `create_issue` | yes | - | yes |
/// | `add_comment` | yes | - | yes |
/// | `transition_issue` | yes | - | yes |
/// | `validate_project` | yes | - | - |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Number of entities returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_count: Option<usize>,
    /// Issue affected or read by the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_key: Option<String>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Success {
                output: output.into(),
                data: None,
            },
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            outcome: ToolOutcome::Failure(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Attach a structured payload. Ignored on failures.
    pub fn with_data(mut self, value: serde_json::Value) -> Self {
        if let ToolOutcome::Success { data, .. } = &mut self.outcome {
            *data = Some(value);
        }
        self
    }

    /// Add duration metadata
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_entity_count(mut self, count: usize) -> Self {
        self.metadata.entity_count = Some(count);
        self
    }

    pub fn with_issue_key(mut self, key: impl Into<String>) -> Self {
        self.metadata.issue_key = Some(key.into());
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Success { .. })
    }

    /// Get the output content
    pub fn output(&self) -> Option<&str> {
        match &self.outcome {
            ToolOutcome::Success { output, .. } => Some(output),
            ToolOutcome::Failure(_) => None,
        }
    }

    /// Get the structured payload
    pub fn data(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            ToolOutcome::Success { data, .. } => data.as_ref(),
            ToolOutcome::Failure(_) => None,
        }
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        match &self.outcome {
            ToolOutcome::Success { .. } => None,
            ToolOutcome::Failure(e) => Some(e),
        }
    }
}
