//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These describe misuse of the tool catalog or malformed input values.
/// Registry misuse (`DuplicateTool`, `UnknownTool`) is a programming error
/// and is only expected to surface during startup wiring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Instruction cannot be empty")]
    EmptyInstruction,

    #[error("Invalid issue key: {0}")]
    InvalidIssueKey(String),

    #[error("Invalid project key: {0}")]
    InvalidProjectKey(String),
}

impl DomainError {
    /// Registry misuse errors are fatal at startup.
    pub fn is_registry_error(&self) -> bool {
        matches!(self, DomainError::DuplicateTool(_) | DomainError::UnknownTool(_))
    }
}
