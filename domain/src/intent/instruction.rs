//! Instruction value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A caller's natural-language request (Value Object)
///
/// The content is kept exactly as supplied. Only emptiness is checked;
/// the text is never trimmed or rewritten, so free-text arguments can be
/// extracted with the caller's literal wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    content: String,
}

impl Instruction {
    /// Create a new instruction, rejecting empty or whitespace-only text
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyInstruction)
        } else {
            Ok(Self { content })
        }
    }

    /// Try to create a new instruction, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        Self::parse(content).ok()
    }

    /// Get the instruction text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Instruction {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Instruction::parse(s)
    }
}
