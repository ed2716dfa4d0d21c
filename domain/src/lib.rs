//! Domain layer for jira-agent
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A fixed catalog of tracker operations ([`ToolSpec`]). Each tool declares
//! typed parameters; arguments coming back from the language backend are
//! validated against them before anything touches the tracker.
//!
//! ## Intent
//!
//! An [`Instruction`] is the caller's raw request. The backend's answers are
//! parsed into [`SelectionDecision`] and [`ExtractionDecision`].
//!
//! ## Tracker
//!
//! Read-only projections of projects and issues, key value objects, and the
//! [`TrackerError`] taxonomy.

pub mod core;
pub mod intent;
pub mod prompt;
pub mod tool;
pub mod tracker;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use intent::{DecisionParseError, ExtractionDecision, Instruction, SelectionDecision};
pub use prompt::PromptTemplate;
pub use tool::{
    entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ExtractionError, ToolValidator},
    value_objects::{ErrorKind, ToolError, ToolOutcome, ToolResult, ToolResultMetadata},
};
pub use tracker::{
    Comment, Issue, IssueKey, IssueSummary, NewIssue, Project, ProjectKey, TrackerError,
    Transition,
};
