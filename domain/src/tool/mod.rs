//! Tool domain module
//!
//! This module defines the core abstractions for the agent's **Tool System**:
//! the fixed set of tracker operations the agent may route an instruction to.
//!
//! # Overview
//!
//! Every tool is defined by a [`ToolDefinition`] (name, description, typed
//! parameters, risk level), invoked via a [`ToolCall`], and returns a
//! [`ToolResult`] whose outcome is either a success payload or a [`ToolError`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)    │    │ (validated)  │    │ (outcome)    │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        ├─ aliases: "get-issue" → "get_issue"
//!        └─ tools:   "get_issue" → ToolDefinition (registration order)
//! ```
//!
//! # Name Resolution
//!
//! Language backends do not always echo tool names exactly. [`ToolSpec::resolve`]
//! accepts a canonical name, a registered alias, or a unique case-insensitive
//! match. Anything else resolves to `None` and is never executed.
//!
//! # Risk Levels
//!
//! | Risk | Tools | Tracker effect |
//! |------|-------|----------------|
//! | **Low** | `get_issue`, `search_issues`, `validate_project` | read-only |
//! | **High** | `create_issue`, `add_comment`, `transition_issue` | mutates state |
//!
//! # Key Types
//!
//! - [`ToolSpec`]: Ordered catalog of tools + alias mappings
//! - [`ToolDefinition`] / [`ToolParameter`]: Schema for a single tool
//! - [`ToolCall`]: An invocation with validated arguments
//! - [`ToolResult`]: Tagged execution outcome with metadata
//! - [`ToolValidator`]: Pure argument validation and normalization

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ExtractionError, ToolValidator};
pub use value_objects::{ErrorKind, ToolError, ToolOutcome, ToolResult, ToolResultMetadata};
