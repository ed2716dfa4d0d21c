//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how to describe them to the
//! backend" (infrastructure). The domain layer defines [`ToolDefinition`] and
//! [`ToolSpec`]; this port produces the JSON Schema the backend answers to.

use jira_agent_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Schema of a single tool's arguments.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Schema of every tool, in registration order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;

    /// Schema of the selection answer: `{"tool": <name> | null, "reason": ...}`.
    fn selection_schema(&self, spec: &ToolSpec) -> serde_json::Value;

    /// Schema of the extraction answer: `{"arguments": {...}}`.
    fn extraction_schema(&self, tool: &ToolDefinition) -> serde_json::Value;
}
