//! Agent execution progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to show where a request is in the
//! selection → extraction → execution pipeline.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use jira_agent_domain::{ToolCall, ToolResult};

/// Progress notifier for a single agent request.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called before the backend is asked to pick a tool
    fn on_selection_start(&self) {}

    /// Called with the validated selection (None = no applicable tool)
    fn on_tool_selected(&self, _tool_name: Option<&str>) {}

    /// Called once arguments have been extracted and validated
    fn on_arguments_extracted(&self, _call: &ToolCall) {}

    /// Called before the tracker call is made
    fn on_tool_call(&self, _tool_name: &str) {}

    /// Called when the tool returns
    fn on_tool_result(&self, _result: &ToolResult) {}

    /// Called when the request ends without a tool result (no tool,
    /// selection or extraction failure)
    fn on_aborted(&self, _reason: &str) {}
}

/// No-op progress notifier
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
