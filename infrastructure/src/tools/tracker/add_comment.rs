//! add_comment tool: append a comment to an issue

use super::{issue_key, required};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};
use std::sync::Arc;

/// Tool name constant
pub const ADD_COMMENT: &str = "add_comment";

pub fn add_comment_definition() -> ToolDefinition {
    ToolDefinition::new(
        ADD_COMMENT,
        "Add a comment to a Jira issue.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "issue_key",
        "The issue key, like 'PROJ-123'.",
        true,
    ))
    .with_parameter(
        ToolParameter::new("comment", "The comment text, exactly as written.", true).free_text(),
    )
}

pub struct AddComment {
    tracker: Arc<dyn TrackerPort>,
}

impl AddComment {
    pub fn new(tracker: Arc<dyn TrackerPort>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ToolHandler for AddComment {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let key = issue_key(call)?;
        let body = required(call, "comment")?;

        self.tracker.add_comment(&key, body).await?;
        Ok(ToolResult::success(
            ADD_COMMENT,
            format!("Successfully added comment to issue {}.", key),
        )
        .with_issue_key(key.as_str()))
    }
}
