//! get_issue tool: read one issue

use super::issue_key;
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};
use std::sync::Arc;

/// Tool name constant
pub const GET_ISSUE: &str = "get_issue";

pub fn get_issue_definition() -> ToolDefinition {
    ToolDefinition::new(
        GET_ISSUE,
        "Retrieve the details of one Jira issue: summary, status and assignee.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "issue_key",
        "The issue key, like 'PROJ-123'.",
        true,
    ))
}

pub struct GetIssue {
    tracker: Arc<dyn TrackerPort>,
}

impl GetIssue {
    pub fn new(tracker: Arc<dyn TrackerPort>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ToolHandler for GetIssue {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let key = issue_key(call)?;
        let issue = self.tracker.get_issue(&key).await?;

        let output = format!(
            "Issue: {}, Summary: {}, Status: {}, Assignee: {}",
            issue.key,
            issue.summary,
            issue.status,
            issue.assignee_display()
        );
        let data = serde_json::to_value(&issue).unwrap_or_default();
        Ok(ToolResult::success(GET_ISSUE, output)
            .with_data(data)
            .with_issue_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tracker::fake::FakeTracker;
    use jira_agent_domain::ErrorKind;

    #[tokio::test]
    async fn test_found_issue_lists_details() {
        let tracker = Arc::new(FakeTracker::new().with_issue("SCRUM-123", "Login page", "To Do"));
        let result = GetIssue::new(tracker)
            .handle(&ToolCall::new(GET_ISSUE).with_arg("issue_key", "SCRUM-123"))
            .await
            .unwrap();

        assert_eq!(
            result.output(),
            Some("Issue: SCRUM-123, Summary: Login page, Status: To Do, Assignee: Unassigned")
        );
        assert_eq!(result.metadata.issue_key.as_deref(), Some("SCRUM-123"));
        assert!(result.data().unwrap()["assignee"].is_null());
    }

    #[tokio::test]
    async fn test_missing_issue_is_not_found() {
        let tracker = Arc::new(FakeTracker::new());
        let err = GetIssue::new(tracker)
            .handle(&ToolCall::new(GET_ISSUE).with_arg("issue_key", "scrum-123"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.key.as_deref(), Some("SCRUM-123"));
    }

    #[tokio::test]
    async fn test_malformed_key_is_extraction_error() {
        let tracker = Arc::new(FakeTracker::new());
        let err = GetIssue::new(tracker.clone())
            .handle(&ToolCall::new(GET_ISSUE).with_arg("issue_key", "login page"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Extraction);
        assert_eq!(tracker.calls(), 0);
    }
}
