//! transition_issue tool: move an issue to another status

use super::{issue_key, required};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{
    ParamType, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
    TrackerError,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool name constant
pub const TRANSITION_ISSUE: &str = "transition_issue";

/// Definition of transition_issue. An empty `statuses` list accepts any name.
pub fn transition_issue_definition(statuses: &[String]) -> ToolDefinition {
    let param_type = if statuses.is_empty() {
        ParamType::String
    } else {
        ParamType::Enum(statuses.to_vec())
    };

    ToolDefinition::new(
        TRANSITION_ISSUE,
        "Move a Jira issue to a new status (workflow step), like 'In Progress' or 'Done'.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "issue_key",
        "The issue key, like 'PROJ-123'.",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "target_status",
            "The status or transition name to move the issue to.",
            true,
        )
        .with_type(param_type),
    )
}

pub struct TransitionIssue {
    tracker: Arc<dyn TrackerPort>,
}

impl TransitionIssue {
    pub fn new(tracker: Arc<dyn TrackerPort>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl ToolHandler for TransitionIssue {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let key = issue_key(call)?;
        let target = required(call, "target_status")?;

        let available = self.tracker.transitions(&key).await?;
        let Some(transition) = available.iter().find(|t| t.matches(target)) else {
            let names: Vec<&str> = available.iter().map(|t| t.name.as_str()).collect();
            let listing = if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            };
            return Err(ToolError::invalid_transition(
                key.as_str(),
                format!(
                    "Transition '{}' not found for issue '{}'. Available transitions are: {}.",
                    target, key, listing
                ),
            ));
        };

        debug!("Applying transition {} ({}) to {}", transition.name, transition.id, key);
        self.tracker
            .transition_issue(&key, &transition.id)
            .await
            .map_err(|e| match e {
                TrackerError::Rejected { message, .. } => {
                    ToolError::invalid_transition(key.as_str(), message)
                }
                other => other.into(),
            })?;

        let status = match self.tracker.get_issue(&key).await {
            Ok(issue) => issue.status,
            Err(e) => {
                warn!("Could not re-read {} after transition: {}", key, e);
                transition.to_status.clone()
            }
        };

        Ok(ToolResult::success(
            TRANSITION_ISSUE,
            format!(
                "Successfully transitioned issue '{}' to status '{}' using transition '{}'.",
                key, status, transition.name
            ),
        )
        .with_data(json!({ "key": key.as_str(), "status": status }))
        .with_issue_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tracker::fake::FakeTracker;
    use jira_agent_domain::ErrorKind;

    fn tracker() -> Arc<FakeTracker> {
        Arc::new(
            FakeTracker::new()
                .with_issue("SCRUM-5", "Login", "To Do")
                .with_transition("SCRUM-5", "21", "Start Progress", "In Progress")
                .with_transition("SCRUM-5", "31", "Done", "Done"),
        )
    }

    fn call(target: &str) -> ToolCall {
        ToolCall::new(TRANSITION_ISSUE)
            .with_arg("issue_key", "SCRUM-5")
            .with_arg("target_status", target)
    }

    #[tokio::test]
    async fn test_matches_destination_status_case_insensitively() {
        let tracker = tracker();
        let result = TransitionIssue::new(tracker.clone())
            .handle(&call("in progress"))
            .await
            .unwrap();

        assert_eq!(
            result.output(),
            Some("Successfully transitioned issue 'SCRUM-5' to status 'In Progress' using transition 'Start Progress'.")
        );
        assert_eq!(tracker.issue("SCRUM-5").unwrap().status, "In Progress");
    }

    #[tokio::test]
    async fn test_unreachable_status_leaves_issue_alone() {
        let tracker = tracker();
        let err = TransitionIssue::new(tracker.clone())
            .handle(&call("Archived"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidTransition);
        assert!(err.message.contains("Available transitions are: Start Progress, Done."));
        assert_eq!(tracker.transitions_applied(), 0);
        assert_eq!(tracker.issue("SCRUM-5").unwrap().status, "To Do");
    }

    #[tokio::test]
    async fn test_workflow_refusal_is_invalid_transition() {
        let tracker = Arc::new(
            FakeTracker::new()
                .with_issue("SCRUM-5", "Login", "In Progress")
                .with_rejected_transition("SCRUM-5", "31", "Resolve", "Done"),
        );
        let err = TransitionIssue::new(tracker.clone())
            .handle(&call("Done"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidTransition);
        assert_eq!(err.key.as_deref(), Some("SCRUM-5"));
        assert!(err.message.contains("resolution"));
        assert_eq!(tracker.transitions_applied(), 1);
        assert_eq!(tracker.issue("SCRUM-5").unwrap().status, "In Progress");
    }

    #[tokio::test]
    async fn test_missing_issue() {
        let err = TransitionIssue::new(Arc::new(FakeTracker::new()))
            .handle(&call("Done"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
