//! validate_project tool: does a project key exist?
//!
//! An unknown project is a normal answer (`valid: false`), not a failure.

use super::required;
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{
    ProjectKey, RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
};
use serde_json::json;
use std::sync::Arc;

/// Tool name constant
pub const VALIDATE_PROJECT: &str = "validate_project";

pub fn validate_project_definition() -> ToolDefinition {
    ToolDefinition::new(
        VALIDATE_PROJECT,
        "Check whether a Jira project key exists and is accessible.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "project_key",
        "The project key, like 'PROJ'.",
        true,
    ))
}

pub struct ValidateProject {
    tracker: Arc<dyn TrackerPort>,
}

impl ValidateProject {
    pub fn new(tracker: Arc<dyn TrackerPort>) -> Self {
        Self { tracker }
    }

    fn not_found(raw: &str) -> ToolResult {
        ToolResult::success(
            VALIDATE_PROJECT,
            format!(
                "Project with key '{}' was not found. Please provide a correct project key.",
                raw
            ),
        )
        .with_data(json!({ "valid": false, "key": raw }))
    }
}

#[async_trait]
impl ToolHandler for ValidateProject {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let raw = required(call, "project_key")?;
        let Ok(key) = ProjectKey::parse(raw) else {
            return Ok(Self::not_found(raw.trim()));
        };

        match self.tracker.get_project(&key).await? {
            Some(project) => Ok(ToolResult::success(
                VALIDATE_PROJECT,
                format!(
                    "Project with key '{}' and name '{}' is valid and accessible.",
                    project.key, project.name
                ),
            )
            .with_data(json!({ "valid": true, "key": project.key, "name": project.name }))),
            None => Ok(Self::not_found(key.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tracker::fake::FakeTracker;

    fn call(key: &str) -> ToolCall {
        ToolCall::new(VALIDATE_PROJECT).with_arg("project_key", key)
    }

    #[tokio::test]
    async fn test_valid_project_is_idempotent() {
        let tracker = Arc::new(FakeTracker::new().with_project("SCRUM", "Scrum", &["Task"]));
        let tool = ValidateProject::new(tracker.clone());

        let first = tool.handle(&call("SCRUM")).await.unwrap();
        let second = tool.handle(&call("SCRUM")).await.unwrap();

        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.data().unwrap()["valid"], true);
        assert_eq!(tracker.creates(), 0);
        assert_eq!(tracker.transitions_applied(), 0);
    }

    #[tokio::test]
    async fn test_unknown_project_is_an_answer() {
        let tracker = Arc::new(FakeTracker::new());
        let result = ValidateProject::new(tracker).handle(&call("nope")).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.data().unwrap()["valid"], false);
        assert!(result.output().unwrap().contains("'NOPE' was not found"));
    }

    #[tokio::test]
    async fn test_malformed_key_skips_tracker() {
        let tracker = Arc::new(FakeTracker::new());
        let result = ValidateProject::new(tracker.clone())
            .handle(&call("my project"))
            .await
            .unwrap();

        assert_eq!(result.data().unwrap()["valid"], false);
        assert_eq!(tracker.calls(), 0);
    }
}
