//! create_issue tool: new issue in an existing project

use super::{project_key, required};
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{
    NewIssue, ParamType, ProjectKey, RiskLevel, ToolCall, ToolDefinition, ToolError,
    ToolParameter, ToolResult, TrackerError,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool name constant
pub const CREATE_ISSUE: &str = "create_issue";

/// Definition of create_issue. An empty `issue_types` list accepts any type.
pub fn create_issue_definition(issue_types: &[String], default_type: &str) -> ToolDefinition {
    let param_type = if issue_types.is_empty() {
        ParamType::String
    } else {
        ParamType::Enum(issue_types.to_vec())
    };

    ToolDefinition::new(
        CREATE_ISSUE,
        "Create a new Jira issue in a project with a summary, an optional description and an issue type.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "project_key",
        "The project key, like 'PROJ'.",
        true,
    ))
    .with_parameter(
        ToolParameter::new("summary", "The issue summary (title), exactly as written.", true)
            .free_text(),
    )
    .with_parameter(
        ToolParameter::new("description", "The issue description, exactly as written.", false)
            .free_text(),
    )
    .with_parameter(
        ToolParameter::new("issue_type", "The issue type.", false)
            .with_type(param_type)
            .with_default(default_type),
    )
}

pub struct CreateIssue {
    tracker: Arc<dyn TrackerPort>,
    default_type: String,
}

impl CreateIssue {
    pub fn new(tracker: Arc<dyn TrackerPort>, default_type: impl Into<String>) -> Self {
        Self {
            tracker,
            default_type: default_type.into(),
        }
    }

    /// Turn an issue-type rejection into a message listing the project's types.
    /// A failed lookup is reported as itself.
    async fn explain_issue_type(&self, project: &ProjectKey, issue_type: &str) -> ToolError {
        match self.tracker.issue_types(project).await {
            Ok(types) if !types.is_empty() => ToolError::rejected(format!(
                "The issue type '{}' is likely invalid for project '{}'. Please use one of the following available issue types: {}.",
                issue_type,
                project,
                types.join(", ")
            ))
            .with_key(project.as_str()),
            Ok(_) => ToolError::rejected(format!(
                "Failed to create issue with type '{}'. It might be an invalid issue type for project '{}'.",
                issue_type, project
            ))
            .with_key(project.as_str()),
            Err(e) => e.into(),
        }
    }
}

#[async_trait]
impl ToolHandler for CreateIssue {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let project = project_key(call)?;
        let summary = required(call, "summary")?;
        let issue_type = call
            .get_string("issue_type")
            .unwrap_or(self.default_type.as_str());

        if self.tracker.get_project(&project).await?.is_none() {
            debug!("Refusing to create issue in unknown project {}", project);
            return Err(ToolError::invalid_project(project.as_str()));
        }

        let new_issue = NewIssue {
            project_key: project.to_string(),
            issue_type: issue_type.to_string(),
            summary: summary.to_string(),
            description: call.get_string("description").map(str::to_string),
        };

        match self.tracker.create_issue(&new_issue).await {
            Ok(key) => Ok(ToolResult::success(
                CREATE_ISSUE,
                format!("Successfully created issue {}.", key),
            )
            .with_data(json!({ "key": key.as_str() }))
            .with_issue_key(key.as_str())),
            Err(e @ TrackerError::Rejected { .. }) if e.mentions_field("issuetype") => {
                warn!("Issue type '{}' rejected for {}", issue_type, project);
                Err(self.explain_issue_type(&project, issue_type).await)
            }
            Err(e) => Err(e.into()),
        }
    }
}
