//! Context Projector use case.
//!
//! Read-only path that fetches tracker entities and hands them back in a
//! stable shape for machine consumers. No selection or extraction happens
//! here and nothing is cached: every call goes to the tracker.

use crate::config::AgentParams;
use crate::ports::tracker::TrackerPort;
use jira_agent_domain::{
    ErrorKind, Issue, IssueKey, IssueSummary, Project, ProjectKey, ToolError, TrackerError,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Structured projection failure: `{kind, key, message}`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ProjectionError {
    pub kind: ErrorKind,
    pub key: Option<String>,
    pub message: String,
}

impl ProjectionError {
    /// HTTP-equivalent status. Domain rejections are 4xx, never 500.
    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

impl From<ToolError> for ProjectionError {
    fn from(err: ToolError) -> Self {
        Self {
            kind: err.kind,
            key: err.key,
            message: err.message,
        }
    }
}

impl From<TrackerError> for ProjectionError {
    fn from(err: TrackerError) -> Self {
        ToolError::from(err).into()
    }
}

/// Fetches and serializes tracker entities.
pub struct ContextProjector {
    tracker: Arc<dyn TrackerPort>,
    max_issues: usize,
}

impl ContextProjector {
    pub fn new(tracker: Arc<dyn TrackerPort>, params: &AgentParams) -> Self {
        Self {
            tracker,
            max_issues: params.max_context_issues,
        }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ProjectionError> {
        let projects = self.tracker.list_projects().await?;
        debug!("Projected {} projects", projects.len());
        Ok(projects)
    }

    /// Issues of one project, newest first. Unknown project is an error;
    /// a project without issues is an empty list.
    pub async fn list_issues(&self, project_key: &str) -> Result<Vec<IssueSummary>, ProjectionError> {
        let key = ProjectKey::parse(project_key)
            .map_err(|_| ToolError::invalid_project(project_key.trim()))?;

        if self.tracker.get_project(&key).await?.is_none() {
            info!("Context request for unknown project {}", key);
            return Err(ToolError::invalid_project(key.as_str()).into());
        }

        let issues = self.tracker.project_issues(&key, self.max_issues).await?;
        debug!("Projected {} issues for {}", issues.len(), key);
        Ok(issues)
    }

    pub async fn get_issue(&self, issue_key: &str) -> Result<Issue, ProjectionError> {
        let key = IssueKey::parse(issue_key).map_err(|_| ToolError::not_found(issue_key.trim()))?;
        Ok(self.tracker.get_issue(&key).await?)
    }
}
