//! Tracker port
//!
//! Defines the calls the application layer makes against the remote issue
//! tracker. Every method is a single request/response round trip; nothing
//! is cached between calls.

use async_trait::async_trait;
use jira_agent_domain::{
    Issue, IssueKey, IssueSummary, NewIssue, Project, ProjectKey, TrackerError, Transition,
};

/// Port for issue-tracker access
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait TrackerPort: Send + Sync {
    /// Fetch one issue, including its comments
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue, TrackerError>;

    /// Run a search in the tracker's query language
    async fn search_issues(
        &self,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<IssueSummary>, TrackerError>;

    /// Look up a project. `Ok(None)` means the key does not exist.
    async fn get_project(&self, key: &ProjectKey) -> Result<Option<Project>, TrackerError>;

    /// All projects visible to the configured credential
    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError>;

    /// Issue type names available in a project
    async fn issue_types(&self, project: &ProjectKey) -> Result<Vec<String>, TrackerError>;

    /// Create an issue and return its key
    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueKey, TrackerError>;

    /// Append a comment to an issue
    async fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError>;

    /// Transitions reachable from the issue's current status
    async fn transitions(&self, key: &IssueKey) -> Result<Vec<Transition>, TrackerError>;

    /// Apply a transition by id
    async fn transition_issue(&self, key: &IssueKey, transition_id: &str)
    -> Result<(), TrackerError>;

    /// Issues of one project, newest first
    async fn project_issues(
        &self,
        project: &ProjectKey,
        max_results: usize,
    ) -> Result<Vec<IssueSummary>, TrackerError> {
        let jql = format!("project = \"{}\" ORDER BY created DESC", project);
        self.search_issues(&jql, max_results).await
    }
}
