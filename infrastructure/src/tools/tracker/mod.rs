//! **Tracker Tools**: the six operations the agent can route to
//!
//! | Tool | Description | Risk |
//! |------|-------------|------|
//! | `get_issue` | Summary, status and assignee of one issue | Low |
//! | `search_issues` | JQL search, capped result count | Low |
//! | `validate_project` | Whether a project key exists | Low |
//! | `create_issue` | New issue in an existing project | High |
//! | `add_comment` | Append a comment to an issue | High |
//! | `transition_issue` | Move an issue to another status | High |
//!
//! Each tool is a [`ToolHandler`](super::ToolHandler) holding the shared
//! [`TrackerPort`](jira_agent_application::TrackerPort). Every handler makes
//! single round-trip calls and never retries.

mod add_comment;
mod create_issue;
mod get_issue;
mod search;
mod transition;
mod validate_project;

#[cfg(test)]
pub(crate) mod fake;

pub use add_comment::{ADD_COMMENT, AddComment, add_comment_definition};
pub use create_issue::{CREATE_ISSUE, CreateIssue, create_issue_definition};
pub use get_issue::{GET_ISSUE, GetIssue, get_issue_definition};
pub use search::{SEARCH_ISSUES, SearchIssues, search_issues_definition};
pub use transition::{TRANSITION_ISSUE, TransitionIssue, transition_issue_definition};
pub use validate_project::{VALIDATE_PROJECT, ValidateProject, validate_project_definition};

use jira_agent_domain::{IssueKey, ProjectKey, ToolCall, ToolError};

pub(crate) fn required<'a>(call: &'a ToolCall, name: &str) -> Result<&'a str, ToolError> {
    call.require_string(name).map_err(ToolError::extraction)
}

pub(crate) fn issue_key(call: &ToolCall) -> Result<IssueKey, ToolError> {
    let raw = required(call, "issue_key")?;
    IssueKey::parse(raw)
        .map_err(|_| ToolError::extraction(format!("'{}' is not a valid issue key", raw)))
}

pub(crate) fn project_key(call: &ToolCall) -> Result<ProjectKey, ToolError> {
    let raw = required(call, "project_key")?;
    ProjectKey::parse(raw).map_err(|_| ToolError::invalid_project(raw))
}
