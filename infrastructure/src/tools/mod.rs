//! Tool implementations for the agent system
//!
//! This module provides the tracker operations the agent can route an
//! instruction to, the registry that dispatches them, and the JSON Schema
//! converter used when describing them to the language backend.

pub mod tracker;

mod registry;
mod schema;

pub use registry::{RegistryStats, ToolHandler, ToolRegistry};
pub use schema::JsonSchemaToolConverter;

use jira_agent_application::{AgentParams, TrackerPort};
use jira_agent_domain::{DomainError, ToolSpec};
use std::sync::Arc;
use tracker::{
    ADD_COMMENT, AddComment, CREATE_ISSUE, CreateIssue, GET_ISSUE, GetIssue, SEARCH_ISSUES,
    SearchIssues, TRANSITION_ISSUE, TransitionIssue, VALIDATE_PROJECT, ValidateProject,
};

/// Alternative spellings backends tend to produce
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("get-issue", GET_ISSUE),
    ("issue_details", GET_ISSUE),
    ("search", SEARCH_ISSUES),
    ("search-issues", SEARCH_ISSUES),
    ("create-issue", CREATE_ISSUE),
    ("add-comment", ADD_COMMENT),
    ("comment", ADD_COMMENT),
    ("transition-issue", TRANSITION_ISSUE),
    ("transition", TRANSITION_ISSUE),
    ("validate-project", VALIDATE_PROJECT),
];

/// The catalog alone, without handlers (for listing tools offline).
pub fn jira_tool_spec(params: &AgentParams) -> Result<ToolSpec, DomainError> {
    let mut spec = ToolSpec::new();
    spec.register(tracker::get_issue_definition())?;
    spec.register(tracker::search_issues_definition())?;
    spec.register(tracker::create_issue_definition(
        &params.issue_types,
        &params.default_issue_type,
    ))?;
    spec.register(tracker::add_comment_definition())?;
    spec.register(tracker::transition_issue_definition(&params.statuses))?;
    spec.register(tracker::validate_project_definition())?;
    Ok(spec.register_aliases(DEFAULT_ALIASES.iter().copied()))
}

/// Build the registry of all six tracker tools over one tracker.
pub fn jira_tool_registry(
    tracker: Arc<dyn TrackerPort>,
    params: &AgentParams,
) -> Result<ToolRegistry, DomainError> {
    let mut registry = ToolRegistry::new();
    registry.register(tracker::get_issue_definition(), GetIssue::new(tracker.clone()))?;
    registry.register(
        tracker::search_issues_definition(),
        SearchIssues::new(tracker.clone(), params.max_search_results),
    )?;
    registry.register(
        tracker::create_issue_definition(&params.issue_types, &params.default_issue_type),
        CreateIssue::new(tracker.clone(), params.default_issue_type.clone()),
    )?;
    registry.register(tracker::add_comment_definition(), AddComment::new(tracker.clone()))?;
    registry.register(
        tracker::transition_issue_definition(&params.statuses),
        TransitionIssue::new(tracker.clone()),
    )?;
    registry.register(
        tracker::validate_project_definition(),
        ValidateProject::new(tracker),
    )?;

    Ok(registry.with_aliases(DEFAULT_ALIASES.iter().copied()))
}
