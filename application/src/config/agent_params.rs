//! Agent parameters: request pipeline control.
//!
//! [`AgentParams`] groups the static parameters that control
//! [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase) and
//! [`ContextProjector`](crate::use_cases::project_context::ContextProjector).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request pipeline parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentParams {
    /// Cap on issues returned by `search_issues`.
    pub max_search_results: usize,
    /// Cap on issues returned by the context projection.
    pub max_context_issues: usize,
    /// Issue type used when the instruction names none.
    pub default_issue_type: String,
    /// Allowed values for `create_issue.issue_type`. Empty means any; the
    /// tracker's own issue-type check decides.
    pub issue_types: Vec<String>,
    /// Allowed values for `transition_issue.target_status`. Empty means any;
    /// the issue's available transitions decide.
    pub statuses: Vec<String>,
    /// Upper bound on each backend decision (selection or extraction).
    pub decision_timeout: Option<Duration>,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            max_search_results: 10,
            max_context_issues: 50,
            default_issue_type: "Task".to_string(),
            issue_types: Vec::new(),
            statuses: Vec::new(),
            decision_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl AgentParams {
    // ==================== Builder Methods ====================

    pub fn with_max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = max;
        self
    }

    pub fn with_max_context_issues(mut self, max: usize) -> Self {
        self.max_context_issues = max;
        self
    }

    pub fn with_default_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.default_issue_type = issue_type.into();
        self
    }

    pub fn with_issue_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issue_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tracker_conventions() {
        let params = AgentParams::default();
        assert_eq!(params.max_search_results, 10);
        assert_eq!(params.max_context_issues, 50);
        assert_eq!(params.default_issue_type, "Task");
        assert!(params.issue_types.is_empty());
        assert!(params.statuses.is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let params = AgentParams::default()
            .with_max_search_results(5)
            .with_statuses(["To Do", "Done"])
            .with_issue_types(["Bug"])
            .with_decision_timeout(None);

        assert_eq!(params.max_search_results, 5);
        assert_eq!(params.statuses.len(), 2);
        assert_eq!(params.issue_types, vec!["Bug".to_string()]);
        assert!(params.decision_timeout.is_none());
    }
}
