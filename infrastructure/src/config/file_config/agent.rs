//! Agent configuration from TOML (`[agent]` section)

use jira_agent_application::AgentParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request pipeline settings.
///
/// # Example
///
/// ```toml
/// [agent]
/// max_search_results = 20
/// default_issue_type = "Story"
/// issue_types = ["Story", "Bug", "Task"]   # default: [] accepts any type
/// statuses = ["To Do", "Done"]             # default: [] accepts any status
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Cap on `search_issues` results (default: 10)
    pub max_search_results: usize,
    /// Cap on issues listed by `issues <KEY>` (default: 50)
    pub max_context_issues: usize,
    /// Issue type when none is named (default: "Task")
    pub default_issue_type: String,
    /// Issue types the backend may choose from; empty accepts any
    pub issue_types: Vec<String>,
    /// Statuses the backend may target; empty accepts any
    pub statuses: Vec<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_search_results: 10,
            max_context_issues: 50,
            default_issue_type: "Task".to_string(),
            issue_types: Vec::new(),
            statuses: Vec::new(),
        }
    }
}

impl FileAgentConfig {
    /// Convert to application parameters. Each backend decision is bounded
    /// by `decision_timeout`.
    pub fn to_agent_params(&self, decision_timeout: Duration) -> AgentParams {
        AgentParams::default()
            .with_max_search_results(self.max_search_results)
            .with_max_context_issues(self.max_context_issues)
            .with_default_issue_type(&self.default_issue_type)
            .with_issue_types(self.issue_types.iter().cloned())
            .with_statuses(self.statuses.iter().cloned())
            .with_decision_timeout(Some(decision_timeout))
    }
}
