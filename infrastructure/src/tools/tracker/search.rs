//! search_issues tool: JQL search

use super::required;
use crate::tools::registry::ToolHandler;
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};
use std::sync::Arc;

/// Tool name constant
pub const SEARCH_ISSUES: &str = "search_issues";

pub fn search_issues_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_ISSUES,
        "Search for Jira issues with a JQL query and list their keys and summaries.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "jql",
        "A JQL query built from the request, for example: project = \"PROJ\" AND status = \"To Do\" ORDER BY created DESC",
        true,
    ))
}

pub struct SearchIssues {
    tracker: Arc<dyn TrackerPort>,
    max_results: usize,
}

impl SearchIssues {
    pub fn new(tracker: Arc<dyn TrackerPort>, max_results: usize) -> Self {
        Self {
            tracker,
            max_results,
        }
    }
}

#[async_trait]
impl ToolHandler for SearchIssues {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let jql = required(call, "jql")?;
        let issues = self.tracker.search_issues(jql, self.max_results).await?;

        let output = if issues.is_empty() {
            format!("No issues found for JQL query: '{}'", jql)
        } else {
            let lines: Vec<String> = issues
                .iter()
                .map(|i| format!("- {}: {}", i.key, i.summary))
                .collect();
            format!("Found issues:\n{}", lines.join("\n"))
        };

        let count = issues.len();
        let data = serde_json::to_value(&issues).unwrap_or_default();
        Ok(ToolResult::success(SEARCH_ISSUES, output)
            .with_data(data)
            .with_entity_count(count))
    }
}
