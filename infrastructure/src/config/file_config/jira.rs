//! Tracker connection configuration (`[jira]` section)

use super::redacted;
use serde::{Deserialize, Serialize};

/// Jira server and credentials.
///
/// `server`, `username` and `api_token` usually come from the `JIRA_SERVER`,
/// `JIRA_USERNAME` and `JIRA_API_TOKEN` environment variables.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJiraConfig {
    /// Base URL, e.g. `https://example.atlassian.net`
    pub server: Option<String>,
    /// Account email or user name for basic auth
    pub username: Option<String>,
    /// API token for basic auth
    pub api_token: Option<String>,
    /// Per-request timeout (default: 30)
    pub timeout_seconds: u64,
}

impl Default for FileJiraConfig {
    fn default() -> Self {
        Self {
            server: None,
            username: None,
            api_token: None,
            timeout_seconds: 30,
        }
    }
}

impl std::fmt::Debug for FileJiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileJiraConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("api_token", &redacted(&self.api_token))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
