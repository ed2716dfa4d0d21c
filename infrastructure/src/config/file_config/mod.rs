//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; secrets never appear in `Debug` output.

mod agent;
mod jira;
mod llm;
mod logging;

pub use agent::FileAgentConfig;
pub use jira::FileJiraConfig;
pub use llm::{DEFAULT_LLM_BASE_URL, FileLlmConfig};
pub use logging::FileLoggingConfig;

use crate::jira::JiraSettings;
use crate::llm::LlmSettings;
use jira_agent_application::AgentParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{section}.timeout_seconds cannot be 0")]
    InvalidTimeout { section: &'static str },

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("jira.server is not set (config file or JIRA_SERVER)")]
    MissingJiraServer,

    #[error("jira credentials are not set (JIRA_USERNAME and JIRA_API_TOKEN)")]
    MissingJiraCredentials,

    #[error("llm.api_key is not set (config file or GEMINI_API_KEY)")]
    MissingLlmApiKey,

    #[error("agent.{field} must be at least 1")]
    ZeroLimit { field: &'static str },

    #[error("agent.default_issue_type '{0}' is not one of agent.issue_types")]
    UnknownDefaultIssueType(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Tracker connection
    pub jira: FileJiraConfig,
    /// Language backend
    pub llm: FileLlmConfig,
    /// Request pipeline settings
    pub agent: FileAgentConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

pub(crate) fn redacted(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl FileConfig {
    /// Validate the configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = self.validate_settings();

        if is_blank(&self.jira.server) {
            issues.push(ConfigValidationError::MissingJiraServer);
        }
        if is_blank(&self.jira.username) || is_blank(&self.jira.api_token) {
            issues.push(ConfigValidationError::MissingJiraCredentials);
        }
        if is_blank(&self.llm.api_key) {
            issues.push(ConfigValidationError::MissingLlmApiKey);
        }

        issues
    }

    /// Checks that do not involve credentials (enough for `tools`).
    pub fn validate_settings(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.jira.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout { section: "jira" });
        }
        if self.llm.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout { section: "llm" });
        }
        if self.llm.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.agent.max_search_results == 0 {
            issues.push(ConfigValidationError::ZeroLimit {
                field: "max_search_results",
            });
        }
        if self.agent.max_context_issues == 0 {
            issues.push(ConfigValidationError::ZeroLimit {
                field: "max_context_issues",
            });
        }
        if !self.agent.issue_types.is_empty()
            && !self
                .agent
                .issue_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&self.agent.default_issue_type))
        {
            issues.push(ConfigValidationError::UnknownDefaultIssueType(
                self.agent.default_issue_type.clone(),
            ));
        }

        issues
    }

    pub fn jira_timeout(&self) -> Duration {
        Duration::from_secs(self.jira.timeout_seconds)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds)
    }

    /// Tracker connection settings, once server and credentials are present
    pub fn jira_settings(&self) -> Option<JiraSettings> {
        let present = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        Some(JiraSettings {
            server: present(&self.jira.server)?,
            username: present(&self.jira.username)?,
            api_token: present(&self.jira.api_token)?,
            timeout: self.jira_timeout(),
        })
    }

    /// Backend settings, once an API key is present
    pub fn llm_settings(&self) -> Option<LlmSettings> {
        let api_key = self.llm.api_key.clone().filter(|s| !s.trim().is_empty())?;
        Some(LlmSettings {
            base_url: self.llm.base_url.clone(),
            model: self.llm.model.clone(),
            api_key,
            temperature: self.llm.temperature,
            timeout: self.llm_timeout(),
        })
    }

    /// Application parameters. A decision may take half again the HTTP
    /// timeout before it is abandoned.
    pub fn agent_params(&self) -> AgentParams {
        let timeout = self.llm_timeout();
        self.agent.to_agent_params(timeout + timeout / 2)
    }
}
