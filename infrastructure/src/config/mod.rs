//! Configuration file loading for jira-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`JIRA_SERVER`, `JIRA_USERNAME`, `JIRA_API_TOKEN`,
//!    `GEMINI_API_KEY`, `JIRA_AGENT_<SECTION>__<KEY>`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./jira-agent.toml` or `./.jira-agent.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/jira-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_LLM_BASE_URL, FileAgentConfig, FileConfig, FileJiraConfig,
    FileLlmConfig, FileLoggingConfig,
};
pub use loader::ConfigLoader;
