//! Infrastructure layer for jira-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Jira REST client, the language backend
//! gateway, the tool registry and configuration file loading.

pub mod config;
pub mod jira;
pub mod llm;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileJiraConfig,
    FileLlmConfig, FileLoggingConfig,
};
pub use jira::{JiraClient, JiraSettings};
pub use llm::{LlmSettings, OpenAiCompatibleGateway};
pub use logging::JsonlConversationLogger;
pub use tools::{
    DEFAULT_ALIASES, JsonSchemaToolConverter, RegistryStats, ToolHandler, ToolRegistry,
    jira_tool_registry, jira_tool_spec,
};
