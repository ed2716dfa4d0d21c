//! Application layer for jira-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::AgentParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{DecisionRequest, DecisionTask, GatewayError, LlmGateway},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
    tracker::TrackerPort,
};
pub use use_cases::extract_arguments::{ArgumentExtractor, ExtractArgumentsError};
pub use use_cases::project_context::{ContextProjector, ProjectionError};
pub use use_cases::run_agent::{AgentResponse, NO_ACTION_RESPONSE, RunAgentError, RunAgentUseCase};
pub use use_cases::select_tool::{Selection, SelectionError, ToolSelector};
