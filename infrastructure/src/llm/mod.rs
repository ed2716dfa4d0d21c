//! Language backend adapters implementing
//! [`LlmGateway`](jira_agent_application::LlmGateway).

mod openai;

pub use openai::{LlmSettings, OpenAiCompatibleGateway};
