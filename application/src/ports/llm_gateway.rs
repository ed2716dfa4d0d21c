//! LLM Gateway port
//!
//! Defines the narrow interface to the language-understanding backend.
//! The backend is opaque and non-deterministic; the application layer only
//! ever asks it for a JSON decision and validates the answer itself.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Rate limited by the language backend")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// What the backend is being asked to decide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionTask {
    /// Pick one tool (or none) for an instruction
    SelectTool,
    /// Fill in a tool's parameters from an instruction
    ExtractArguments,
}

impl DecisionTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionTask::SelectTool => "select_tool",
            DecisionTask::ExtractArguments => "extract_arguments",
        }
    }
}

/// A single request/response call to the backend
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub task: DecisionTask,
    /// Role and output rules for the backend
    pub system_prompt: String,
    /// Instruction text plus tool or parameter listing
    pub prompt: String,
    /// JSON Schema the answer is expected to follow
    pub schema: serde_json::Value,
}

impl DecisionRequest {
    pub fn new(
        task: DecisionTask,
        system_prompt: impl Into<String>,
        prompt: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            task,
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            schema,
        }
    }
}

/// Gateway to the language-understanding backend
///
/// Implementations (adapters) live in the infrastructure layer. Tests use a
/// scripted implementation so selection and extraction are deterministic.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Identifier of the backing model, for logs
    fn model_name(&self) -> &str;

    /// Ask the backend for a decision. Returns the parsed JSON answer,
    /// unvalidated.
    async fn decide(&self, request: &DecisionRequest) -> Result<serde_json::Value, GatewayError>;
}
