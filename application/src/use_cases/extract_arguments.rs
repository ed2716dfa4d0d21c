//! Argument Extractor use case.
//!
//! Turns an instruction plus one tool's parameter list into a validated
//! [`ToolCall`]. The backend's answer is checked at this boundary: stray
//! keys are dropped, blanks count as absent, enum values are normalized,
//! and every missing required field is reported at once.

use crate::ports::llm_gateway::{DecisionRequest, DecisionTask, GatewayError, LlmGateway};
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::shared::decide_bounded;
use jira_agent_domain::{
    DefaultToolValidator, ExtractionDecision, ExtractionError, Instruction, PromptTemplate,
    ToolCall, ToolDefinition, ToolValidator,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during argument extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractArgumentsError {
    #[error("Language backend failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Invalid(#[from] ExtractionError),
}

/// Fills in a tool's parameters from an instruction.
pub struct ArgumentExtractor {
    gateway: Arc<dyn LlmGateway>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    validator: DefaultToolValidator,
    timeout: Option<Duration>,
}

impl ArgumentExtractor {
    pub fn new(gateway: Arc<dyn LlmGateway>, tool_schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            gateway,
            tool_schema,
            validator: DefaultToolValidator,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn extract(
        &self,
        instruction: &Instruction,
        definition: &ToolDefinition,
    ) -> Result<ToolCall, ExtractArgumentsError> {
        let request = DecisionRequest::new(
            DecisionTask::ExtractArguments,
            PromptTemplate::extraction_system(),
            PromptTemplate::extraction_prompt(instruction.content(), definition),
            self.tool_schema.extraction_schema(definition),
        );

        let answer = decide_bounded(self.gateway.as_ref(), &request, self.timeout).await?;
        let decision =
            ExtractionDecision::parse(&answer).map_err(|e| ExtractionError::Unparseable {
                tool: definition.name.clone(),
                reason: e.to_string(),
            })?;

        for stray in decision
            .arguments
            .keys()
            .filter(|k| definition.parameter(k).is_none())
        {
            debug!("Dropping stray argument '{}' for {}", stray, definition.name);
        }

        let call = self.validator.normalize(&decision.arguments, definition)?;
        debug!("Extracted arguments for {}: {:?}", call.tool_name, call.arguments);
        Ok(call)
    }
}
