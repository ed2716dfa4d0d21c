//! Tool Selector use case.
//!
//! Asks the backend which single tool (if any) performs an instruction, then
//! checks the answer against the live catalog. Only a name that resolves in
//! the catalog is ever returned.

use crate::ports::llm_gateway::{DecisionRequest, DecisionTask, GatewayError, LlmGateway};
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::shared::decide_bounded;
use jira_agent_domain::{DecisionParseError, Instruction, PromptTemplate, SelectionDecision, ToolSpec};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during tool selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Language backend failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Language backend returned an unusable selection: {0}")]
    Malformed(#[from] DecisionParseError),
}

/// Validated outcome of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Canonical catalog name, or None when no tool applies
    pub tool: Option<String>,
    /// The backend's stated reason, for logs
    pub reason: Option<String>,
}

impl Selection {
    fn none(reason: Option<String>) -> Self {
        Self { tool: None, reason }
    }
}

/// Picks at most one tool for an instruction.
pub struct ToolSelector {
    gateway: Arc<dyn LlmGateway>,
    tool_schema: Arc<dyn ToolSchemaPort>,
    timeout: Option<Duration>,
}

impl ToolSelector {
    pub fn new(gateway: Arc<dyn LlmGateway>, tool_schema: Arc<dyn ToolSchemaPort>) -> Self {
        Self {
            gateway,
            tool_schema,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Select a tool from `catalog`.
    ///
    /// A name the catalog does not know is treated as "no tool", never
    /// guessed at. Output that cannot be read as a selection is an error.
    pub async fn select(
        &self,
        instruction: &Instruction,
        catalog: &ToolSpec,
    ) -> Result<Selection, SelectionError> {
        let request = DecisionRequest::new(
            DecisionTask::SelectTool,
            PromptTemplate::selection_system(),
            PromptTemplate::selection_prompt(instruction.content(), catalog),
            self.tool_schema.selection_schema(catalog),
        );

        let answer = decide_bounded(self.gateway.as_ref(), &request, self.timeout).await?;
        let decision = SelectionDecision::parse(&answer)?;
        let reason = decision.reason().map(str::to_string);

        let Some(name) = decision.tool_name() else {
            debug!("No tool selected: {}", reason.as_deref().unwrap_or("no reason given"));
            return Ok(Selection::none(reason));
        };

        match catalog.resolve(name) {
            Some(canonical) => {
                debug!("Selected tool {} ({})", canonical, name);
                Ok(Selection {
                    tool: Some(canonical.to_string()),
                    reason,
                })
            }
            None => {
                warn!("Backend selected unknown tool '{}', ignoring", name);
                Ok(Selection::none(reason))
            }
        }
    }
}
