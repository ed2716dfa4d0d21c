//! Tool Registry
//!
//! The [`ToolRegistry`] pairs every [`ToolDefinition`] with the handler that
//! runs it and implements [`ToolExecutorPort`]. It is populated once at
//! startup and shared read-only behind an `Arc`.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ToolRegistry::new();
//! registry.register(get_issue_definition(), GetIssue::new(tracker.clone()))?;
//!
//! let call = ToolCall::new("get_issue").with_arg("issue_key", "SCRUM-1");
//! let result = registry.execute(&call).await;
//! ```
//!
//! # Execution
//!
//! 1. The tool name is resolved (exact, alias, unique case-insensitive)
//! 2. Arguments are validated strictly against the definition
//! 3. The handler runs; a returned [`ToolError`] becomes a failed result
//! 4. Duration is recorded in the result metadata

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use jira_agent_application::ports::tool_executor::ToolExecutorPort;
use jira_agent_domain::{
    DefaultToolValidator, DomainError, ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec,
    ToolValidator,
};
use tracing::{debug, info};

/// Runs one tool. Implementations live next to their definitions.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run a call whose arguments already passed validation.
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;
}

/// Catalog of tools plus the handler for each
pub struct ToolRegistry {
    spec: ToolSpec,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    validator: DefaultToolValidator,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            spec: ToolSpec::new(),
            handlers: HashMap::new(),
            validator: DefaultToolValidator,
        }
    }

    /// Register a tool. A second tool with the same name is rejected.
    pub fn register<H: ToolHandler + 'static>(
        &mut self,
        definition: ToolDefinition,
        handler: H,
    ) -> Result<(), DomainError> {
        let name = definition.name.clone();
        self.spec.register(definition)?;
        self.handlers.insert(name.clone(), Arc::new(handler));
        debug!(tool = %name, "Registered tool");
        Ok(())
    }

    /// Add alternative names for registered tools.
    pub fn with_aliases<I, A, C>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        self.spec = self.spec.register_aliases(aliases);
        self
    }

    /// All definitions in registration order
    pub fn list(&self) -> Vec<&ToolDefinition> {
        self.spec.all().collect()
    }

    /// Handler for a tool name (or alias)
    pub fn get(&self, name: &str) -> Result<Arc<dyn ToolHandler>, DomainError> {
        self.spec
            .resolve(name)
            .and_then(|canonical| self.handlers.get(canonical))
            .cloned()
            .ok_or_else(|| DomainError::UnknownTool(name.to_string()))
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_tools: self.spec.len(),
            high_risk_tools: self.spec.high_risk_tools().count(),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts for the startup log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_tools: usize,
    pub high_risk_tools: usize,
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let Some(definition) = self.spec.get_resolved(&call.tool_name) else {
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        };
        let handler = match self.get(&definition.name) {
            Ok(handler) => handler,
            Err(_) => {
                return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
            }
        };

        let mut call = call.clone();
        call.tool_name = definition.name.clone();
        if let Err(e) = self.validator.validate(&call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::extraction(e.to_string()));
        }

        let start = Instant::now();
        let result = match handler.handle(&call).await {
            Ok(result) => result,
            Err(e) => ToolResult::failure(&call.tool_name, e),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            tool = %call.tool_name,
            success = result.is_success(),
            duration_ms,
            "Tool executed"
        );
        result.with_duration(duration_ms)
    }
}
