//! Run Agent use case
//!
//! Orchestrates one natural-language request end to end:
//! 1. Validate - reject empty instructions before any backend call
//! 2. Select - pick at most one tool ([`ToolSelector`])
//! 3. Extract - fill in the tool's parameters ([`ArgumentExtractor`])
//! 4. Execute - run the tool against the tracker ([`ToolExecutorPort`])
//! 5. Render - fold the outcome into a single response text
//!
//! Requests are independent. Nothing is remembered between calls.

use crate::config::AgentParams;
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::extract_arguments::{ArgumentExtractor, ExtractArgumentsError};
use crate::use_cases::select_tool::{SelectionError, ToolSelector};
use jira_agent_domain::util::{as_sentence, truncate_str};
use jira_agent_domain::{ErrorKind, Instruction, ToolResult};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Reply given when no tool applies to the instruction
pub const NO_ACTION_RESPONSE: &str = "I could not determine an action for that request.";

/// Errors that can stop a request before a tool runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunAgentError {
    #[error("Prompt cannot be empty.")]
    EmptyInstruction,

    #[error("Tool selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("Tool {0} is not available")]
    UnknownTool(String),

    #[error("Argument extraction failed: {0}")]
    Extraction(#[from] ExtractArgumentsError),
}

impl RunAgentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunAgentError::EmptyInstruction => ErrorKind::Extraction,
            RunAgentError::Selection(_) => ErrorKind::Selection,
            RunAgentError::UnknownTool(_) => ErrorKind::UnknownTool,
            RunAgentError::Extraction(ExtractArgumentsError::Gateway(_)) => ErrorKind::Selection,
            RunAgentError::Extraction(ExtractArgumentsError::Invalid(_)) => ErrorKind::Extraction,
        }
    }

    /// One sentence suitable for the caller
    pub fn user_message(&self) -> String {
        match self {
            RunAgentError::EmptyInstruction => self.to_string(),
            RunAgentError::Selection(SelectionError::Malformed(_))
            | RunAgentError::Selection(SelectionError::Gateway(GatewayError::InvalidResponse(_)))
            | RunAgentError::Extraction(ExtractArgumentsError::Gateway(
                GatewayError::InvalidResponse(_),
            )) => "I could not understand which action to take, please rephrase the request."
                .to_string(),
            RunAgentError::Selection(SelectionError::Gateway(_))
            | RunAgentError::Extraction(ExtractArgumentsError::Gateway(_)) => {
                "I could not reach the language backend, please try again later.".to_string()
            }
            RunAgentError::UnknownTool(name) => format!("Tool {} is not available.", name),
            RunAgentError::Extraction(ExtractArgumentsError::Invalid(e)) => {
                as_sentence(&e.to_string())
            }
        }
    }
}

/// Response to one instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentResponse {
    pub response: String,
    /// Tool that was run, if any
    #[serde(skip)]
    pub tool: Option<String>,
    /// Failure classification, when the request did not succeed
    #[serde(skip)]
    pub error: Option<ErrorKind>,
}

impl AgentResponse {
    fn no_action() -> Self {
        Self {
            response: NO_ACTION_RESPONSE.to_string(),
            tool: None,
            error: None,
        }
    }

    fn from_result(result: &ToolResult) -> Self {
        match result.error() {
            None => Self {
                response: result.output().unwrap_or_default().to_string(),
                tool: Some(result.tool_name.clone()),
                error: None,
            },
            Some(err) => Self {
                response: as_sentence(&err.message),
                tool: Some(result.tool_name.clone()),
                error: Some(err.kind),
            },
        }
    }

    fn from_error(err: &RunAgentError, tool: Option<String>) -> Self {
        Self {
            response: err.user_message(),
            tool,
            error: Some(err.kind()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Use case for running a single agent request.
pub struct RunAgentUseCase {
    selector: ToolSelector,
    extractor: ArgumentExtractor,
    tool_executor: Arc<dyn ToolExecutorPort>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunAgentUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tool_executor: Arc<dyn ToolExecutorPort>,
        tool_schema: Arc<dyn ToolSchemaPort>,
        params: &AgentParams,
    ) -> Self {
        Self {
            selector: ToolSelector::new(gateway.clone(), tool_schema.clone())
                .with_timeout(params.decision_timeout),
            extractor: ArgumentExtractor::new(gateway, tool_schema)
                .with_timeout(params.decision_timeout),
            tool_executor,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run one instruction.
    ///
    /// Only an empty instruction is returned as `Err`; every later failure
    /// is folded into the response text and classified in
    /// [`AgentResponse::error`].
    pub async fn execute(
        &self,
        prompt: &str,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<AgentResponse, RunAgentError> {
        let instruction = Instruction::parse(prompt).map_err(|_| RunAgentError::EmptyInstruction)?;
        info!("Agent request: {}", truncate_str(instruction.content(), 100));
        self.conversation_logger.log(ConversationEvent::new(
            "instruction",
            json!({ "content": instruction.content() }),
        ));

        let mut selected = None;
        let response = match self.run(&instruction, &mut selected, progress).await {
            Ok(response) => response,
            Err(err) => {
                warn!("Agent request failed: {}", err);
                progress.on_aborted(&err.user_message());
                AgentResponse::from_error(&err, selected)
            }
        };
        Ok(response)
    }

    async fn run(
        &self,
        instruction: &Instruction,
        selected: &mut Option<String>,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<AgentResponse, RunAgentError> {
        let catalog = self.tool_executor.tool_spec();

        progress.on_selection_start();
        let selection = self.selector.select(instruction, catalog).await?;
        progress.on_tool_selected(selection.tool.as_deref());
        self.conversation_logger.log(ConversationEvent::new(
            "tool_selected",
            json!({ "tool": selection.tool, "reason": selection.reason }),
        ));

        let Some(tool_name) = selection.tool else {
            info!("No applicable tool");
            progress.on_aborted(NO_ACTION_RESPONSE);
            return Ok(AgentResponse::no_action());
        };
        *selected = Some(tool_name.clone());

        let definition = self
            .tool_executor
            .get_tool(&tool_name)
            .ok_or_else(|| RunAgentError::UnknownTool(tool_name.clone()))?;

        let call = self.extractor.extract(instruction, definition).await?;
        progress.on_arguments_extracted(&call);
        self.conversation_logger.log(ConversationEvent::new(
            "arguments_extracted",
            json!({ "tool": call.tool_name, "arguments": call.arguments }),
        ));

        progress.on_tool_call(&call.tool_name);
        let result = self.tool_executor.execute(&call).await;
        progress.on_tool_result(&result);
        self.conversation_logger.log(ConversationEvent::new(
            "tool_executed",
            json!({
                "tool": result.tool_name,
                "success": result.is_success(),
                "error": result.error().map(|e| e.kind.as_code()),
                "duration_ms": result.metadata.duration_ms,
            }),
        ));

        info!(
            "Tool {} finished ({})",
            result.tool_name,
            if result.is_success() { "ok" } else { "failed" }
        );
        Ok(AgentResponse::from_result(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_progress::NoAgentProgress;
    use crate::test_support::{RecordingExecutor, ScriptedGateway, StaticSchema};
    use jira_agent_domain::ToolError;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    fn use_case(
        answers: Vec<Value>,
        results: Vec<ToolResult>,
    ) -> (RunAgentUseCase, Arc<ScriptedGateway>, Arc<RecordingExecutor>) {
        let gateway = Arc::new(ScriptedGateway::new(answers));
        let executor = Arc::new(RecordingExecutor::new(results));
        let use_case = RunAgentUseCase::new(
            gateway.clone(),
            executor.clone(),
            Arc::new(StaticSchema),
            &AgentParams::default(),
        );
        (use_case, gateway, executor)
    }

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn test_issue_details_found() {
        let (use_case, _, executor) = use_case(
            vec![
                json!({"tool": "get_issue"}),
                json!({"arguments": {"issue_key": "SCRUM-123"}}),
            ],
            vec![ToolResult::success(
                "get_issue",
                "SCRUM-123: Login page\nStatus: To Do\nAssignee: Unassigned",
            )],
        );

        let response = use_case
            .execute("What are the details of SCRUM-123?", &NoAgentProgress)
            .await
            .unwrap();

        assert!(response.is_success());
        assert!(response.response.contains("SCRUM-123"));
        assert_eq!(response.tool.as_deref(), Some("get_issue"));
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].get_string("issue_key"), Some("SCRUM-123"));
    }

    #[tokio::test]
    async fn test_unreadable_backend_answer_asks_to_rephrase() {
        let gateway = Arc::new(ScriptedGateway::failing(GatewayError::InvalidResponse(
            "answer is not JSON".into(),
        )));
        let executor = Arc::new(RecordingExecutor::new(Vec::new()));
        let use_case = RunAgentUseCase::new(
            gateway.clone(),
            executor.clone(),
            Arc::new(StaticSchema),
            &AgentParams::default(),
        );

        let response = use_case
            .execute("Move SCRUM-1 to done", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(
            response.response,
            "I could not understand which action to take, please rephrase the request."
        );
        assert_eq!(response.error, Some(ErrorKind::Selection));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_asks_to_retry() {
        let gateway = Arc::new(ScriptedGateway::failing(GatewayError::ConnectionError(
            "connection refused".into(),
        )));
        let executor = Arc::new(RecordingExecutor::new(Vec::new()));
        let use_case = RunAgentUseCase::new(
            gateway,
            executor.clone(),
            Arc::new(StaticSchema),
            &AgentParams::default(),
        );

        let response = use_case
            .execute("Move SCRUM-1 to done", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(
            response.response,
            "I could not reach the language backend, please try again later."
        );
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_extraction_answer_asks_to_rephrase() {
        let (use_case, _, executor) = use_case(vec![json!({"tool": "get_issue"})], Vec::new());

        let response = use_case
            .execute("What are the details of SCRUM-123?", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(
            response.response,
            "I could not understand which action to take, please rephrase the request."
        );
        assert_eq!(response.tool.as_deref(), Some("get_issue"));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_issue_details_not_found() {
        let (use_case, _, _) = use_case(
            vec![
                json!({"tool": "get_issue"}),
                json!({"arguments": {"issue_key": "SCRUM-123"}}),
            ],
            vec![ToolResult::failure("get_issue", ToolError::not_found("SCRUM-123"))],
        );

        let response = use_case
            .execute("What are the details of SCRUM-123?", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(response.response, "Issue SCRUM-123 was not found.");
        assert_eq!(response.error, Some(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_small_talk_touches_nothing() {
        let (use_case, gateway, executor) = use_case(vec![json!({"tool": null})], vec![]);

        let response = use_case.execute("hello", &NoAgentProgress).await.unwrap();

        assert_eq!(response.response, NO_ACTION_RESPONSE);
        assert!(response.is_success());
        assert_eq!(gateway.call_count(), 1);
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_before_backend() {
        let (use_case, gateway, _) = use_case(vec![], vec![]);

        let err = use_case.execute("   ", &NoAgentProgress).await.unwrap_err();

        assert_eq!(err, RunAgentError::EmptyInstruction);
        assert_eq!(err.user_message(), "Prompt cannot be empty.");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_arguments_never_execute() {
        let (use_case, _, executor) = use_case(
            vec![
                json!({"tool": "create_issue"}),
                json!({"arguments": {"project_key": "SCRUM"}}),
            ],
            vec![],
        );

        let response = use_case
            .execute("Create a task in SCRUM", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(
            response.response,
            "Missing required argument for create_issue: summary."
        );
        assert_eq!(response.error, Some(ErrorKind::Extraction));
        assert_eq!(response.tool.as_deref(), Some("create_issue"));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_selection_failure_is_one_sentence() {
        let (use_case, _, executor) = use_case(vec![json!("get_issue")], vec![]);

        let response = use_case
            .execute("show SCRUM-1", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(response.error, Some(ErrorKind::Selection));
        assert!(!response.response.contains('\n'));
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_conversation_is_logged_step_by_step() {
        let logger = Arc::new(RecordingLogger::default());
        let (use_case, _, _) = use_case(
            vec![
                json!({"tool": "validate_project"}),
                json!({"arguments": {"project_key": "SCRUM"}}),
            ],
            vec![],
        );
        let use_case = use_case.with_conversation_logger(logger.clone());

        use_case
            .execute("Is SCRUM a valid project?", &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(
            *logger.0.lock().unwrap(),
            vec![
                "instruction",
                "tool_selected",
                "arguments_extracted",
                "tool_executed"
            ]
        );
    }
}
