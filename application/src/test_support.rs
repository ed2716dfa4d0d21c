//! Deterministic test doubles for the application ports.

use crate::ports::llm_gateway::{DecisionRequest, DecisionTask, GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tracker::TrackerPort;
use async_trait::async_trait;
use jira_agent_domain::{
    Issue, IssueKey, IssueSummary, NewIssue, ParamType, Project, ProjectKey, RiskLevel, ToolCall,
    ToolDefinition, ToolParameter, ToolResult, ToolSpec, TrackerError, Transition,
};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway that replays a fixed queue of answers and records every request.
pub struct ScriptedGateway {
    answers: Mutex<VecDeque<Result<Value, GatewayError>>>,
    requests: Mutex<Vec<(DecisionTask, String)>>,
}

impl ScriptedGateway {
    pub fn new<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            answers: Mutex::new(VecDeque::from([Err(error)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn tasks(&self) -> Vec<DecisionTask> {
        self.requests.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(_, p)| p.clone())
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn decide(&self, request: &DecisionRequest) -> Result<Value, GatewayError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.task, request.prompt.clone()));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::InvalidResponse("script exhausted".into())))
    }
}

#[derive(Default)]
struct TrackerState {
    projects: Vec<Project>,
    issues: BTreeMap<String, Issue>,
}

/// Tracker holding projects and issues for the context path. Counts every
/// call; operations the context path never makes are rejected.
#[derive(Default)]
pub struct InMemoryTracker {
    state: Mutex<TrackerState>,
    calls: AtomicUsize,
    unavailable: bool,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker whose every call fails with `Unavailable`
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_project(self, key: &str, name: &str) -> Self {
        self.state.lock().unwrap().projects.push(Project {
            key: key.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_issue(self, key: &str, summary: &str, status: &str) -> Self {
        self.state.lock().unwrap().issues.insert(
            key.to_string(),
            Issue {
                key: key.to_string(),
                summary: summary.to_string(),
                description: None,
                status: status.to_string(),
                assignee: None,
                comments: Vec::new(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<std::sync::MutexGuard<'_, TrackerState>, TrackerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(TrackerError::Unavailable("connection refused".into()));
        }
        Ok(self.state.lock().unwrap())
    }

    fn unsupported(&self) -> TrackerError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TrackerError::rejected("not supported by this tracker")
    }
}

#[async_trait]
impl TrackerPort for InMemoryTracker {
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue, TrackerError> {
        self.read()?
            .issues
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::NotFound {
                key: key.to_string(),
            })
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<IssueSummary>, TrackerError> {
        // Only understands `project = "KEY"` prefixes; anything else matches all.
        let state = self.read()?;
        let project = jql
            .strip_prefix("project = \"")
            .and_then(|rest| rest.split('"').next());
        Ok(state
            .issues
            .values()
            .filter(|issue| project.is_none_or(|p| issue.key.starts_with(&format!("{}-", p))))
            .take(max_results)
            .map(Issue::to_summary)
            .collect())
    }

    async fn get_project(&self, key: &ProjectKey) -> Result<Option<Project>, TrackerError> {
        Ok(self
            .read()?
            .projects
            .iter()
            .find(|p| p.key == key.as_str())
            .cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        Ok(self.read()?.projects.clone())
    }

    async fn issue_types(&self, _project: &ProjectKey) -> Result<Vec<String>, TrackerError> {
        Err(self.unsupported())
    }

    async fn create_issue(&self, _issue: &NewIssue) -> Result<IssueKey, TrackerError> {
        Err(self.unsupported())
    }

    async fn add_comment(&self, _key: &IssueKey, _body: &str) -> Result<(), TrackerError> {
        Err(self.unsupported())
    }

    async fn transitions(&self, _key: &IssueKey) -> Result<Vec<Transition>, TrackerError> {
        Err(self.unsupported())
    }

    async fn transition_issue(
        &self,
        _key: &IssueKey,
        _transition_id: &str,
    ) -> Result<(), TrackerError> {
        Err(self.unsupported())
    }
}

/// Executor that returns canned results and records every call.
pub struct RecordingExecutor {
    spec: ToolSpec,
    results: Mutex<VecDeque<ToolResult>>,
    calls: Mutex<Vec<ToolCall>>,
}

impl RecordingExecutor {
    pub fn new<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ToolResult>,
    {
        Self {
            spec: sample_spec(),
            results: Mutex::new(results.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for RecordingExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ToolResult::success(&call.tool_name, "ok"))
    }
}

/// Catalog shaped like the production one, without executors.
pub fn sample_spec() -> ToolSpec {
    let mut spec = ToolSpec::new();
    let tools = [
        ToolDefinition::new("get_issue", "Get details of one issue", RiskLevel::Low)
            .with_parameter(ToolParameter::new("issue_key", "Issue key, e.g. SCRUM-1", true)),
        ToolDefinition::new("search_issues", "Search issues with JQL", RiskLevel::Low)
            .with_parameter(ToolParameter::new("jql", "JQL query", true)),
        ToolDefinition::new("create_issue", "Create an issue", RiskLevel::High)
            .with_parameter(ToolParameter::new("project_key", "Project key", true))
            .with_parameter(ToolParameter::new("summary", "Summary", true).free_text())
            .with_parameter(ToolParameter::new("description", "Description", false).free_text())
            .with_parameter(
                ToolParameter::new("issue_type", "Issue type", false)
                    .with_type(ParamType::Enum(vec!["Task".into(), "Bug".into()]))
                    .with_default("Task"),
            ),
        ToolDefinition::new("add_comment", "Comment on an issue", RiskLevel::High)
            .with_parameter(ToolParameter::new("issue_key", "Issue key", true))
            .with_parameter(ToolParameter::new("comment", "Comment body", true).free_text()),
        ToolDefinition::new("transition_issue", "Move an issue", RiskLevel::High)
            .with_parameter(ToolParameter::new("issue_key", "Issue key", true))
            .with_parameter(ToolParameter::new("target_status", "Target status", true)),
        ToolDefinition::new("validate_project", "Check a project key", RiskLevel::Low)
            .with_parameter(ToolParameter::new("project_key", "Project key", true)),
    ];
    for tool in tools {
        spec.register(tool).unwrap();
    }
    spec.register_alias("get-issue", "get_issue")
}

/// Schema port that describes nothing; prompts carry the tool listing.
pub struct StaticSchema;

impl crate::ports::tool_schema::ToolSchemaPort for StaticSchema {
    fn tool_to_schema(&self, _tool: &ToolDefinition) -> Value {
        serde_json::json!({})
    }

    fn all_tools_schema(&self, _spec: &ToolSpec) -> Vec<Value> {
        Vec::new()
    }

    fn selection_schema(&self, _spec: &ToolSpec) -> Value {
        serde_json::json!({"type": "object"})
    }

    fn extraction_schema(&self, _tool: &ToolDefinition) -> Value {
        serde_json::json!({"type": "object"})
    }
}
