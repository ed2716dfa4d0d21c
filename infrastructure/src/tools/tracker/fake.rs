//! In-memory tracker for tool tests.

use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{
    Comment, Issue, IssueKey, IssueSummary, NewIssue, Project, ProjectKey, TrackerError,
    Transition,
};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct State {
    projects: Vec<(Project, Vec<String>)>,
    issues: BTreeMap<String, Issue>,
    transitions: BTreeMap<String, Vec<Transition>>,
    /// (issue key, transition id) pairs the workflow refuses
    rejected_transitions: Vec<(String, String)>,
    issue_types_unavailable: bool,
    created: u32,
}

#[derive(Default)]
pub(crate) struct FakeTracker {
    state: Mutex<State>,
    calls: AtomicUsize,
    creates: AtomicUsize,
    transitions_applied: AtomicUsize,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(self, key: &str, name: &str, issue_types: &[&str]) -> Self {
        self.state.lock().unwrap().projects.push((
            Project {
                key: key.into(),
                name: name.into(),
            },
            issue_types.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    pub fn with_issue(self, key: &str, summary: &str, status: &str) -> Self {
        self.state.lock().unwrap().issues.insert(
            key.into(),
            Issue {
                key: key.into(),
                summary: summary.into(),
                description: None,
                status: status.into(),
                assignee: None,
                comments: Vec::new(),
            },
        );
        self
    }

    pub fn with_transition(self, key: &str, id: &str, name: &str, to_status: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .transitions
            .entry(key.into())
            .or_default()
            .push(Transition {
                id: id.into(),
                name: name.into(),
                to_status: to_status.into(),
            });
        self
    }

    /// List a transition that the tracker then refuses to apply
    pub fn with_rejected_transition(self, key: &str, id: &str, name: &str, to_status: &str) -> Self {
        let tracker = self.with_transition(key, id, name, to_status);
        tracker
            .state
            .lock()
            .unwrap()
            .rejected_transitions
            .push((key.into(), id.into()));
        tracker
    }

    /// Make the issue-type lookup fail as if the tracker were down
    pub fn with_issue_types_unavailable(self) -> Self {
        self.state.lock().unwrap().issue_types_unavailable = true;
        self
    }

    pub fn issue(&self, key: &str) -> Option<Issue> {
        self.state.lock().unwrap().issues.get(key).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn transitions_applied(&self) -> usize {
        self.transitions_applied.load(Ordering::SeqCst)
    }

    fn touch(&self) -> std::sync::MutexGuard<'_, State> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl TrackerPort for FakeTracker {
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue, TrackerError> {
        self.touch()
            .issues
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::NotFound { key: key.to_string() })
    }

    async fn search_issues(
        &self,
        _jql: &str,
        max_results: usize,
    ) -> Result<Vec<IssueSummary>, TrackerError> {
        Ok(self
            .touch()
            .issues
            .values()
            .take(max_results)
            .map(Issue::to_summary)
            .collect())
    }

    async fn get_project(&self, key: &ProjectKey) -> Result<Option<Project>, TrackerError> {
        Ok(self
            .touch()
            .projects
            .iter()
            .find(|(p, _)| p.key == key.as_str())
            .map(|(p, _)| p.clone()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        Ok(self.touch().projects.iter().map(|(p, _)| p.clone()).collect())
    }

    async fn issue_types(&self, project: &ProjectKey) -> Result<Vec<String>, TrackerError> {
        let state = self.touch();
        if state.issue_types_unavailable {
            return Err(TrackerError::Unavailable("503 Service Unavailable".into()));
        }
        state
            .projects
            .iter()
            .find(|(p, _)| p.key == project.as_str())
            .map(|(_, types)| types.clone())
            .ok_or_else(|| TrackerError::InvalidProject {
                key: project.to_string(),
            })
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueKey, TrackerError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.touch();
        let allowed = state
            .projects
            .iter()
            .find(|(p, _)| p.key == issue.project_key)
            .map(|(_, types)| types.iter().any(|t| t == &issue.issue_type))
            .ok_or_else(|| TrackerError::InvalidProject {
                key: issue.project_key.clone(),
            })?;
        if !allowed {
            return Err(TrackerError::Rejected {
                message: "issuetype: Specify a valid issue type".into(),
                fields: vec!["issuetype".into()],
            });
        }

        state.created += 1;
        let key = format!("{}-{}", issue.project_key, state.created);
        state.issues.insert(
            key.clone(),
            Issue {
                key: key.clone(),
                summary: issue.summary.clone(),
                description: issue.description.clone(),
                status: "To Do".into(),
                assignee: None,
                comments: Vec::new(),
            },
        );
        IssueKey::parse(&key).map_err(|e| TrackerError::rejected(e.to_string()))
    }

    async fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError> {
        let mut state = self.touch();
        let issue = state
            .issues
            .get_mut(key.as_str())
            .ok_or_else(|| TrackerError::NotFound { key: key.to_string() })?;
        issue.comments.push(Comment {
            author: "agent".into(),
            body: body.into(),
        });
        Ok(())
    }

    async fn transitions(&self, key: &IssueKey) -> Result<Vec<Transition>, TrackerError> {
        let state = self.touch();
        if !state.issues.contains_key(key.as_str()) {
            return Err(TrackerError::NotFound { key: key.to_string() });
        }
        Ok(state.transitions.get(key.as_str()).cloned().unwrap_or_default())
    }

    async fn transition_issue(
        &self,
        key: &IssueKey,
        transition_id: &str,
    ) -> Result<(), TrackerError> {
        self.transitions_applied.fetch_add(1, Ordering::SeqCst);
        let mut state = self.touch();
        if state
            .rejected_transitions
            .iter()
            .any(|(k, id)| k == key.as_str() && id == transition_id)
        {
            return Err(TrackerError::Rejected {
                message: "Field 'resolution' is required.".into(),
                fields: vec!["resolution".into()],
            });
        }
        let status = state
            .transitions
            .get(key.as_str())
            .and_then(|ts| ts.iter().find(|t| t.id == transition_id))
            .map(|t| t.to_status.clone())
            .ok_or_else(|| TrackerError::InvalidTransition {
                key: key.to_string(),
                message: format!("Transition id '{}' is not valid for this issue.", transition_id),
            })?;
        if let Some(issue) = state.issues.get_mut(key.as_str()) {
            issue.status = status;
        }
        Ok(())
    }
}
