//! Jira REST v2 wire format.
//!
//! Only the fields the agent reads are modelled; everything else in the
//! tracker's responses is ignored.

use jira_agent_domain::{Comment, Issue, IssueSummary, NewIssue, Project, Transition};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Fields requested for issue reads
pub(crate) const ISSUE_FIELDS: &str = "summary,description,status,assignee,comment";

/// Fields requested for searches
pub(crate) const SEARCH_FIELDS: &str = "summary,status,assignee";

#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub display_name: Option<String>,
    pub name: Option<String>,
}

impl User {
    fn label(self) -> String {
        self.display_name
            .or(self.name)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueDto {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueFields {
    #[serde(default)]
    pub summary: String,
    pub description: Option<String>,
    pub status: Option<Named>,
    pub assignee: Option<User>,
    pub comment: Option<CommentPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentPage {
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentDto {
    pub author: Option<User>,
    #[serde(default)]
    pub body: String,
}

impl IssueDto {
    fn status(status: Option<Named>) -> String {
        status.map(|s| s.name).unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn into_issue(self) -> Issue {
        let fields = self.fields;
        Issue {
            key: self.key,
            summary: fields.summary,
            description: fields.description.filter(|d| !d.is_empty()),
            status: Self::status(fields.status),
            assignee: fields.assignee.map(User::label),
            comments: fields
                .comment
                .map(|page| page.comments)
                .unwrap_or_default()
                .into_iter()
                .map(|c| Comment {
                    author: c.author.map(User::label).unwrap_or_else(|| "Unknown".to_string()),
                    body: c.body,
                })
                .collect(),
        }
    }

    pub fn into_summary(self) -> IssueSummary {
        IssueSummary {
            key: self.key,
            summary: self.fields.summary,
            status: Self::status(self.fields.status),
            assignee: self.fields.assignee.map(User::label),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub issues: Vec<IssueDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectDto {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub issue_types: Vec<Named>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project {
            key: dto.key,
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionPage {
    #[serde(default)]
    pub transitions: Vec<TransitionDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransitionDto {
    pub id: String,
    pub name: String,
    pub to: Option<Named>,
}

impl From<TransitionDto> for Transition {
    fn from(dto: TransitionDto) -> Self {
        Transition {
            to_status: dto.to.map(|t| t.name).unwrap_or_else(|| dto.name.clone()),
            id: dto.id,
            name: dto.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedDto {
    pub key: String,
}

/// Error body: `{"errorMessages": [...], "errors": {"field": "message"}}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: serde_json::Map<String, serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn fields(&self) -> Vec<String> {
        self.errors.keys().cloned().collect()
    }

    /// Messages joined into one line, or None when the body said nothing
    pub fn message(&self) -> Option<String> {
        let mut parts: Vec<String> = self.error_messages.clone();
        for (field, value) in &self.errors {
            match value.as_str() {
                Some(text) => parts.push(format!("{}: {}", field, text)),
                None => parts.push(format!("{}: {}", field, value)),
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentRequest<'a> {
    pub body: &'a str,
}

pub(crate) fn create_request(issue: &NewIssue) -> serde_json::Value {
    let mut fields = json!({
        "project": { "key": issue.project_key },
        "summary": issue.summary,
        "issuetype": { "name": issue.issue_type },
    });
    if let Some(description) = &issue.description {
        fields["description"] = json!(description);
    }
    json!({ "fields": fields })
}

pub(crate) fn transition_request(transition_id: &str) -> serde_json::Value {
    json!({ "transition": { "id": transition_id } })
}
