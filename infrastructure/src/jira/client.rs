//! Jira REST v2 client implementing [`TrackerPort`].
//!
//! One `reqwest::Client` is built at startup with basic auth credentials and
//! a finite timeout; it is shared by every request.

use super::wire::{
    self, CommentRequest, CreatedDto, ErrorBody, IssueDto, ProjectDto, SearchPage,
    TransitionPage,
};
use async_trait::async_trait;
use jira_agent_application::ports::tracker::TrackerPort;
use jira_agent_domain::{
    Issue, IssueKey, IssueSummary, NewIssue, Project, ProjectKey, TrackerError, Transition,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// What a request was about, for turning HTTP statuses into domain errors
#[derive(Debug, Clone, Copy)]
enum Subject<'a> {
    Issue(&'a str),
    Project(&'a str),
    Transition(&'a str),
    Other,
}

/// Connection settings for [`JiraClient`]
#[derive(Clone)]
pub struct JiraSettings {
    pub server: String,
    pub username: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraSettings")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Issue tracker adapter over the Jira REST API
pub struct JiraClient {
    client: Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl JiraClient {
    pub fn new(settings: JiraSettings) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("jira-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrackerError::Unavailable(format!("could not build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/api/2", settings.server.trim_end_matches('/')),
            username: settings.username,
            api_token: settings.api_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .basic_auth(&self.username, Some(&self.api_token))
            .header("Accept", "application/json")
    }

    async fn send(&self, builder: RequestBuilder, subject: Subject<'_>) -> Result<Response, TrackerError> {
        let response = self.authed(builder).send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(status, &body, subject);
        warn!("Jira answered {}: {}", status.as_u16(), err);
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        subject: Subject<'_>,
    ) -> Result<T, TrackerError> {
        self.send(builder, subject)
            .await?
            .json::<T>()
            .await
            .map_err(|e| TrackerError::Unavailable(format!("unreadable tracker response: {}", e)))
    }
}

fn transport_error(err: reqwest::Error) -> TrackerError {
    if err.is_timeout() {
        TrackerError::Unavailable("the request timed out".to_string())
    } else if err.is_connect() {
        TrackerError::Unavailable(format!("could not connect: {}", err))
    } else {
        TrackerError::Unavailable(err.to_string())
    }
}

/// Map a non-success HTTP status to the tracker error taxonomy.
fn status_error(status: StatusCode, body: &str, subject: Subject<'_>) -> TrackerError {
    let parsed = ErrorBody::parse(body);
    let message = parsed
        .message()
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    match (status, subject) {
        (StatusCode::NOT_FOUND, Subject::Issue(key) | Subject::Transition(key)) => {
            TrackerError::NotFound {
                key: key.to_string(),
            }
        }
        (StatusCode::NOT_FOUND, Subject::Project(key)) => TrackerError::InvalidProject {
            key: key.to_string(),
        },
        (StatusCode::BAD_REQUEST | StatusCode::CONFLICT, Subject::Transition(key)) => {
            TrackerError::InvalidTransition {
                key: key.to_string(),
                message,
            }
        }
        (StatusCode::BAD_REQUEST, _) => TrackerError::Rejected {
            message,
            fields: parsed.fields(),
        },
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            TrackerError::Unavailable(format!("authentication failed ({})", status.as_u16()))
        }
        (StatusCode::TOO_MANY_REQUESTS, _) => {
            TrackerError::Unavailable("rate limited by the tracker".to_string())
        }
        _ if status.is_server_error() => {
            TrackerError::Unavailable(format!("tracker error {}", status.as_u16()))
        }
        _ => TrackerError::Rejected {
            message,
            fields: parsed.fields(),
        },
    }
}

#[async_trait]
impl TrackerPort for JiraClient {
    async fn get_issue(&self, key: &IssueKey) -> Result<Issue, TrackerError> {
        debug!("GET issue {}", key);
        let request = self
            .client
            .get(self.url(&format!("issue/{}", key)))
            .query(&[("fields", wire::ISSUE_FIELDS)]);
        let dto: IssueDto = self.get_json(request, Subject::Issue(key.as_str())).await?;
        Ok(dto.into_issue())
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<IssueSummary>, TrackerError> {
        debug!("Search (max {}): {}", max_results, jql);
        let max = max_results.to_string();
        let request = self.client.get(self.url("search")).query(&[
            ("jql", jql),
            ("maxResults", max.as_str()),
            ("fields", wire::SEARCH_FIELDS),
        ]);
        let page: SearchPage = self.get_json(request, Subject::Other).await?;
        Ok(page.issues.into_iter().map(IssueDto::into_summary).collect())
    }

    async fn get_project(&self, key: &ProjectKey) -> Result<Option<Project>, TrackerError> {
        let request = self.client.get(self.url(&format!("project/{}", key)));
        match self
            .get_json::<ProjectDto>(request, Subject::Project(key.as_str()))
            .await
        {
            Ok(dto) => Ok(Some(dto.into())),
            Err(TrackerError::InvalidProject { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, TrackerError> {
        let request = self.client.get(self.url("project"));
        let projects: Vec<ProjectDto> = self.get_json(request, Subject::Other).await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn issue_types(&self, project: &ProjectKey) -> Result<Vec<String>, TrackerError> {
        let request = self.client.get(self.url(&format!("project/{}", project)));
        let dto: ProjectDto = self
            .get_json(request, Subject::Project(project.as_str()))
            .await?;
        Ok(dto.issue_types.into_iter().map(|t| t.name).collect())
    }

    async fn create_issue(&self, issue: &NewIssue) -> Result<IssueKey, TrackerError> {
        debug!("Create {} in {}", issue.issue_type, issue.project_key);
        let request = self
            .client
            .post(self.url("issue"))
            .json(&wire::create_request(issue));
        let created: CreatedDto = self
            .get_json(request, Subject::Project(&issue.project_key))
            .await?;
        IssueKey::parse(&created.key).map_err(|e| {
            TrackerError::Unavailable(format!("tracker returned an unexpected key: {}", e))
        })
    }

    async fn add_comment(&self, key: &IssueKey, body: &str) -> Result<(), TrackerError> {
        debug!("Comment on {}", key);
        let request = self
            .client
            .post(self.url(&format!("issue/{}/comment", key)))
            .json(&CommentRequest { body });
        self.send(request, Subject::Issue(key.as_str())).await?;
        Ok(())
    }

    async fn transitions(&self, key: &IssueKey) -> Result<Vec<Transition>, TrackerError> {
        let request = self
            .client
            .get(self.url(&format!("issue/{}/transitions", key)));
        let page: TransitionPage = self.get_json(request, Subject::Issue(key.as_str())).await?;
        Ok(page.transitions.into_iter().map(Into::into).collect())
    }

    async fn transition_issue(
        &self,
        key: &IssueKey,
        transition_id: &str,
    ) -> Result<(), TrackerError> {
        debug!("Transition {} via {}", key, transition_id);
        let request = self
            .client
            .post(self.url(&format!("issue/{}/transitions", key)))
            .json(&wire::transition_request(transition_id));
        self.send(request, Subject::Transition(key.as_str())).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_depends_on_subject() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "", Subject::Issue("SCRUM-9")),
            TrackerError::NotFound {
                key: "SCRUM-9".into()
            }
        );
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "", Subject::Project("NOPE")),
            TrackerError::InvalidProject { key: "NOPE".into() }
        );
    }

    #[test]
    fn test_bad_request_keeps_field_names() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"errors":{"issuetype":"Specify a valid issue type"}}"#,
            Subject::Project("SCRUM"),
        );
        assert!(err.mentions_field("issuetype"));
        assert_eq!(err.kind(), jira_agent_domain::ErrorKind::Rejected);
    }

    #[test]
    fn test_rejected_transition() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"errorMessages":["Transition id '99' is not valid for this issue."]}"#,
            Subject::Transition("SCRUM-1"),
        );
        assert!(matches!(err, TrackerError::InvalidTransition { ref key, .. } if key == "SCRUM-1"));
    }

    #[test]
    fn test_transport_class_statuses_are_unavailable() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let err = status_error(status, "", Subject::Issue("SCRUM-1"));
            assert!(matches!(err, TrackerError::Unavailable(_)), "{status}");
        }
    }

    #[test]
    fn test_base_url_normalized() {
        let client = JiraClient::new(JiraSettings {
            server: "https://example.atlassian.net/".into(),
            username: "me@example.com".into(),
            api_token: "secret".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(
            client.url("issue/SCRUM-1"),
            "https://example.atlassian.net/rest/api/2/issue/SCRUM-1"
        );
    }

    #[test]
    fn test_settings_debug_hides_token() {
        let settings = JiraSettings {
            server: "https://example.atlassian.net".into(),
            username: "me".into(),
            api_token: "super-secret".into(),
            timeout: Duration::from_secs(5),
        };
        assert!(!format!("{settings:?}").contains("super-secret"));
    }
}
