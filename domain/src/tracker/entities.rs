//! Tracker entities: read-only projections of remote state.
//!
//! Optional fields serialize as `null` rather than being omitted, so the
//! shape seen by machine consumers is the same whether or not a value is set.

use serde::{Deserialize, Serialize};

/// A tracker project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

/// A comment on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
}

/// Issue row as returned by searches and project listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
}

/// Full issue detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub description: Option<String>,
    pub status: String,
    pub assignee: Option<String>,
    /// Comments in the order the tracker returns them (oldest first)
    pub comments: Vec<Comment>,
}

impl Issue {
    pub fn assignee_display(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }

    pub fn to_summary(&self) -> IssueSummary {
        IssueSummary {
            key: self.key.clone(),
            summary: self.summary.clone(),
            status: self.status.clone(),
            assignee: self.assignee.clone(),
        }
    }
}

/// A workflow transition available from an issue's current status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// Status the issue lands in after the transition
    pub to_status: String,
}

impl Transition {
    /// Whether `target` names this transition or its destination status
    pub fn matches(&self, target: &str) -> bool {
        let target = target.trim();
        self.name.eq_ignore_ascii_case(target) || self.to_status.eq_ignore_ascii_case(target)
    }
}

/// Fields for creating an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub project_key: String,
    pub issue_type: String,
    pub summary: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let issue = Issue {
            key: "SCRUM-1".into(),
            summary: "Login".into(),
            description: None,
            status: "To Do".into(),
            assignee: None,
            comments: vec![],
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert!(json["description"].is_null());
        assert!(json["assignee"].is_null());
        assert_eq!(json["comments"], serde_json::json!([]));
        assert_eq!(issue.assignee_display(), "Unassigned");
    }

    #[test]
    fn test_transition_matches_name_or_status() {
        let t = Transition {
            id: "31".into(),
            name: "Start Progress".into(),
            to_status: "In Progress".into(),
        };
        assert!(t.matches("start progress"));
        assert!(t.matches(" In Progress "));
        assert!(!t.matches("Done"));
    }
}
