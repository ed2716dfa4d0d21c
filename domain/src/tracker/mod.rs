//! Tracker domain: projects, issues and the tracker's error taxonomy.
//!
//! Entities here are read-only projections of remote state: fetched on
//! demand, never cached, never mutated in place by this crate.

pub mod entities;
pub mod error;
pub mod keys;

pub use entities::{Comment, Issue, IssueSummary, NewIssue, Project, Transition};
pub use error::TrackerError;
pub use keys::{IssueKey, ProjectKey};
