//! Jira adapter: the [`TrackerPort`](jira_agent_application::TrackerPort)
//! implementation over Jira REST API v2 with basic auth.

mod client;
mod wire;

pub use client::{JiraClient, JiraSettings};
