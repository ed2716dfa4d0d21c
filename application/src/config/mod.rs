//! Application-level configuration.
//!
//! - [`AgentParams`]: search caps, issue-type and status vocabularies, decision timeout

pub mod agent_params;

pub use agent_params::AgentParams;
