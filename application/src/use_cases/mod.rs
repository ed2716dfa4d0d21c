//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod extract_arguments;
pub mod project_context;
pub mod run_agent;
pub mod select_tool;
pub(crate) mod shared;
