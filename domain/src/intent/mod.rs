//! Intent domain: what the caller asked for and what the backend decided.
//!
//! - [`Instruction`]: the caller's raw request, never rewritten
//! - [`SelectionDecision`]: which tool (or none) the backend picked
//! - [`ExtractionDecision`]: the raw argument map the backend produced

pub mod decision;
pub mod instruction;

pub use decision::{DecisionParseError, ExtractionDecision, SelectionDecision};
pub use instruction::Instruction;
