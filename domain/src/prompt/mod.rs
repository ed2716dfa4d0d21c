//! Prompt domain
//!
//! Templates for the prompts sent to the language backend during tool
//! selection and argument extraction.

mod template;

pub use template::PromptTemplate;
