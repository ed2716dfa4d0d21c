//! Prompt templates for tool selection and argument extraction

use crate::tool::entities::{ParamType, ToolDefinition, ToolSpec};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the selection step
    pub fn selection_system() -> &'static str {
        r#"You are an expert Jira product manager who routes requests to tools.
You never answer the request yourself. You only decide which single tool, if any, performs it.
If the request is small talk, ambiguous, or not about Jira, choose no tool.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for the selection step
    pub fn selection_prompt(instruction: &str, catalog: &ToolSpec) -> String {
        let mut prompt = String::from("Available tools:\n");
        for tool in catalog.all() {
            prompt.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }

        prompt.push_str(&format!(
            r#"
Request:
"""
{}
"""

Answer with {{"tool": "<tool name>", "reason": "<one sentence>"}}.
If no tool applies, answer with {{"tool": null, "reason": "<one sentence>"}}.
Use a tool name exactly as listed above."#,
            instruction
        ));
        prompt
    }

    /// System prompt for the extraction step
    pub fn extraction_system() -> &'static str {
        r#"You extract tool arguments from a Jira request.
Only use the parameter names you are given. Leave out anything the request does not state.
Copy free-text values (summaries, descriptions, comment bodies) exactly as the user wrote them, without quotes around them.
You are an expert in JQL and can turn plain-English search requests into JQL.
Respond with a single JSON object and nothing else."#
    }

    /// User prompt for the extraction step
    pub fn extraction_prompt(instruction: &str, tool: &ToolDefinition) -> String {
        let mut prompt = format!("Tool: {}\n{}\n\nParameters:\n", tool.name, tool.description);

        for param in &tool.parameters {
            let requirement = if param.required { "required" } else { "optional" };
            prompt.push_str(&format!(
                "- {} ({}, {}): {}",
                param.name,
                param.param_type.as_str(),
                requirement,
                param.description
            ));
            if let ParamType::Enum(values) = &param.param_type {
                prompt.push_str(&format!(" Allowed values: {}.", values.join(", ")));
            }
            if param.param_type.is_free_text() {
                prompt.push_str(" Copy verbatim.");
            }
            prompt.push('\n');
        }

        prompt.push_str(&format!(
            r#"
Request:
"""
{}
"""

Answer with {{"arguments": {{"<parameter name>": "<value>", ...}}}}.
Omit parameters the request does not provide."#,
            instruction
        ));
        prompt
    }
}
