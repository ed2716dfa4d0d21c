//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`]. The schemas are embedded in
//! the prompts sent to the language backend so its JSON answers have a
//! declared shape.

use jira_agent_application::ports::tool_schema::ToolSchemaPort;
use jira_agent_domain::tool::entities::{ParamType, ToolDefinition, ToolSpec};
use serde_json::{Map, Value, json};

/// Default implementation producing plain JSON Schema.
///
/// Handles param_type → JSON Schema mapping:
/// - `String`, `Text` → `{"type": "string"}`
/// - `Enum(values)` → `{"type": "string", "enum": values}`
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn parameters_schema(tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!("string"));
            prop.insert("description".to_string(), json!(param.description));
            if let ParamType::Enum(values) = &param.param_type {
                prop.insert("enum".to_string(), json!(values));
            }
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), json!(default));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": Self::parameters_schema(tool),
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }

    fn selection_schema(&self, spec: &ToolSpec) -> Value {
        let mut names: Vec<Value> = spec.names().map(|n| json!(n)).collect();
        names.push(Value::Null);

        json!({
            "type": "object",
            "properties": {
                "tool": { "type": ["string", "null"], "enum": names },
                "reason": { "type": "string" },
            },
            "required": ["tool"],
        })
    }

    fn extraction_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "type": "object",
            "properties": {
                "arguments": Self::parameters_schema(tool),
            },
            "required": ["arguments"],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_agent_domain::tool::entities::{RiskLevel, ToolParameter};

    fn create_issue() -> ToolDefinition {
        ToolDefinition::new("create_issue", "Create an issue", RiskLevel::High)
            .with_parameter(ToolParameter::new("project_key", "Project key", true))
            .with_parameter(ToolParameter::new("summary", "Summary", true).free_text())
            .with_parameter(
                ToolParameter::new("issue_type", "Issue type", false)
                    .one_of(["Task", "Bug"])
                    .with_default("Task"),
            )
    }

    #[test]
    fn test_tool_to_schema() {
        let schema = JsonSchemaToolConverter.tool_to_schema(&create_issue());

        assert_eq!(schema["name"], "create_issue");
        assert_eq!(schema["parameters"]["type"], "object");

        let summary = &schema["parameters"]["properties"]["summary"];
        assert_eq!(summary["type"], "string");
        assert_eq!(summary["description"], "Summary");

        let issue_type = &schema["parameters"]["properties"]["issue_type"];
        assert_eq!(issue_type["enum"], json!(["Task", "Bug"]));
        assert_eq!(issue_type["default"], "Task");

        let required = schema["parameters"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("project_key"), json!("summary")]);
    }

    #[test]
    fn test_all_tools_schema_keeps_registration_order() {
        let mut spec = ToolSpec::new();
        spec.register(ToolDefinition::new("search_issues", "Search", RiskLevel::Low))
            .unwrap();
        spec.register(create_issue()).unwrap();

        let tools = JsonSchemaToolConverter.all_tools_schema(&spec);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "search_issues");
        assert_eq!(tools[1]["name"], "create_issue");
    }

    #[test]
    fn test_selection_schema_allows_null() {
        let mut spec = ToolSpec::new();
        spec.register(create_issue()).unwrap();

        let schema = JsonSchemaToolConverter.selection_schema(&spec);
        assert_eq!(
            schema["properties"]["tool"]["enum"],
            json!(["create_issue", null])
        );
    }

    #[test]
    fn test_extraction_schema_wraps_arguments() {
        let schema = JsonSchemaToolConverter.extraction_schema(&create_issue());
        assert_eq!(schema["required"], json!(["arguments"]));
        assert_eq!(
            schema["properties"]["arguments"]["properties"]["project_key"]["type"],
            "string"
        );
    }
}
