//! Console output formatter for agent and context results

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use jira_agent_application::{AgentResponse, ProjectionError};
use jira_agent_domain::{ErrorKind, Issue, IssueSummary, Project, ToolSpec};
use serde::Serialize;
use serde_json::json;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the response to an `ask` request
    pub fn format_response(response: &AgentResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(response),
            OutputFormat::Text if response.is_success() => response.response.clone(),
            OutputFormat::Text => response.response.red().to_string(),
        }
    }

    pub fn format_projects(projects: &[Project], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&projects),
            OutputFormat::Text if projects.is_empty() => "No projects found.".dimmed().to_string(),
            OutputFormat::Text => projects
                .iter()
                .map(|p| format!("{}  {}", format!("{:<10}", p.key).cyan().bold(), p.name))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn format_issues(issues: &[IssueSummary], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&issues),
            OutputFormat::Text if issues.is_empty() => "No issues found.".dimmed().to_string(),
            OutputFormat::Text => issues
                .iter()
                .map(|i| {
                    format!(
                        "{}  {}  {} {}",
                        format!("{:<12}", i.key).cyan().bold(),
                        format!("[{}]", i.status).yellow(),
                        i.summary,
                        format!("({})", i.assignee.as_deref().unwrap_or("Unassigned")).dimmed()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn format_issue(issue: &Issue, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return Self::to_json(issue);
        }

        let mut output = String::new();
        output.push_str(&Self::header(&format!("{}: {}", issue.key, issue.summary)));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), issue.status));
        output.push_str(&format!(
            "{} {}\n",
            "Assignee:".cyan().bold(),
            issue.assignee_display()
        ));

        if let Some(description) = &issue.description {
            output.push_str(&Self::section_header("Description"));
            output.push_str(&Self::indent(description, "  "));
            output.push('\n');
        }

        output.push_str(&Self::section_header(&format!(
            "Comments ({})",
            issue.comments.len()
        )));
        for comment in &issue.comments {
            output.push_str(&format!("\n{}\n", format!("── {} ──", comment.author).yellow()));
            output.push_str(&Self::indent(&comment.body, "  "));
            output.push('\n');
        }

        output
    }

    /// Format the registered tool catalog
    pub fn format_tools(spec: &ToolSpec, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            let tools: Vec<_> = spec
                .all()
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "risk": tool.risk_level.as_str(),
                        "parameters": tool.parameters.iter().map(|p| json!({
                            "name": p.name,
                            "type": p.param_type.as_str(),
                            "required": p.required,
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            return Self::to_json(&tools);
        }

        let mut output = String::new();
        for tool in spec.all() {
            let risk = if tool.is_high_risk() {
                tool.risk_level.as_str().red()
            } else {
                tool.risk_level.as_str().green()
            };
            output.push_str(&format!("{} [{}]\n", tool.name.cyan().bold(), risk));
            output.push_str(&format!("  {}\n", tool.description));
            for param in &tool.parameters {
                let marker = if param.required { "*" } else { " " };
                output.push_str(&format!(
                    "    {}{} ({}) {}\n",
                    marker,
                    param.name.bold(),
                    param.param_type.as_str(),
                    param.description.dimmed()
                ));
            }
        }
        output.trim_end().to_string()
    }

    /// Format a context projection failure
    pub fn format_error(error: &ProjectionError, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&json!({
                "kind": error.kind,
                "key": error.key,
                "message": error.message,
                "status": error.http_status(),
            })),
            OutputFormat::Text => format!("{} {}", "Error:".red().bold(), error.message),
        }
    }

    /// Process exit code for a failure class: 2 for client errors, 3 for
    /// server-side or upstream errors.
    pub fn exit_code(kind: ErrorKind) -> u8 {
        match kind.http_status() {
            400..=499 => 2,
            _ => 3,
        }
    }

    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
