//! Progress reporting for agent requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use jira_agent_application::AgentProgressNotifier;
use jira_agent_domain::util::truncate_str;
use jira_agent_domain::{ToolCall, ToolResult};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner on stderr
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn update(&self, prefix: &str, message: String) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_prefix(prefix.to_string());
        pb.set_message(message);
    }

    fn finish(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_selection_start(&self) {
        self.update("Selecting", "choosing a tool...".to_string());
    }

    fn on_tool_selected(&self, tool_name: Option<&str>) {
        match tool_name {
            Some(name) => self.update("Extracting", format!("arguments for {}", name)),
            None => self.finish(),
        }
    }

    fn on_tool_call(&self, tool_name: &str) {
        self.update("Running", tool_name.to_string());
    }

    fn on_tool_result(&self, _result: &ToolResult) {
        self.finish();
    }

    fn on_aborted(&self, _reason: &str) {
        self.finish();
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Line-per-step progress on stderr (used with `-v`)
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_selection_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Selecting tool".bold());
    }

    fn on_tool_selected(&self, tool_name: Option<&str>) {
        match tool_name {
            Some(name) => eprintln!("  {} {}", "v".green(), name.cyan()),
            None => eprintln!("  {} no applicable tool", "-".dimmed()),
        }
    }

    fn on_arguments_extracted(&self, call: &ToolCall) {
        let args = serde_json::to_string(&call.arguments).unwrap_or_default();
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            "Arguments".bold(),
            truncate_str(&args, 120).dimmed()
        );
    }

    fn on_tool_call(&self, tool_name: &str) {
        eprintln!("{} {} {}", "->".cyan(), "Running".bold(), tool_name);
    }

    fn on_tool_result(&self, result: &ToolResult) {
        let duration = result
            .metadata
            .duration_ms
            .map(|ms| format!(" ({} ms)", ms))
            .unwrap_or_default();
        match result.error() {
            None => eprintln!("  {} done{}", "v".green(), duration.dimmed()),
            Some(err) => eprintln!("  {} {}{}", "x".red(), err.kind, duration.dimmed()),
        }
    }

    fn on_aborted(&self, reason: &str) {
        eprintln!("  {} {}", "x".red(), reason);
    }
}
