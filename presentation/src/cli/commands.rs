//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for jira-agent
#[derive(Parser, Debug)]
#[command(name = "jira-agent")]
#[command(author, version, about = "Natural-language agent for Jira issues")]
#[command(long_about = r#"
jira-agent turns a plain-English request into a single Jira operation.

Each request goes through three steps:
1. Selection: the language backend picks one tool (or none)
2. Extraction: the tool's arguments are pulled from the request
3. Execution: the tool runs against Jira and its outcome is reported

Configuration files are loaded from (in priority order):
1. Environment       JIRA_SERVER, JIRA_USERNAME, JIRA_API_TOKEN, GEMINI_API_KEY
2. --config <path>   Explicit config file
3. ./jira-agent.toml Project-level config
4. ~/.config/jira-agent/config.toml   Global config

Example:
  jira-agent ask "What are the details of SCRUM-123?"
  jira-agent ask "Create a task in SCRUM called 'Fix login'"
  jira-agent issues SCRUM
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (default: text for `ask` and `tools`, json otherwise)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a natural-language request against Jira
    Ask {
        /// The request; several words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        prompt: Vec<String>,
    },
    /// List all visible projects
    Projects,
    /// List the issues of one project, newest first
    Issues {
        /// Project key, e.g. SCRUM
        project: String,
    },
    /// Show one issue with its comments
    Issue {
        /// Issue key, e.g. SCRUM-123
        key: String,
    },
    /// List the registered tools
    Tools,
}

impl Command {
    /// Output format used when `--output` is not given
    pub fn default_output(&self) -> OutputFormat {
        match self {
            Command::Ask { .. } | Command::Tools => OutputFormat::Text,
            Command::Projects | Command::Issues { .. } | Command::Issue { .. } => {
                OutputFormat::Json
            }
        }
    }

    /// Whether the command needs the language backend
    pub fn needs_llm(&self) -> bool {
        matches!(self, Command::Ask { .. })
    }

    /// Whether the command talks to the tracker
    pub fn needs_tracker(&self) -> bool {
        !matches!(self, Command::Tools)
    }
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .or_else(|| self.command.as_ref().map(Command::default_output))
            .unwrap_or(OutputFormat::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::parse_from(["jira-agent", "ask", "details", "of", "SCRUM-1"]);
        let Some(Command::Ask { prompt }) = &cli.command else {
            panic!("expected ask");
        };
        assert_eq!(prompt.join(" "), "details of SCRUM-1");
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_context_commands_default_to_json() {
        let cli = Cli::parse_from(["jira-agent", "issues", "SCRUM"]);
        assert_eq!(
            cli.command,
            Some(Command::Issues {
                project: "SCRUM".into()
            })
        );
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = Cli::parse_from(["jira-agent", "issue", "SCRUM-1", "--output", "text"]);
        assert_eq!(cli.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["jira-agent", "projects", "-vv", "--no-config", "-q"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        assert!(cli.quiet);
    }

    #[test]
    fn test_requirements_per_command() {
        assert!(!Command::Tools.needs_tracker());
        assert!(!Command::Projects.needs_llm());
        assert!(
            Command::Ask {
                prompt: vec!["hi".into()]
            }
            .needs_llm()
        );
    }
}
