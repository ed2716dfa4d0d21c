//! CLI entrypoint for jira-agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use jira_agent_application::{
    AgentParams, AgentProgressNotifier, ContextProjector, NoAgentProgress, RunAgentUseCase,
    TrackerPort,
};
use jira_agent_infrastructure::{
    ConfigLoader, ConfigValidationError, FileConfig, JiraClient, JsonSchemaToolConverter,
    JsonlConversationLogger, OpenAiCompatibleGateway, jira_tool_registry, jira_tool_spec,
};
use jira_agent_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(2));
    };

    info!("Starting jira-agent");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .context("Failed to load configuration")?;

    check_config(&config, &command)?;

    let format = cli.output_format();
    let params = config.agent_params();

    let code = match &command {
        Command::Tools => {
            let spec = jira_tool_spec(&params)?;
            println!("{}", ConsoleFormatter::format_tools(&spec, format));
            0
        }
        Command::Ask { prompt } => {
            run_ask(&cli, &config, &params, &prompt.join(" "), format).await?
        }
        Command::Projects | Command::Issues { .. } | Command::Issue { .. } => {
            let projector = ContextProjector::new(tracker(&config)?, &params);
            run_context(&projector, &command, format).await
        }
    };

    Ok(ExitCode::from(code))
}

/// Route diagnostics to stderr, or to `--log-file` through a non-blocking
/// writer whose guard must outlive the program.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let Some(file_name) = path.file_name() else {
        bail!("--log-file must name a file: {}", path.display());
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Fail fast on configuration the command cannot work with.
fn check_config(config: &FileConfig, command: &Command) -> Result<()> {
    let issues: Vec<ConfigValidationError> = config
        .validate()
        .into_iter()
        .filter(|issue| match issue {
            ConfigValidationError::MissingJiraServer
            | ConfigValidationError::MissingJiraCredentials => command.needs_tracker(),
            ConfigValidationError::MissingLlmApiKey => command.needs_llm(),
            _ => true,
        })
        .collect();

    if issues.is_empty() {
        return Ok(());
    }

    let list = issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("Invalid configuration:\n{}", list)
}

fn tracker(config: &FileConfig) -> Result<Arc<dyn TrackerPort>> {
    let Some(settings) = config.jira_settings() else {
        bail!("Jira server and credentials are not configured");
    };
    Ok(Arc::new(JiraClient::new(settings)?))
}

async fn run_ask(
    cli: &Cli,
    config: &FileConfig,
    params: &AgentParams,
    prompt: &str,
    format: OutputFormat,
) -> Result<u8> {
    let Some(llm_settings) = config.llm_settings() else {
        bail!("Language backend API key is not configured");
    };
    let gateway = Arc::new(OpenAiCompatibleGateway::new(llm_settings)?);
    let registry = Arc::new(jira_tool_registry(tracker(config)?, params)?);
    let stats = registry.stats();
    info!(
        "Registered {} tools ({} mutate the tracker)",
        stats.total_tools, stats.high_risk_tools
    );

    let mut use_case = RunAgentUseCase::new(
        gateway,
        registry,
        Arc::new(JsonSchemaToolConverter),
        params,
    );
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => use_case = use_case.with_conversation_logger(Arc::new(logger)),
            None => warn!("Conversation log disabled"),
        }
    }

    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet {
        Box::new(NoAgentProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let outcome = use_case.execute(prompt, progress.as_ref()).await;
    drop(progress);

    match outcome {
        Ok(response) => {
            println!("{}", ConsoleFormatter::format_response(&response, format));
            Ok(response.error.map_or(0, ConsoleFormatter::exit_code))
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Ok(ConsoleFormatter::exit_code(err.kind()))
        }
    }
}

async fn run_context(projector: &ContextProjector, command: &Command, format: OutputFormat) -> u8 {
    let output = match command {
        Command::Projects => projector
            .list_projects()
            .await
            .map(|projects| ConsoleFormatter::format_projects(&projects, format)),
        Command::Issues { project } => projector
            .list_issues(project)
            .await
            .map(|issues| ConsoleFormatter::format_issues(&issues, format)),
        Command::Issue { key } => projector
            .get_issue(key)
            .await
            .map(|issue| ConsoleFormatter::format_issue(&issue, format)),
        Command::Ask { .. } | Command::Tools => return 0,
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(err) => {
            eprintln!("{}", ConsoleFormatter::format_error(&err, format));
            ConsoleFormatter::exit_code(err.kind)
        }
    }
}
