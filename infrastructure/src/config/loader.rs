//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jira-agent";
const PROJECT_FILES: [&str; 2] = ["jira-agent.toml", ".jira-agent.toml"];

/// Conventional variables and the config keys they fill
const ENV_KEYS: [(&str, &str); 5] = [
    ("JIRA_SERVER", "jira.server"),
    ("JIRA_USERNAME", "jira.username"),
    ("JIRA_API_TOKEN", "jira.api_token"),
    ("GEMINI_API_KEY", "llm.api_key"),
    ("LLM_API_KEY", "llm.api_key"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`JIRA_SERVER`, `JIRA_API_TOKEN`, `GEMINI_API_KEY`, `JIRA_AGENT_*`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./jira-agent.toml` or `./.jira-agent.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/jira-agent/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        Self::with_env(figment).extract().map_err(Box::new)
    }

    /// Defaults plus environment, ignoring every file (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::raw().filter_map(|key| {
                let key = key.as_str().to_ascii_uppercase();
                ENV_KEYS
                    .iter()
                    .find(|(var, _)| *var == key)
                    .map(|(_, path)| (*path).into())
            }))
            .merge(Env::prefixed("JIRA_AGENT_").split("__"))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        for (var, _) in ENV_KEYS {
            let mark = if std::env::var_os(var).is_some() { "SET  " } else { "     " };
            println!("  [{}] Env:     {}", mark, var);
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./jira-agent.toml or ./.jira-agent.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
