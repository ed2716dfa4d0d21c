//! Language backend configuration (`[llm]` section)

use super::redacted;
use serde::{Deserialize, Serialize};

/// Gemini's OpenAI-compatible endpoint
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

/// OpenAI-compatible chat completions backend.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model name (default: "gemini-1.5-flash")
    pub model: String,
    /// API key, usually from `GEMINI_API_KEY`
    pub api_key: Option<String>,
    /// Sampling temperature (default: 0.1)
    pub temperature: f32,
    /// Per-request timeout (default: 60)
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            temperature: 0.1,
            timeout_seconds: 60,
        }
    }
}

impl std::fmt::Debug for FileLlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &redacted(&self.api_key))
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}
