//! OpenAI-compatible chat completions gateway.
//!
//! Works against any endpoint that speaks `POST {base_url}/chat/completions`
//! with `response_format: {"type": "json_object"}`, including Gemini's
//! OpenAI-compatible endpoint (the default).

use async_trait::async_trait;
use jira_agent_application::ports::llm_gateway::{DecisionRequest, GatewayError, LlmGateway};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection and sampling settings for [`OpenAiCompatibleGateway`]
#[derive(Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Language backend reached through an OpenAI-compatible API.
pub struct OpenAiCompatibleGateway {
    client: Client,
    settings: LlmSettings,
}

impl OpenAiCompatibleGateway {
    pub fn new(settings: LlmSettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(&'a self, request: &'a DecisionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "{}\n\nThe JSON object must match this JSON Schema:\n{}",
                        request.prompt, request.schema
                    ),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Parse the model's text as a JSON value, tolerating a Markdown code fence.
fn parse_content(content: &str) -> Result<serde_json::Value, GatewayError> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    serde_json::from_str(unfenced)
        .map_err(|e| GatewayError::InvalidResponse(format!("answer is not JSON: {}", e)))
}

fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("{}: {}", status.as_u16(), message)),
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    fn model_name(&self) -> &str {
        &self.settings.model
    }

    async fn decide(&self, request: &DecisionRequest) -> Result<serde_json::Value, GatewayError> {
        let body = self.build_request(request);
        debug!("POST {} ({})", self.endpoint(), request.task.as_str());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = status_error(status, &text);
            warn!("Language backend answered {}: {}", status.as_u16(), err);
            return Err(err);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("No choices in response".to_string()))?;

        parse_content(&content)
    }
}
