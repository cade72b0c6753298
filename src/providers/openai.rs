//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::providers::{ChatRequest, LanguageModel, ProviderError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5.1";
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ProviderError::MissingCredential("OpenAI API key"))
    }

    fn payload(&self, request: &ChatRequest) -> Value {
        let mut payload = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": self.config.max_tokens,
        });
        if request.json_output {
            payload["response_format"] = json!({ "type": "json_object" });
        }
        payload
    }
}

/// Pull a readable message out of an error response body
///
/// Uses `error.message` (or a top-level `message`), prefixed with
/// `[error.code]` when present; falls back to the raw text.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
                .trim_end()
                .to_string()
        } else {
            body.trim().to_string()
        }
    };

    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    let message = parsed
        .pointer("/error/message")
        .or_else(|| parsed.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    match (message, parsed.pointer("/error/code").and_then(Value::as_str)) {
        (Some(message), Some(code)) => format!("[{}] {}", code, message),
        (Some(message), None) => message,
        (None, _) => fallback(),
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    fn ensure_configured(&self) -> Result<(), ProviderError> {
        self.api_key().map(|_| ())
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let start = std::time::Instant::now();

        debug!(
            "LLM call starting - model={}, prompt_length={} chars",
            self.config.model,
            request.user.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.payload(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &body);
            error!("LLM API error - status={}, message={}", status.as_u16(), message);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::Malformed("response has no message content".to_string()))?;

        info!(
            "LLM API call completed - duration={:.2}s, response_length={} chars",
            start.elapsed().as_secs_f32(),
            content.chars().count()
        );

        Ok(content)
    }
}
