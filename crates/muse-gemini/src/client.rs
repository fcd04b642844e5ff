//! Gemini `generateContent` HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use muse_core::generate::{GenerationError, TextGenerator};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{GenerationConfig, SafetySetting};

/// Default Gemini API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini text generation client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    config: GenerationConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl GeminiClient {
    /// Create a client for `model` with the default policy, URL and timeout.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            config: GenerationConfig::default(),
            client: build_http_client(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body<'a>(&'a self, instruction: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: instruction }],
            }],
            generation_config: &self.config,
            safety_settings: &self.config.safety_settings,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        debug!(model = %self.model, prompt_len = instruction.len(), "Calling Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(instruction))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), body_len = body.len(), "Gemini API responded");

        classify_response(status, &body)
    }
}

/// Turn a raw HTTP answer into generated text or a classified failure.
///
/// Only a service-reported `error` payload is an API error on a successful
/// status. Anything else without text at `candidates[0].content.parts[0]`
/// counts as an empty response, including bodies that are not JSON.
pub fn classify_response(status: StatusCode, body: &str) -> Result<String, GenerationError> {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let service_error = parsed
        .as_ref()
        .and_then(|v| v.get("error"))
        .filter(|e| !e.is_null());

    if !status.is_success() {
        let message = service_error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(GenerationError::Api {
            status: Some(status.as_u16()),
            message,
        });
    }

    if let Some(error) = service_error {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(GenerationError::Api { status: None, message });
    }

    parsed
        .as_ref()
        .and_then(|v| v.pointer("/candidates/0/content/parts/0/text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or(GenerationError::EmptyResponse)
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport(e.to_string())
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, ?timeout, "HTTP client setup failed, requests will not time out");
            reqwest::Client::new()
        }
    }
}
