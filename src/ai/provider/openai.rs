//! OpenAI API Provider
//!
//! Chat Completions with a single user message; the first choice's text is
//! returned as-is.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::SummaryProvider;
use crate::config::LlmConfig;
use crate::types::{HrError, Result};

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// Never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                HrError::Config(
                    "OpenAI API key not found. Set OPENAI_API_KEY env var or llm.api_key in config"
                        .to_string(),
                )
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HrError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
        }
    }
}

#[async_trait]
impl SummaryProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        info!(
            "Generating with OpenAI (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt);
        let url = format!("{}/chat/completions", self.api_base);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| HrError::LlmApi(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HrError::LlmApi(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| HrError::LlmApi(format!("Failed to parse OpenAI response: {}", e)))?;

        if let Some(usage) = &body.usage {
            debug!(
                "OpenAI usage: {} prompt + {} completion tokens in {:?}",
                usage.prompt_tokens,
                usage.completion_tokens,
                start_time.elapsed()
            );
        }

        body.first_text()
            .ok_or_else(|| HrError::LlmApi("No content in OpenAI response".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

impl ChatCompletionResponse {
    fn first_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}
