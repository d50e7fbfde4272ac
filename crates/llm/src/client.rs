use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tenderlens_common::{AppConfig, Result, TenderLensError};
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse, CompletionRequest};

/// OpenAI-compatible chat completions client
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create new client; fails without a credential
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(TenderLensError::config("OpenAI API key is required"));
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TenderLensError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("OpenAI client initialized: {}", base_url);
        Ok(Self { base_url, api_key, client })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.require_api_key()?,
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single chat completion call, no retries
    async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            "Sending chat request - Model: {}, Prompt length: {}",
            request.model,
            request.messages.iter().map(|m| m.content.len()).sum::<usize>()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TenderLensError::llm(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TenderLensError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let content = extract_content(&body)?;
        debug!("Received completion - Length: {}", content.len());
        Ok(content)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.chat(&ChatRequest::from(&request)).await
    }
}

/// Pull the first choice's text out of a successful response body
///
/// An empty string is a valid reply; only a missing choice or null content fails.
fn extract_content(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| TenderLensError::llm(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| TenderLensError::llm("No content in model response"))
}

/// Error for a non-2xx response, using the provider's message when present
fn api_error(status: u16, body: &str) -> TenderLensError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => TenderLensError::llm(format!("API error ({}): {}", status, parsed.error.message)),
        Err(_) => TenderLensError::llm(format!("API error ({})", status)),
    }
}
