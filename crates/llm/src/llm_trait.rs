use tenderlens_common::Result;
use crate::types::CompletionRequest;
use async_trait::async_trait;

/// Text completion backend used by the analyzer
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a system + user prompt pair and return the model's text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
