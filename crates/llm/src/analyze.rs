use tenderlens_common::{AppConfig, Result, TenderLensError};
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::llm_trait::LlmClient;
use crate::prompts::{analysis_prompt, SYSTEM_PROMPT};
use crate::sections::parse_sections;
use crate::truncate::{truncate_chars, MAX_INPUT_CHARS};
use crate::types::{AnalysisResult, CompletionRequest};
use tenderlens_common::config::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL};

/// Tender document analyzer
pub struct TenderAnalyzer<C: LlmClient> {
    client: C,
    model: String,
    max_tokens: u32,
    max_input_chars: usize,
}

impl TenderAnalyzer<OpenAiClient> {
    /// Build an analyzer backed by the OpenAI API
    ///
    /// Fails with a configuration error when no API key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = OpenAiClient::from_config(config)?;
        Ok(Self::new(client)
            .with_model(config.model.clone())
            .with_max_tokens(config.max_output_tokens)
            .with_max_input_chars(config.max_input_chars))
    }
}

impl<C: LlmClient> TenderAnalyzer<C> {
    /// Create new analyzer with default model and limits
    pub fn new(client: C) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Analyze a tender document
    ///
    /// Any failure from the model client is returned as
    /// [`TenderLensError::Analysis`].
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let char_count = text.chars().count();
        info!("Starting tender analysis - Text length: {} chars", char_count);

        let document = truncate_chars(text, self.max_input_chars);
        if document.len() < text.len() {
            warn!(
                "Document truncated to {} of {} characters",
                self.max_input_chars,
                char_count
            );
        }

        let prompt = analysis_prompt(document);
        debug!("Built analysis prompt - Length: {} bytes", prompt.len());

        let request = CompletionRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt,
            max_tokens: self.max_tokens,
        };

        let full_analysis = self
            .client
            .complete(request)
            .await
            .map_err(TenderLensError::analysis)?;

        let structured_data = parse_sections(&full_analysis);
        info!(
            "Tender analysis complete - Response length: {} bytes, Sections: {}",
            full_analysis.len(),
            structured_data.len()
        );

        Ok(AnalysisResult {
            full_analysis,
            structured_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Deterministic stand-in for the model service
    struct FakeClient {
        reply: std::result::Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> CompletionRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl LlmClient for FakeClient {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone().map_err(TenderLensError::llm)
        }
    }

    #[tokio::test]
    async fn test_analyze_returns_text_and_sections() {
        let reply = "Here is the analysis.\n# TENDER SUMMARY\nRoad resurfacing.\n# BASIC INFORMATION\n- Issuing Organization: City of Lyon";
        let analyzer = TenderAnalyzer::new(FakeClient::replying(reply));

        let result = analyzer.analyze("tender text").await.unwrap();

        assert_eq!(result.full_analysis, reply);
        assert_eq!(
            result.structured_data.iter().collect::<Vec<_>>(),
            vec![
                ("TENDER SUMMARY", "Road resurfacing."),
                ("BASIC INFORMATION", "- Issuing Organization: City of Lyon"),
            ]
        );
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let analyzer = TenderAnalyzer::new(FakeClient::replying("# A\nfoo"));
        analyzer.analyze("Supply of furniture").await.unwrap();

        let request = analyzer.client.last_request();
        assert_eq!(request.model, "gpt-4-turbo");
        assert_eq!(request.max_tokens, 4000);
        assert_eq!(request.system, SYSTEM_PROMPT);
        assert_eq!(request.prompt, analysis_prompt("Supply of furniture"));
    }

    #[tokio::test]
    async fn test_long_input_truncated() {
        let head = "x".repeat(MAX_INPUT_CHARS);
        let text = format!("{}OVERFLOW", head);
        let analyzer = TenderAnalyzer::new(FakeClient::replying("# A\nfoo"));

        analyzer.analyze(&text).await.unwrap();

        let prompt = analyzer.client.last_request().prompt;
        assert!(prompt.ends_with(&head));
        assert!(!prompt.contains("OVERFLOW"));
    }

    #[tokio::test]
    async fn test_input_at_limit_passes_through() {
        let text = "y".repeat(MAX_INPUT_CHARS);
        let analyzer = TenderAnalyzer::new(FakeClient::replying("# A\nfoo"));

        analyzer.analyze(&text).await.unwrap();

        assert_eq!(analyzer.client.last_request().prompt, analysis_prompt(&text));
    }

    #[tokio::test]
    async fn test_custom_limits() {
        let analyzer = TenderAnalyzer::new(FakeClient::replying("# A\nfoo"))
            .with_model("gpt-4o")
            .with_max_tokens(1000)
            .with_max_input_chars(5);

        analyzer.analyze("abcdefgh").await.unwrap();

        let request = analyzer.client.last_request();
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.max_tokens, 1000);
        assert!(request.prompt.ends_with("# Tender Text:\nabcde"));
    }

    #[tokio::test]
    async fn test_upstream_failure_wrapped() {
        let analyzer = TenderAnalyzer::new(FakeClient::failing("connection reset"));

        let err = analyzer.analyze("tender text").await.unwrap_err();

        assert!(matches!(err, TenderLensError::Analysis(_)));
        assert!(err.is_upstream());
        assert_eq!(
            err.to_string(),
            "Error analyzing tender: LLM error: connection reset"
        );
    }

    #[tokio::test]
    async fn test_unstructured_reply_gives_empty_sections() {
        let analyzer = TenderAnalyzer::new(FakeClient::replying("I cannot help with that."));

        let result = analyzer.analyze("tender text").await.unwrap();

        assert_eq!(result.full_analysis, "I cannot help with that.");
        assert!(result.structured_data.is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_gives_empty_result() {
        let analyzer = TenderAnalyzer::new(FakeClient::replying(""));

        let result = analyzer.analyze("tender text").await.unwrap();

        assert_eq!(result.full_analysis, "");
        assert!(result.structured_data.is_empty());
    }

    #[test]
    fn test_from_config_without_key_fails() {
        let config = AppConfig::default();
        let err = TenderAnalyzer::from_config(&config).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-test".to_string());
        config.model = "gpt-4o-mini".to_string();

        let analyzer = TenderAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_result_serializes_like_mapping() {
        let result = AnalysisResult {
            full_analysis: "# A\nfoo".to_string(),
            structured_data: parse_sections("# A\nfoo"),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "full_analysis": "# A\nfoo",
                "structured_data": {"A": "foo"}
            })
        );
    }
}
