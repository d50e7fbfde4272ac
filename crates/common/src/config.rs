use crate::error::TenderLensError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default OpenAI-compatible API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

/// Default cap on generated tokens per analysis
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;

/// Default cap on document characters sent to the model
pub const DEFAULT_MAX_INPUT_CHARS: usize = 30_000;

/// TenderLens application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model provider credential
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    pub api_base_url: String,

    /// Chat model name
    pub model: String,

    /// Maximum tokens the model may generate
    pub max_output_tokens: u32,

    /// Document text is cut to this many characters before prompting
    pub max_input_chars: usize,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            request_timeout_secs: 300,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Self {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            api_key: var("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            api_base_url: var("OPENAI_BASE_URL").unwrap_or(defaults.api_base_url),
            model: var("TENDERLENS_MODEL").unwrap_or(defaults.model),
            max_output_tokens: var("TENDERLENS_MAX_TOKENS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_output_tokens),
            max_input_chars: var("TENDERLENS_MAX_INPUT_CHARS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_input_chars),
            request_timeout_secs: var("TENDERLENS_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            log_dir: var("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Get the credential, failing if none was configured
    pub fn require_api_key(&self) -> Result<&str, TenderLensError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| TenderLensError::config("OpenAI API key is required"))
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TenderLensError> {
        if self.model.is_empty() {
            return Err(TenderLensError::config("Model name cannot be empty"));
        }

        if !self.api_base_url.starts_with("http://")
            && !self.api_base_url.starts_with("https://") {
            return Err(TenderLensError::config(
                "API base URL must start with http:// or https://"
            ));
        }

        if self.max_output_tokens == 0 {
            return Err(TenderLensError::config("Max output tokens cannot be 0"));
        }

        if self.max_input_chars == 0 {
            return Err(TenderLensError::config("Max input chars cannot be 0"));
        }

        Ok(())
    }
}
