/// TenderLens error types
#[derive(Debug, thiserror::Error)]
pub enum TenderLensError {
    /// Configuration error (missing credential, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model client error (transport, HTTP status, malformed response)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Upstream failure surfaced by an analysis call
    #[error("{0}")]
    Analysis(String),
}

impl TenderLensError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Wrap an upstream failure as an analysis error
    pub fn analysis<E: std::fmt::Display>(source: E) -> Self {
        Self::Analysis(format!("Error analyzing tender: {}", source))
    }

    /// Raised while building a client or analyzer, before any model call
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Raised by a model call
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Llm(_) | Self::Analysis(_))
    }
}
