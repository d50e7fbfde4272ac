//! TenderLens LLM Integration
//!
//! Tender analysis prompt, OpenAI client, and response section parsing

mod analyze;
mod client;
mod llm_trait;
mod prompts;
mod sections;
mod truncate;
mod types;

pub use analyze::TenderAnalyzer;
pub use client::OpenAiClient;
pub use llm_trait::LlmClient;
pub use prompts::{analysis_prompt, SECTION_TITLES, SYSTEM_PROMPT};
pub use sections::parse_sections;
pub use truncate::{truncate_chars, MAX_INPUT_CHARS};
pub use types::{AnalysisResult, ChatMessage, ChatRequest, ChatResponse, CompletionRequest, Sections};
