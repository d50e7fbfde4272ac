use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Provider-neutral completion request handed to an [`crate::LlmClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Model name (e.g., "gpt-4-turbo")
    pub model: String,

    /// System-role instruction
    pub system: String,

    /// User-role prompt
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

impl From<&CompletionRequest> for ChatRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![
                ChatMessage::new("system", &request.system),
                ChatMessage::new("user", &request.prompt),
            ],
            max_tokens: request.max_tokens,
        }
    }
}

/// Single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

/// `content` is null when the model refuses or calls a tool
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by the provider on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

/// Section heading to section body, in order of first appearance
///
/// Re-inserting an existing heading replaces its body but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<(String, String)>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a section body
    pub fn insert(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let title = title.into();
        let body = body.into();
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = body,
            None => self.entries.push((title, body)),
        }
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, body)| body.as_str())
    }

    pub fn contains_key(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, b)| (t.as_str(), b.as_str()))
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, body) in &self.entries {
            map.serialize_entry(title, body)?;
        }
        map.end()
    }
}

/// Tender analysis result
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Unparsed model response
    pub full_analysis: String,

    /// Response split along `# ` headings
    pub structured_data: Sections,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let request = CompletionRequest {
            model: "gpt-4-turbo".to_string(),
            system: "sys".to_string(),
            prompt: "hello".to_string(),
            max_tokens: 4000,
        };
        let json = serde_json::to_value(ChatRequest::from(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4-turbo",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ],
                "max_tokens": 4000
            })
        );
    }

    #[test]
    fn test_chat_response_null_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_sections_overwrite_keeps_position() {
        let mut sections = Sections::new();
        sections.insert("A", "1");
        sections.insert("B", "2");
        sections.insert("A", "3");
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(sections.get("A"), Some("3"));
    }

    #[test]
    fn test_sections_serialize_in_order() {
        let mut sections = Sections::new();
        sections.insert("Zeta", "z");
        sections.insert("Alpha", "a");
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(json, r#"{"Zeta":"z","Alpha":"a"}"#);
    }
}
