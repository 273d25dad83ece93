//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns, so the full
//! workflow can run without a live Ollama instance.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::types::Message;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default farm-domain responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the input contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Generates a mock response based on the full prompt text.
    fn mock_response(&self, input: &str) -> String {
        let input_lower = input.to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Router prompt: database questions mention cows or milk. Match
        // against the question itself (after the final "Soru:"), not the
        // schema text or the examples embedded in the template.
        if input_lower.contains("yönlendirme asistanısın") {
            let question = input_lower
                .rsplit("soru:")
                .next()
                .unwrap_or(&input_lower);
            if question.contains("inek") || question.contains("süt") {
                return "SQL".to_string();
            }
            return "GENERAL".to_string();
        }

        // SQL synthesizer prompt
        if input_lower.contains("veritabanı mühendisisin") {
            if input_lower.contains("kaç inek") {
                return "SELECT COUNT(*) FROM inekler;".to_string();
            }
            return "```sql\nSELECT s.gunluk_sagim FROM sut s JOIN inekler i ON s.inek_id = i.inek_id WHERE i.inek_name ILIKE '%Sarıkız%';\n```"
                .to_string();
        }

        // Result explanation prompt
        if input_lower.contains("veritabanından gelen") {
            return "Sarıkız dün 25.5 litre süt verdi, gayet iyi bir verim!".to_string();
        }

        // General chat prompt
        if input_lower.contains("neşeli bir yapay zeka") {
            return "Merhaba! Ben Süt Sihirbazı, çiftliğinle ilgili her soruda yanındayım."
                .to_string();
        }

        "Bu soruyu anlayamadım, tekrar sorabilir misin?".to_string()
    }

    /// Concatenates all message content so pattern matching can see both
    /// system and user text.
    fn combined_input(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let input = Self::combined_input(messages);
        Ok(self.mock_response(&input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::farm_schema;
    use crate::llm::prompt;

    #[tokio::test]
    async fn test_router_classifies_farm_question_as_sql() {
        let client = MockLlmClient::new();
        let messages = prompt::build_router_messages(&farm_schema(), "Kaç inek var?");
        let response = client.complete(&messages).await.unwrap();
        assert_eq!(response, "SQL");
    }

    #[tokio::test]
    async fn test_router_classifies_chat_as_general() {
        let client = MockLlmClient::new();
        let messages = prompt::build_router_messages(&farm_schema(), "Merhaba, nasılsın?");
        let response = client.complete(&messages).await.unwrap();
        assert_eq!(response, "GENERAL");
    }

    #[tokio::test]
    async fn test_query_writer_returns_sql() {
        let client = MockLlmClient::new();
        let messages =
            prompt::build_query_messages(&farm_schema(), "Sarıkız'ın süt verimi nedir?");
        let response = client.complete(&messages).await.unwrap();
        assert!(response.contains("SELECT"));
    }

    #[tokio::test]
    async fn test_custom_response_takes_precedence() {
        let client = MockLlmClient::new().with_response("kaç inek", "SELECT 42;");
        let messages = vec![Message::user("Kaç inek var?")];
        let response = client.complete(&messages).await.unwrap();
        assert_eq!(response, "SELECT 42;");
    }

    #[tokio::test]
    async fn test_unknown_input_fallback() {
        let client = MockLlmClient::new();
        let messages = vec![Message::user("xyzzy")];
        let response = client.complete(&messages).await.unwrap();
        assert!(response.contains("anlayamadım"));
    }
}
