//! Request and response models for the HTTP API.

use crate::workflow::SessionState;
use serde::{Deserialize, Serialize};

/// Body of a POST /query request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's question in natural language.
    pub question: String,
}

/// Response for a text question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Final natural-language answer.
    pub answer: String,

    /// Router decision: "sql" or "general".
    pub classification: String,

    /// Generated SQL, present only on the sql branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,

    /// Rendered query result or error text, present only on the sql branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_result: Option<String>,
}

impl QueryResponse {
    /// Builds a response from a finished workflow state.
    pub fn from_state(state: SessionState) -> Self {
        Self {
            answer: state.answer.unwrap_or_default(),
            classification: state
                .classification
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "general".to_string()),
            sql_query: state.query,
            sql_result: state.result,
        }
    }
}

/// Response for a POST /transcribe request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Recognized text.
    pub text: String,

    /// Whether transcription succeeded.
    pub success: bool,
}

/// Response for a POST /voice-query request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceQueryResponse {
    /// Text recognized from the uploaded audio.
    pub transcription: String,

    /// Final natural-language answer.
    pub answer: String,

    /// Router decision: "sql" or "general".
    pub classification: String,

    /// Generated SQL, present only on the sql branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,

    /// Rendered query result or error text, present only on the sql branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_result: Option<String>,
}

impl VoiceQueryResponse {
    /// Builds a response from a transcription and a finished workflow state.
    pub fn from_state(transcription: String, state: SessionState) -> Self {
        let query = QueryResponse::from_state(state);
        Self {
            transcription,
            answer: query.answer,
            classification: query.classification,
            sql_query: query.sql_query,
            sql_result: query.sql_result,
        }
    }
}

/// Error body returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub detail: String,
}

impl ErrorResponse {
    /// Creates an error body with the given detail.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::Classification;

    #[test]
    fn test_query_response_from_sql_state() {
        let mut state = SessionState::new("Kaç inek var?");
        state.classification = Some(Classification::Sql);
        state.query = Some("SELECT COUNT(*) FROM inekler;".to_string());
        state.result = Some("[(12)]".to_string());
        state.answer = Some("Çiftlikte 12 inek var!".to_string());

        let response = QueryResponse::from_state(state);
        assert_eq!(response.classification, "sql");
        assert_eq!(
            response.sql_query.as_deref(),
            Some("SELECT COUNT(*) FROM inekler;")
        );
        assert_eq!(response.sql_result.as_deref(), Some("[(12)]"));
    }

    #[test]
    fn test_query_response_omits_sql_fields_on_general() {
        let mut state = SessionState::new("Merhaba");
        state.classification = Some(Classification::General);
        state.answer = Some("Merhaba!".to_string());

        let response = QueryResponse::from_state(state);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.classification, "general");
        assert!(!json.contains("sql_query"));
        assert!(!json.contains("sql_result"));
    }

    #[test]
    fn test_voice_query_response_includes_transcription() {
        let mut state = SessionState::new("Kaç inek var?");
        state.classification = Some(Classification::Sql);
        state.answer = Some("12 inek var.".to_string());

        let response = VoiceQueryResponse::from_state("Kaç inek var?".to_string(), state);
        assert_eq!(response.transcription, "Kaç inek var?");
        assert_eq!(response.classification, "sql");
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new("Desteklenmeyen dosya formatı: .txt");
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"detail\""));
    }
}
