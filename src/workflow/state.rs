//! Per-request session state for the question-answering workflow.
//!
//! Each incoming question gets a fresh `SessionState`. The workflow steps
//! fill the fields in order; the branch taken decides which stay `None`.

use serde::{Deserialize, Serialize};

/// How the router classified a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// The question needs data from the farm database.
    Sql,
    /// General chat or a question outside the database.
    General,
}

impl Classification {
    /// Returns the classification as a string for API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::General => "general",
        }
    }
}

/// State accumulated while answering a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// The user's question, verbatim.
    pub question: String,

    /// Router decision. Set by the classify step.
    pub classification: Option<Classification>,

    /// Generated SQL. Only set on the sql branch.
    pub query: Option<String>,

    /// Rendered query result, or the "Hata oluştu: ..." error text.
    /// Only set on the sql branch.
    pub result: Option<String>,

    /// Final natural-language answer.
    pub answer: Option<String>,
}

impl SessionState {
    /// Creates a fresh state for the given question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            classification: None,
            query: None,
            result: None,
            answer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_as_str() {
        assert_eq!(Classification::Sql.as_str(), "sql");
        assert_eq!(Classification::General.as_str(), "general");
    }

    #[test]
    fn test_classification_serialization() {
        let json = serde_json::to_string(&Classification::Sql).unwrap();
        assert_eq!(json, "\"sql\"");
        let json = serde_json::to_string(&Classification::General).unwrap();
        assert_eq!(json, "\"general\"");
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SessionState::new("Kaç inek var?");
        assert_eq!(state.question, "Kaç inek var?");
        assert!(state.classification.is_none());
        assert!(state.query.is_none());
        assert!(state.result.is_none());
        assert!(state.answer.is_none());
    }
}
