//! Error types for Süt Sihirbazı.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for Süt Sihirbazı operations.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, policy rejections, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// LLM API errors (unreachable server, timeouts, malformed responses, etc.)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Speech-to-text errors (unsupported format, transcription failure, etc.)
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WizardError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an LLM error with the given message.
    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    /// Creates a transcription error with the given message.
    pub fn transcription(msg: impl Into<String>) -> Self {
        Self::Transcription(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Llm(_) => "LLM Error",
            Self::Transcription(_) => "Transcription Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using WizardError.
pub type Result<T> = std::result::Result<T, WizardError>;
