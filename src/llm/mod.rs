//! LLM integration for Süt Sihirbazı.
//!
//! Provides the trait and implementations for communicating with LLM providers.

pub mod mock;
pub mod ollama;
pub mod parser;
pub mod prompt;
pub mod types;

pub use mock::MockLlmClient;
pub use ollama::{OllamaClient, OllamaConfig};
pub use parser::strip_sql_fences;
pub use types::{Message, Role};

use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{Result, WizardError};

/// Trait for LLM clients that can generate completions.
///
/// Implementations must be thread-safe (Send + Sync) to support async operations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given messages.
    ///
    /// Returns the complete response as a single string.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Local or cloud-proxied Ollama instance
    #[default]
    Ollama,
    /// Mock client for testing (no external service required)
    Mock,
}

impl LlmProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown LLM provider: {}", s)),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Creates an LLM client from the given configuration.
///
/// This is the central factory function for LLM clients.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let provider = config
        .provider
        .parse::<LlmProvider>()
        .map_err(WizardError::config)?;

    match provider {
        LlmProvider::Ollama => {
            let client = OllamaClient::new(
                OllamaConfig::new(config.model.clone()).with_url(config.base_url.clone()),
            )?;
            Ok(Arc::new(client))
        }
        LlmProvider::Mock => Ok(Arc::new(MockLlmClient::new())),
    }
}
