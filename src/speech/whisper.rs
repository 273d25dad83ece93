//! Whisper-compatible transcription client.
//!
//! Posts uploaded audio to an OpenAI-style `/v1/audio/transcriptions`
//! endpoint and returns the recognized text.

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::SpeechConfig;
use crate::error::{Result, WizardError};
use crate::speech::{AudioUpload, Transcriber};

/// Default timeout for transcription requests.
const TRANSCRIBE_TIMEOUT_SECS: u64 = 120;

/// HTTP client for a Whisper-compatible transcription server.
#[derive(Debug, Clone)]
pub struct WhisperClient {
    config: SpeechConfig,
    client: Client,
}

impl WhisperClient {
    /// Creates a new client for the configured transcription server.
    pub fn new(config: SpeechConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TRANSCRIBE_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                WizardError::transcription(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Returns the transcription endpoint URL.
    fn transcribe_url(&self) -> String {
        format!("{}/v1/audio/transcriptions", self.config.base_url)
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String> {
        upload.validate_extension()?;

        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| WizardError::transcription(format!("Invalid upload: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone());

        let response = self
            .client
            .post(self.transcribe_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WizardError::transcription("Transcription request timed out.")
                } else if e.is_connect() {
                    WizardError::transcription(
                        "Failed to connect to the transcription server. Is it running?",
                    )
                } else {
                    WizardError::transcription(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WizardError::transcription(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(WizardError::transcription(format!(
                "Transcription API error ({}): {}",
                status, body
            )));
        }

        let response: TranscriptionResponse = serde_json::from_str(&body)
            .map_err(|e| WizardError::transcription(format!("Failed to parse response: {}", e)))?;

        Ok(response.text)
    }
}

/// Response shape of the transcription endpoint.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}
