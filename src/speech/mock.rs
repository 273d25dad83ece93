//! Mock transcriber for testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::speech::{AudioUpload, Transcriber};

/// Mock transcriber that returns a fixed transcript.
///
/// Validates the upload the same way the real client does, so tests
/// exercise the extension check without a transcription server.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    transcript: String,
}

impl MockTranscriber {
    /// Creates a mock that returns a default farm question.
    pub fn new() -> Self {
        Self {
            transcript: "Kaç inek var?".to_string(),
        }
    }

    /// Creates a mock that returns the given transcript.
    pub fn with_transcript(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String> {
        upload.validate_extension()?;
        Ok(self.transcript.clone())
    }
}
