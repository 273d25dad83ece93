//! Speech-to-text integration for Süt Sihirbazı.
//!
//! The voice endpoints depend on the [`Transcriber`] trait instead of a
//! concrete implementation, which keeps request handling decoupled from
//! the transcription service.

mod mock;
mod whisper;

pub use mock::MockTranscriber;
pub use whisper::WhisperClient;

use crate::config::SpeechConfig;
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::Arc;

/// Audio file extensions accepted by the voice endpoints.
pub const ALLOWED_EXTENSIONS: &[&str] = &["wav", "mp3", "m4a", "ogg", "flac"];

/// An uploaded audio file waiting to be transcribed.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Original filename as sent by the client.
    pub filename: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl AudioUpload {
    /// Creates a new upload from a filename and its bytes.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Returns the lowercase file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    /// Validates that the file extension is an accepted audio format.
    pub fn validate_extension(&self) -> Result<()> {
        match self.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            Some(ext) => Err(WizardError::transcription(format!(
                "Desteklenmeyen dosya formatı: .{ext}. Desteklenen formatlar: wav, mp3, m4a, ogg, flac"
            ))),
            None => Err(WizardError::transcription(
                "Dosya uzantısı bulunamadı. Desteklenen formatlar: wav, mp3, m4a, ogg, flac",
            )),
        }
    }
}

/// Backend contract implemented by speech-to-text services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes the uploaded audio and returns the recognized text.
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String>;
}

/// Speech provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechProvider {
    /// Whisper-compatible HTTP transcription server
    #[default]
    Whisper,
    /// Mock transcriber for testing
    Mock,
}

impl SpeechProvider {
    /// Returns the provider as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whisper => "whisper",
            Self::Mock => "mock",
        }
    }
}

impl FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whisper" => Ok(Self::Whisper),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown speech provider: {}", s)),
        }
    }
}

/// Creates a transcriber from the given configuration.
pub fn create_transcriber(config: &SpeechConfig) -> Result<Arc<dyn Transcriber>> {
    let provider = config
        .provider
        .parse::<SpeechProvider>()
        .map_err(WizardError::config)?;

    match provider {
        SpeechProvider::Whisper => Ok(Arc::new(WhisperClient::new(config.clone())?)),
        SpeechProvider::Mock => Ok(Arc::new(MockTranscriber::new())),
    }
}
