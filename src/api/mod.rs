//! HTTP API for Süt Sihirbazı.
//!
//! Built on actix-web; the handlers share a single [`AppState`] holding
//! the workflow and the transcriber.

pub mod models;
pub mod routes;

pub use models::{
    ErrorResponse, QueryRequest, QueryResponse, TranscriptionResponse, VoiceQueryResponse,
};
pub use routes::configure_routes;

use crate::speech::Transcriber;
use crate::workflow::Workflow;
use std::sync::Arc;

/// Shared state handed to every request handler.
pub struct AppState {
    /// The question-answering workflow.
    pub workflow: Arc<Workflow>,
    /// The speech-to-text backend.
    pub transcriber: Arc<dyn Transcriber>,
}
