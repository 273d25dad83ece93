//! HTTP route handlers.
//!
//! Exposes the workflow and the transcriber over four endpoints:
//! a health message at `/`, text questions at `/query`, audio
//! transcription at `/transcribe`, and the combined `/voice-query`.

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;
use serde_json::json;
use tracing::error;

use crate::api::models::{ErrorResponse, QueryRequest, QueryResponse, TranscriptionResponse, VoiceQueryResponse};
use crate::api::AppState;
use crate::error::WizardError;
use crate::speech::AudioUpload;

/// Configures all API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(query)
        .service(transcribe)
        .service(voice_query);
}

/// Health message, mirroring the assistant persona.
#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Süt Sihirbazı API Çalışıyor"
    }))
}

/// Answers a text question through the workflow.
#[post("/query")]
async fn query(state: web::Data<AppState>, body: web::Json<QueryRequest>) -> HttpResponse {
    match state.workflow.run(&body.question).await {
        Ok(session) => HttpResponse::Ok().json(QueryResponse::from_state(session)),
        Err(e) => {
            error!("Workflow failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Transcribes an uploaded audio file.
#[post("/transcribe")]
async fn transcribe(state: web::Data<AppState>, payload: Multipart) -> HttpResponse {
    let upload = match read_audio_upload(payload).await {
        Ok(upload) => upload,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    };

    if let Err(e) = upload.validate_extension() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
    }

    match state.transcriber.transcribe(&upload).await {
        Ok(text) => HttpResponse::Ok().json(TranscriptionResponse {
            text,
            success: true,
        }),
        Err(e) => {
            error!("Transcription failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Transcribes an uploaded audio file, then answers the recognized question.
#[post("/voice-query")]
async fn voice_query(state: web::Data<AppState>, payload: Multipart) -> HttpResponse {
    let upload = match read_audio_upload(payload).await {
        Ok(upload) => upload,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    };

    if let Err(e) = upload.validate_extension() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
    }

    let question = match state.transcriber.transcribe(&upload).await {
        Ok(text) => text,
        Err(e) => {
            error!("Transcription failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()));
        }
    };

    match state.workflow.run(&question).await {
        Ok(session) => HttpResponse::Ok().json(VoiceQueryResponse::from_state(question, session)),
        Err(e) => {
            error!("Workflow failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Reads the audio part of a multipart request into an AudioUpload.
///
/// The part may be named `file` or `audio`; the mobile client uploads
/// under `audio`.
async fn read_audio_upload(mut payload: Multipart) -> crate::error::Result<AudioUpload> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| WizardError::transcription(format!("Geçersiz multipart isteği: {e}")))?
    {
        if !matches!(field.name(), Some("file") | Some("audio")) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .ok_or_else(|| WizardError::transcription("Dosya adı bulunamadı"))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| WizardError::transcription(format!("Dosya okunamadı: {e}")))?
        {
            bytes.extend_from_slice(&chunk);
        }

        return Ok(AudioUpload::new(filename, bytes));
    }

    Err(WizardError::transcription(
        "Ses dosyası bulunamadı: 'file' veya 'audio' alanı eksik",
    ))
}
