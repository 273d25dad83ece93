//! HTTP endpoint tests using actix test utilities with mock backends.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use sut_sihirbazi::api::{configure_routes, AppState, QueryRequest};
use sut_sihirbazi::db::MockDatabaseClient;
use sut_sihirbazi::llm::MockLlmClient;
use sut_sihirbazi::safety::StatementPolicy;
use sut_sihirbazi::speech::MockTranscriber;
use sut_sihirbazi::workflow::Workflow;

fn app_state(with_db: bool) -> web::Data<AppState> {
    let db = with_db.then(|| {
        Arc::new(MockDatabaseClient::new()) as Arc<dyn sut_sihirbazi::db::DatabaseClient>
    });
    let workflow = Workflow::new(
        Arc::new(MockLlmClient::new()),
        db,
        StatementPolicy::ReadOnly,
    );
    web::Data::new(AppState {
        workflow: Arc::new(workflow),
        transcriber: Arc::new(MockTranscriber::with_transcript("Kaç inek var?")),
    })
}

/// Builds a multipart/form-data body with a single named file part.
fn multipart_body(field: &str, filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "sut-sihirbazi-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={boundary}"),
        body,
    )
}

#[actix_web::test]
async fn test_root_message() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Süt Sihirbazı API Çalışıyor");
}

#[actix_web::test]
async fn test_query_returns_sql_fields_on_sql_branch() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(QueryRequest {
            question: "Dünkü süt üretimi nedir?".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["classification"], "sql");
    assert!(body["sql_query"].is_string());
    assert!(body["answer"].is_string());
}

#[actix_web::test]
async fn test_query_without_database_goes_general() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(false))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/query")
        .set_json(QueryRequest {
            question: "Kaç inek var?".to_string(),
        })
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["classification"], "general");
    assert!(body.get("sql_query").is_none());
}

#[actix_web::test]
async fn test_transcribe_accepts_wav() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_body("file", "soru.wav", &[0u8; 32]);
    let req = test::TestRequest::post()
        .uri("/transcribe")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["text"], "Kaç inek var?");
    assert_eq!(body["success"], true);
}

#[actix_web::test]
async fn test_transcribe_rejects_txt_with_400() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_body("file", "notlar.txt", b"bu ses degil");
    let req = test::TestRequest::post()
        .uri("/transcribe")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Desteklenmeyen dosya formatı"));
}

#[actix_web::test]
async fn test_transcribe_accepts_audio_field_name() {
    // The mobile client uploads the recording under the `audio` part name
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_body("audio", "kayit.m4a", &[0u8; 32]);
    let req = test::TestRequest::post()
        .uri("/transcribe")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["text"], "Kaç inek var?");
}

#[actix_web::test]
async fn test_voice_query_runs_workflow_on_transcript() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let (content_type, body) = multipart_body("file", "soru.mp3", &[0u8; 32]);
    let req = test::TestRequest::post()
        .uri("/voice-query")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["transcription"], "Kaç inek var?");
    assert_eq!(body["classification"], "sql");
    assert!(body["answer"].is_string());
}

#[actix_web::test]
async fn test_voice_query_missing_file_field_is_400() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(true))
            .configure(configure_routes),
    )
    .await;

    let boundary = "sut-sihirbazi-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         deger\r\n\
         --{boundary}--\r\n"
    );
    let req = test::TestRequest::post()
        .uri("/voice-query")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
