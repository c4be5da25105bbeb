use std::sync::Arc;

use axum_test::TestServer;
use clinex::config::{ClinexConfig, ConfigBuilder};
use clinex_server::create_router;
use axum::http::StatusCode;
use serde_json::{Value, json};

const SCENARIO: &str = "A 45-year-old man was given Aspirin 81mg once daily.";

async fn server_with(config: ClinexConfig) -> TestServer {
    let note_manager = clinex::init(config)
        .await
        .expect("Failed to initialize note manager");

    let server_config = clinex_server::config::ServerConfig::default();
    let state = Arc::new(clinex_server::AppState::new(note_manager, server_config));

    TestServer::new(create_router(state)).expect("Failed to create test server")
}

/// Test server with rule-based taggers and in-memory storage
async fn create_test_server() -> TestServer {
    server_with(ConfigBuilder::testing().build().expect("Failed to create config")).await
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["storage"], true);
    assert_eq!(json["taggers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_swagger_docs_available() {
    let server = create_test_server().await;

    let response = server.get("/docs/").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_openapi_document_available() {
    let server = create_test_server().await;

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "Clinex API");
    assert!(json["paths"]["/api/extract"].is_object());
}

mod extract {
    use super::*;

    #[tokio::test]
    async fn test_extract_stores_note() {
        let server = create_test_server().await;

        let response = server
            .post("/api/extract")
            .json(&json!({ "text": SCENARIO }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let json: Value = response.json();
        assert!(json["note_id"].is_string());
        assert_eq!(json["text"], SCENARIO);
        assert_eq!(json["entities"]["age"], json!(["45"]));
        assert_eq!(json["entities"]["drug"], json!(["Aspirin"]));
        assert_eq!(json["entities"]["strength"], json!(["81mg"]));
        assert_eq!(json["entities"]["frequency"], json!(["once daily"]));
        assert_eq!(json["entities"]["person"], json!([]));
        assert_eq!(json["entities"].as_object().unwrap().len(), 11);

        let id = json["note_id"].as_str().unwrap();
        let response = server.get(&format!("/api/notes/{}", id)).await;
        response.assert_status_ok();
        let note: Value = response.json();
        assert_eq!(note["id"], id);
        assert_eq!(note["entities"]["drug"], json!(["Aspirin"]));
    }

    #[tokio::test]
    async fn test_extract_accepts_trailing_slash() {
        let server = create_test_server().await;

        let response = server
            .post("/api/extract/")
            .json(&json!({ "text": "Dr. Smith prescribed Smithadol 10mg" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let json: Value = response.json();
        assert_eq!(json["entities"]["person"], json!(["Smith"]));
        assert_eq!(json["entities"]["strength"], json!(["10mg"]));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let server = create_test_server().await;

        let response = server.post("/api/extract").json(&json!({ "text": "" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json["error"], "empty_input");
        assert_eq!(json["message"], "No text provided");

        let response = server.get("/api/extract").await;
        let notes: Value = response.json();
        assert!(notes.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let server = create_test_server().await;

        let response = server.post("/api/extract").json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unavailable_tagger_returns_503() {
        let config = ConfigBuilder::testing()
            .with_remote_general_tagger("http://127.0.0.1:1")
            .build()
            .unwrap();
        let server = server_with(config).await;

        let response = server
            .post("/api/extract")
            .json(&json!({ "text": SCENARIO }))
            .await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let json: Value = response.json();
        assert_eq!(json["error"], "tagger_unavailable");
        assert_eq!(json["details"]["tagger"], "general");

        let health: Value = server.get("/api/health").await.json();
        assert_eq!(health["status"], "DEGRADED");
    }
}

mod notes {
    use super::*;

    #[tokio::test]
    async fn test_list_notes_newest_first() {
        let server = create_test_server().await;

        for text in ["Aspirin 81mg once daily", "Metformin 500mg twice daily"] {
            server
                .post("/api/extract")
                .json(&json!({ "text": text }))
                .await
                .assert_status(StatusCode::CREATED);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let response = server.get("/api/extract").await;
        response.assert_status_ok();
        let notes: Value = response.json();
        let notes = notes.as_array().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0]["text"], "Metformin 500mg twice daily");
        assert_eq!(notes[1]["text"], "Aspirin 81mg once daily");

        let response = server
            .get("/api/extract")
            .add_query_param("limit", 1)
            .await;
        let limited: Value = response.json();
        assert_eq!(limited.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_note() {
        let server = create_test_server().await;

        let response = server.get("/api/notes/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json: Value = response.json();
        assert_eq!(json["error"], "not_found");
    }
}
