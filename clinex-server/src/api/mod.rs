//! API implementation for the Clinex HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    response::Json,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod dto;
pub mod notes;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        notes::extract_note,
        notes::list_notes,
        notes::get_note,
        health_check,
    ),
    components(
        schemas(
            dto::ExtractRequest,
            dto::ExtractResponse,
            dto::NoteDto,
            dto::HealthDto,
            dto::TaggerStatusDto,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "extraction", description = "Clinical note entity extraction"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Clinex API",
        version = "1.0.0",
        description = "Extracts people, ages, medications and clinical findings from free-text clinical notes.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/extract", get(notes::list_notes).post(notes::extract_note))
        .route("/extract/", get(notes::list_notes).post(notes::extract_note))
        .route("/notes/{id}", get(notes::get_note))
        .route("/health", get(health_check))
        .with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint with tagger availability
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = dto::HealthDto)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<dto::HealthDto> {
    Json(state.note_manager.health().await.into())
}
