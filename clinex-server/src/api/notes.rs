//! Extraction and note endpoints

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::{
    api::dto::{ExtractRequest, ExtractResponse, ListNotesParams, NoteDto},
    error::{ServerResult, not_found},
    state::AppState,
};

/// Extract entities from a note and store it
#[utoipa::path(
    post,
    path = "/api/extract",
    tag = "extraction",
    request_body = ExtractRequest,
    responses(
        (status = 201, description = "Note stored with its entities", body = ExtractResponse),
        (status = 400, description = "No text provided", body = crate::error::ErrorResponse),
        (status = 503, description = "A tagger is unavailable", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn extract_note(
    State(state): State<Arc<AppState>>,
    JsonExtractor(request): JsonExtractor<ExtractRequest>,
) -> ServerResult<(StatusCode, Json<ExtractResponse>)> {
    let note = state.note_manager.submit_note(&request.text).await?;
    Ok((StatusCode::CREATED, Json(ExtractResponse::from(note))))
}

/// List stored notes, newest first
#[utoipa::path(
    get,
    path = "/api/extract",
    tag = "extraction",
    params(ListNotesParams),
    responses(
        (status = 200, description = "Stored notes", body = Vec<NoteDto>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListNotesParams>,
) -> ServerResult<Json<Vec<NoteDto>>> {
    let notes = state.note_manager.list_notes(params.limit).await?;
    Ok(Json(notes.into_iter().map(NoteDto::from).collect()))
}

/// Get a stored note by ID
#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    tag = "extraction",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteDto),
        (status = 404, description = "Note not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<NoteDto>> {
    let note = state
        .note_manager
        .get_note(&id)
        .await?
        .ok_or_else(|| not_found("Note", &id))?;

    Ok(Json(NoteDto::from(note)))
}
