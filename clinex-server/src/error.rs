//! Error handling for the Clinex server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinex::ClinexError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Clinex library error
    #[error("{0}")]
    Clinex(#[from] ClinexError),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Clinex(ClinexError::EmptyInput) => StatusCode::BAD_REQUEST,
            ServerError::Clinex(ClinexError::TaggerUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Clinex(ClinexError::NoteNotFound(_)) | ServerError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Clinex(ClinexError::EmptyInput) => "empty_input",
            ServerError::Clinex(ClinexError::TaggerUnavailable { .. }) => "tagger_unavailable",
            ServerError::Clinex(ClinexError::NoteNotFound(_)) | ServerError::NotFound(_) => {
                "not_found"
            }
            ServerError::Clinex(_) => "clinex_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let details = match &self {
            ServerError::Clinex(ClinexError::TaggerUnavailable { name, .. }) => {
                Some(serde_json::json!({ "tagger": name }))
            }
            _ => None,
        };

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            details,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a not found error
pub fn not_found(resource: &str, id: &str) -> ServerError {
    ServerError::NotFound(format!("{} with id '{}' not found", resource, id))
}
