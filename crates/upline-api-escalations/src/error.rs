//! API error types for escalation endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Escalations API error type.
#[derive(Debug, Error)]
pub enum ApiEscalationsError {
    /// Required input missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Escalation not found.
    #[error("Escalation not found: {0}")]
    EscalationNotFound(Uuid),

    /// Feedback submission not found.
    #[error("Feedback submission not found: {0}")]
    FeedbackNotFound(Uuid),

    /// Unrecognized action, or an escalate past the highest matrix level.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Database error. The enclosing transaction has been rolled back.
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiEscalationsError {
    /// Whether the error maps to a 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EscalationNotFound(_) | Self::FeedbackNotFound(_)
        )
    }
}

impl IntoResponse for ApiEscalationsError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match &self {
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                msg.clone(),
                None,
            ),
            Self::EscalationNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Escalation not found: {id}"),
                None,
            ),
            Self::FeedbackNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Feedback submission not found: {id}"),
                None,
            ),
            Self::InvalidAction(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_action", msg.clone(), None)
            }
            Self::Database(ref e) => {
                tracing::error!(error = ?e, "Database error in escalations API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                    Some(serde_json::json!(
                        "transaction rolled back; no changes were applied"
                    )),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiEscalationsError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiEscalationsError>;
