use axum::{response::IntoResponse, Json};

use super::types::SubmissionId;

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("Submission {0} not found")]
    NotFound(SubmissionId),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No submission ids left")]
    QueueFull,
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::QueueFull => StatusCode::SERVICE_UNAVAILABLE,
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
