use axum::{response::IntoResponse, Json};

use super::storage::StorageError;
use crate::catalog::{CourseId, LessonId};

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("Course not found")]
    CourseNotFound(CourseId),
    /// A course reference in the URL that is not a course id at all.
    #[error("Course not found")]
    UnknownCourse(String),
    #[error("Lesson {lesson_id} not found in course {course_id}")]
    LessonNotFound {
        course_id: CourseId,
        lesson_id: LessonId,
    },
    #[error("Lesson {lesson} not found in course {course_id}")]
    UnknownLesson { course_id: CourseId, lesson: String },
    #[error("Stored progress under {key} is unreadable ({reason}); reset the course progress to continue")]
    CorruptRecord { key: String, reason: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        let status = match &self {
            Self::CourseNotFound(_)
            | Self::UnknownCourse(_)
            | Self::LessonNotFound { .. }
            | Self::UnknownLesson { .. } => StatusCode::NOT_FOUND,
            Self::CorruptRecord { .. } => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
