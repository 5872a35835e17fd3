use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Course, CourseId, Lesson, LessonId};
use crate::progress::error::ProgressError;
use crate::progress::tracker::ProgressSummary;
use crate::shared::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonView {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub course: Course,
    pub lessons: Vec<LessonView>,
    pub progress: ProgressSummary,
}

/// Parses the `:id` segment. Anything that is not a course id is reported
/// the same way as an id with no course behind it.
fn parse_course_id(raw: &str) -> Result<CourseId, ProgressError> {
    raw.trim()
        .parse::<CourseId>()
        .map_err(|_| ProgressError::UnknownCourse(raw.to_string()))
}

fn parse_lesson_id(course_id: CourseId, raw: &str) -> Result<LessonId, ProgressError> {
    raw.trim()
        .parse::<LessonId>()
        .map_err(|_| ProgressError::UnknownLesson {
            course_id,
            lesson: raw.to_string(),
        })
}

/// Runs store-bound work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ProgressError>
where
    F: FnOnce() -> Result<T, ProgressError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ProgressError::Internal(e.to_string()))?
}

/// Course details with lessons and the learner's progress through them.
pub async fn handle_get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProgressError> {
    let course_id = parse_course_id(&course_id)?;
    let tracker = state.progress.clone();
    let summary = run_blocking(move || tracker.summary(course_id)).await?;

    let course = state
        .catalog
        .course(course_id)
        .cloned()
        .ok_or(ProgressError::CourseNotFound(course_id))?;
    let lessons = state
        .catalog
        .lessons(course_id)
        .iter()
        .map(|lesson| LessonView {
            is_completed: summary.completed_lessons.contains(&lesson.id),
            lesson: lesson.clone(),
        })
        .collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "data": CourseDetail {
            course,
            lessons,
            progress: summary,
        }
    })))
}

pub async fn handle_get_progress(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProgressError> {
    let course_id = parse_course_id(&course_id)?;
    let tracker = state.progress.clone();
    let summary = run_blocking(move || tracker.summary(course_id)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": summary
    })))
}

pub async fn handle_toggle_lesson(
    State(state): State<Arc<AppState>>,
    Path((course_id, lesson_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ProgressError> {
    let course_id = parse_course_id(&course_id)?;
    let lesson_id = parse_lesson_id(course_id, &lesson_id)?;
    let tracker = state.progress.clone();
    let outcome = run_blocking(move || tracker.toggle(course_id, lesson_id)).await?;

    let message = if outcome.completed {
        "Lesson completed!"
    } else {
        "Lesson marked as incomplete"
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "message": message,
        "data": outcome
    })))
}

pub async fn handle_reset_progress(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<serde_json::Value>, ProgressError> {
    let course_id = parse_course_id(&course_id)?;
    let tracker = state.progress.clone();
    run_blocking(move || tracker.reset(course_id)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Course progress reset"
    })))
}
