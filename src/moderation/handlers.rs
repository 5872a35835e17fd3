use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::moderation::error::ModerationError;
use crate::moderation::intake::CreatorIntake;
use crate::moderation::types::{
    CourseRequestForm, CourseSubmissionRequest, LessonSubmissionRequest, SubmissionDraft,
    SubmissionFilters, SubmissionId, SubmissionStatus,
};
use crate::shared::state::AppState;

/// List submissions, optionally filtered with `?status=pending`.
pub async fn handle_list_submissions(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<SubmissionFilters>,
) -> Result<Json<serde_json::Value>, ModerationError> {
    let status = match filters.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) if raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(
            raw.parse::<SubmissionStatus>()
                .map_err(ModerationError::Validation)?,
        ),
    };

    let queue = state.submissions.read().await;
    let submissions = queue.list(status);

    Ok(Json(serde_json::json!({
        "success": true,
        "data": submissions,
        "total": submissions.len(),
    })))
}

pub async fn handle_submission_stats(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let stats = state.submissions.read().await.stats();
    Json(serde_json::json!({
        "success": true,
        "data": stats,
    }))
}

pub async fn handle_approve_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ModerationError> {
    let id = parse_submission_id(&id)?;
    let mut queue = state.submissions.write().await;
    let submission = queue.approve(id)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission approved",
        "data": submission,
    })))
}

pub async fn handle_reject_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ModerationError> {
    let id = parse_submission_id(&id)?;
    let mut queue = state.submissions.write().await;
    let submission = queue.reject(id)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission rejected",
        "data": submission,
    })))
}

pub async fn handle_submit_course(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CourseSubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ModerationError> {
    let Json(req) = body.map_err(invalid_body)?;
    let draft = intake(&state).course(req)?;
    enqueue(&state, draft, "Course submitted for review").await
}

pub async fn handle_submit_lesson(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LessonSubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ModerationError> {
    let Json(req) = body.map_err(invalid_body)?;
    let draft = intake(&state).lesson(req)?;
    enqueue(&state, draft, "Lesson submitted for review").await
}

pub async fn handle_request_course(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CourseRequestForm>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), ModerationError> {
    let Json(req) = body.map_err(invalid_body)?;
    let draft = intake(&state).request(req)?;
    enqueue(&state, draft, "Course request received").await
}

fn parse_submission_id(raw: &str) -> Result<SubmissionId, ModerationError> {
    raw.trim()
        .parse::<SubmissionId>()
        .map_err(|_| ModerationError::Validation(format!("Invalid submission id: {raw}")))
}

fn invalid_body(rejection: JsonRejection) -> ModerationError {
    ModerationError::Validation(rejection.body_text())
}

fn intake(state: &AppState) -> CreatorIntake<'_> {
    CreatorIntake::new(
        &state.catalog,
        &state.config.creator.default_submitter,
        Utc::now().date_naive(),
    )
}

async fn enqueue(
    state: &AppState,
    draft: SubmissionDraft,
    message: &str,
) -> Result<(StatusCode, Json<serde_json::Value>), ModerationError> {
    let mut queue = state.submissions.write().await;
    let submission = queue.submit(draft)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": message,
            "data": submission,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission_id() {
        assert_eq!(parse_submission_id("2").ok(), Some(2));
        assert!(matches!(
            parse_submission_id("two"),
            Err(ModerationError::Validation(_))
        ));
    }
}
