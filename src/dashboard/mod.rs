//! # Dashboard Module
//!
//! Learner overview: how many courses have been started, how many lessons
//! are done across the catalog, and the courses to continue with.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Catalog, Course};
use crate::progress::handlers::run_blocking;
use crate::progress::{completion_percentage, ProgressError, ProgressSummary, ProgressTracker};
use crate::shared::state::AppState;

/// Courses shown under "continue learning".
pub const CONTINUE_LEARNING_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course: Course,
    pub progress: ProgressSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    /// Courses with at least one completed lesson.
    pub enrolled_courses: usize,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub overall_progress: u32,
    pub continue_learning: Vec<CourseProgress>,
}

pub fn compute_dashboard(
    catalog: &Catalog,
    tracker: &ProgressTracker,
) -> Result<DashboardStats, ProgressError> {
    let mut stats = DashboardStats {
        total_courses: catalog.courses().len(),
        enrolled_courses: 0,
        completed_lessons: 0,
        total_lessons: 0,
        overall_progress: 0,
        continue_learning: Vec::new(),
    };

    for (index, course) in catalog.courses().iter().enumerate() {
        let summary = tracker.summary(course.id)?;
        if summary.completed_count > 0 {
            stats.enrolled_courses += 1;
        }
        stats.completed_lessons += summary.completed_count;
        stats.total_lessons += summary.total_lessons;

        if index < CONTINUE_LEARNING_LIMIT {
            stats.continue_learning.push(CourseProgress {
                course: course.clone(),
                progress: summary,
            });
        }
    }

    stats.overall_progress = completion_percentage(stats.completed_lessons, stats.total_lessons);
    Ok(stats)
}

pub async fn handle_get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ProgressError> {
    let catalog = state.catalog.clone();
    let tracker = state.progress.clone();
    let stats = run_blocking(move || compute_dashboard(&catalog, &tracker)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": stats
    })))
}

pub fn configure_dashboard_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(handle_get_dashboard))
}
