//! # Progress Module
//!
//! Per-course lesson completion. Each course keeps a set of completed lesson
//! ids in a [`KeyValueStore`] under `course-<id>-completed`, written back in
//! full after every toggle and read again whenever the course is viewed.

pub mod error;
pub mod handlers;
pub mod storage;
pub mod tracker;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::shared::state::AppState;

pub use error::ProgressError;
pub use handlers::*;
pub use storage::{completion_key, open_store, FileStore, InMemoryStore, KeyValueStore, StorageError};
pub use tracker::{
    completion_percentage, CompletionSet, CorruptDataPolicy, ProgressSummary, ProgressTracker,
    ToggleOutcome,
};

pub fn configure_progress_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses/:id", get(handle_get_course))
        .route(
            "/api/courses/:id/progress",
            get(handle_get_progress).delete(handle_reset_progress),
        )
        .route(
            "/api/courses/:id/lessons/:lesson_id/toggle",
            post(handle_toggle_lesson),
        )
}
