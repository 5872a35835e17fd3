//! # Moderation Module
//!
//! Creator submissions (new courses, new lessons and course requests) and
//! the admin review queue that approves or rejects them. The queue lives in
//! memory only.

pub mod error;
pub mod handlers;
pub mod intake;
pub mod queue;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::shared::state::AppState;

pub use error::ModerationError;
pub use handlers::*;
pub use intake::{parse_resources, parse_tags, CreatorIntake};
pub use queue::ModerationQueue;
pub use types::*;

pub fn configure_moderation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/submissions", get(handle_list_submissions))
        .route("/api/submissions/stats", get(handle_submission_stats))
        .route("/api/submissions/:id/approve", post(handle_approve_submission))
        .route("/api/submissions/:id/reject", post(handle_reject_submission))
        .route("/api/creator/courses", post(handle_submit_course))
        .route("/api/creator/lessons", post(handle_submit_lesson))
        .route("/api/creator/requests", post(handle_request_course))
}
