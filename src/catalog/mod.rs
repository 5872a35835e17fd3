//! # Catalog Module
//!
//! Read-only course content: categories, courses and their lessons, loaded
//! once from seed data, plus the search/filter evaluator used by the course
//! browser.

pub mod data;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod types;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::shared::state::AppState;

pub use data::{Catalog, SeedDocument};
pub use error::CatalogError;
pub use filter::{filter_courses, CourseQuery, Selection};
pub use handlers::*;
pub use types::*;

pub fn configure_catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", get(handle_list_courses))
        .route("/api/categories", get(handle_list_categories))
}
