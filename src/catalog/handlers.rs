use axum::{
    extract::{Query, State},
    Json,
};
use log::debug;
use std::sync::Arc;

use crate::catalog::error::CatalogError;
use crate::catalog::filter::CourseQuery;
use crate::catalog::types::CourseFilters;
use crate::shared::state::AppState;

/// List courses matching the search text, category and difficulty.
pub async fn handle_list_courses(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<CourseFilters>,
) -> Result<Json<serde_json::Value>, CatalogError> {
    let query = CourseQuery::try_from(filters)?;
    let courses = state.catalog.search(&query);
    debug!(
        "Catalog query '{}' matched {} of {} courses",
        query.search(),
        courses.len(),
        state.catalog.courses().len()
    );

    Ok(Json(serde_json::json!({
        "success": true,
        "data": courses,
        "total": courses.len(),
    })))
}

pub async fn handle_list_categories(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": state.catalog.category_summaries(),
    }))
}
