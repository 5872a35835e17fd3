//! API Router
//!
//! Combines the routes of every module into one router and adds the
//! HTTP layers shared by all of them.

use axum::{http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::shared::state::AppState;

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "coursehub",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Configure all API routes from all modules
pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health_check))
        .merge(crate::catalog::configure_catalog_routes())
        .merge(crate::progress::configure_progress_routes())
        .merge(crate::dashboard::configure_dashboard_routes())
        .merge(crate::moderation::configure_moderation_routes())
}

pub fn build_router(state: Arc<AppState>) -> Router {
    configure_api_routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
