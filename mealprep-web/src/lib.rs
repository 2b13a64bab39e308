//! mealprep-web: recipe browsing and meal planning service
//!
//! Serves the JSON API and the server-rendered pages from one axum router.
//! Handlers never open their own connections; they share the pool injected
//! through [`AppState`].

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup time, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui::ui_routes())
        .merge(api::search::search_routes())
        .merge(api::favorites::favorite_routes())
        .merge(api::meal_planner::meal_planner_routes())
        .merge(api::filters::filter_routes())
        .merge(api::dashboard::dashboard_routes())
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
