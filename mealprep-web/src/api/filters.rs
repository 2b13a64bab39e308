//! Filter dropdown options route

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::filter_options::{self, FilterOptions};
use crate::error::ApiResult;
use crate::AppState;

/// GET /filters
///
/// Distinct tag, search term, and ingredient values for populating the
/// dropdowns on the search and favorites pages.
pub async fn get_filters(State(state): State<AppState>) -> ApiResult<Json<FilterOptions>> {
    let options = filter_options::load_filter_options(&state.db).await?;
    Ok(Json(options))
}

/// Build filter routes
pub fn filter_routes() -> Router<AppState> {
    Router::new().route("/filters", get(get_filters))
}
