//! Recipe search route

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::recipes::{self, RecipeFilters, RecipeSummary, SortKey};
use crate::error::ApiResult;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::AppState;

/// Query parameters shared by the search and favorites listings.
///
/// The pages send `searchTerm` in camelCase; everything else is snake_case.
/// A missing `page` defaults to 1, and out-of-range values are clamped by
/// the handler rather than rejected.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub tag: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub ingredient: Option<String>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl ListParams {
    /// Normalized filter set: blank and whitespace-only values mean "no filter".
    pub(crate) fn filters(&self) -> RecipeFilters {
        RecipeFilters::normalize(
            self.tag.clone(),
            self.search_term.clone(),
            self.ingredient.clone(),
        )
    }

    pub(crate) fn sort_key(&self) -> SortKey {
        SortKey::parse(self.sort.as_deref())
    }
}

/// Recipe listing response shared by the search and favorites routes.
#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// GET /search?tag=&searchTerm=&ingredient=&sort=&page=
///
/// The count query runs first so an out-of-range page number can be clamped
/// before the row query executes.
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<RecipeListResponse>> {
    let filters = params.filters();
    let sort = params.sort_key();

    let total_results = recipes::count_recipes(&state.db, &filters).await?;
    let pagination = calculate_pagination(total_results, params.page);

    let rows = recipes::search_recipes(&state.db, &filters, sort, PAGE_SIZE, pagination.offset)
        .await?;

    Ok(Json(RecipeListResponse {
        recipes: rows,
        total_results,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
    }))
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(search_recipes))
}
