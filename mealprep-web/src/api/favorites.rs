//! Favorites routes: filtered listing plus add/remove mutations

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::search::{ListParams, RecipeListResponse};
use crate::db::favorites;
use crate::error::ApiResult;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::AppState;

/// Request payload for the add/remove mutations
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub recipe_id: i64,
}

/// Mutation outcome reported back to the page
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub message: String,
}

/// GET /favorites?tag=&searchTerm=&ingredient=&sort=&page=
///
/// Same parameters and response shape as /search, restricted to favorited
/// recipes. The count honors the active filters so pagination stays
/// consistent with the rows.
pub async fn list_favorites(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<RecipeListResponse>> {
    let filters = params.filters();
    let sort = params.sort_key();

    let total_results = favorites::count_favorites(&state.db, &filters).await?;
    let pagination = calculate_pagination(total_results, params.page);

    let rows = favorites::search_favorites(&state.db, &filters, sort, PAGE_SIZE, pagination.offset)
        .await?;

    Ok(Json(RecipeListResponse {
        recipes: rows,
        total_results,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
    }))
}

/// POST /favorites/add
///
/// Adding a recipe that is already a favorite is not an error; the response
/// reports success=false with an explanatory message instead.
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteRequest>,
) -> ApiResult<Json<FavoriteResponse>> {
    let inserted = favorites::add_favorite(&state.db, payload.recipe_id).await?;

    let response = if inserted {
        FavoriteResponse {
            success: true,
            message: "Recipe added to favorites!".to_string(),
        }
    } else {
        FavoriteResponse {
            success: false,
            message: "Recipe already in favorites.".to_string(),
        }
    };

    Ok(Json(response))
}

/// POST /favorites/remove
///
/// Removing a recipe that is not a favorite still reports success.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Json(payload): Json<FavoriteRequest>,
) -> ApiResult<Json<FavoriteResponse>> {
    favorites::remove_favorite(&state.db, payload.recipe_id).await?;

    Ok(Json(FavoriteResponse {
        success: true,
        message: "Recipe removed from favorites!".to_string(),
    }))
}

/// Build favorites routes
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route("/favorites/add", post(add_favorite))
        .route("/favorites/remove", post(remove_favorite))
}
