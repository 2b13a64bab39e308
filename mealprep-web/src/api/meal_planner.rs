//! Meal planner routes

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::meal_plan::{self, MealPlanEntry};
use crate::error::ApiResult;
use crate::AppState;

/// Request payload for saving one plan slot.
///
/// The pages send `recipeId`; `recipe_id` is accepted as an alias for
/// clients that prefer snake_case.
#[derive(Debug, Deserialize)]
pub struct SaveMealRequest {
    pub day: String,
    pub meal: String,
    #[serde(rename = "recipeId", alias = "recipe_id")]
    pub recipe_id: i64,
}

/// Mutation outcome reported back to the page
#[derive(Debug, Serialize)]
pub struct MealPlanStatus {
    pub success: bool,
    pub message: String,
}

/// Saved plan slots
#[derive(Debug, Serialize)]
pub struct MealPlanList {
    pub meal_plan: Vec<MealPlanEntry>,
}

/// POST /meal-planner/save
///
/// Upsert: saving into an occupied (day, meal) slot replaces the previous
/// recipe rather than failing.
pub async fn save_meal(
    State(state): State<AppState>,
    Json(payload): Json<SaveMealRequest>,
) -> ApiResult<Json<MealPlanStatus>> {
    meal_plan::save_entry(&state.db, &payload.day, &payload.meal, payload.recipe_id).await?;

    Ok(Json(MealPlanStatus {
        success: true,
        message: "Meal plan saved successfully.".to_string(),
    }))
}

/// GET /meal-planner/fetch
pub async fn fetch_meal_plan(State(state): State<AppState>) -> ApiResult<Json<MealPlanList>> {
    let entries = meal_plan::fetch_entries(&state.db).await?;

    Ok(Json(MealPlanList {
        meal_plan: entries,
    }))
}

/// POST /meal-planner/clear
pub async fn clear_meal_plan(State(state): State<AppState>) -> ApiResult<Json<MealPlanStatus>> {
    meal_plan::clear_entries(&state.db).await?;

    Ok(Json(MealPlanStatus {
        success: true,
        message: "Meal plan cleared successfully.".to_string(),
    }))
}

/// Build meal planner routes
pub fn meal_planner_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-planner/save", post(save_meal))
        .route("/meal-planner/fetch", get(fetch_meal_plan))
        .route("/meal-planner/clear", post(clear_meal_plan))
}
