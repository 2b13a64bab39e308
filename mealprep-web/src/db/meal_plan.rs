//! Meal planner queries

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// One saved plan slot joined with its recipe name
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanEntry {
    pub day: String,
    pub meal_type: String,
    pub recipe_name: String,
}

/// Save a recipe into a (day, meal_type) slot; last write wins
pub async fn save_entry(
    pool: &SqlitePool,
    day: &str,
    meal_type: &str,
    recipe_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_planner (day, meal_type, recipe_id)
        VALUES (?, ?, ?)
        ON CONFLICT(day, meal_type) DO UPDATE SET recipe_id = excluded.recipe_id
        "#,
    )
    .bind(day)
    .bind(meal_type)
    .bind(recipe_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch every saved slot with its recipe name
pub async fn fetch_entries(pool: &SqlitePool) -> Result<Vec<MealPlanEntry>> {
    let rows = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT mp.day, mp.meal_type, r.name
        FROM meal_planner mp
        JOIN recipes r ON mp.recipe_id = r.recipe_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(day, meal_type, recipe_name)| MealPlanEntry {
            day,
            meal_type,
            recipe_name,
        })
        .collect())
}

/// Wipe the whole plan
pub async fn clear_entries(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM meal_planner").execute(pool).await?;

    Ok(())
}
