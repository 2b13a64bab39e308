//! Favorites queries
//!
//! Listing mirrors the recipe search semantics but is restricted to the
//! favorites table, using per-filter EXISTS subqueries instead of joins.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::db::recipes::{RecipeFilters, RecipeSummary, SortKey};

/// Mark a recipe as a favorite
///
/// Returns false when the recipe was already a favorite; the insert is
/// ignored in that case.
pub async fn add_favorite(pool: &SqlitePool, recipe_id: i64) -> Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO favorites (recipe_id) VALUES (?)")
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a recipe from favorites; removing a non-favorite is a no-op
pub async fn remove_favorite(pool: &SqlitePool, recipe_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM favorites WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Fetch one page of favorite recipes matching the active filters
pub async fn search_favorites(
    pool: &SqlitePool,
    filters: &RecipeFilters,
    sort: SortKey,
    limit: i64,
    offset: i64,
) -> Result<Vec<RecipeSummary>> {
    let sql = format!(
        r#"
        SELECT r.recipe_id, r.name, r.description, r.servings,
               GROUP_CONCAT(DISTINCT i.ingredient_name) AS ingredients
        FROM favorites f
        JOIN recipes r ON f.recipe_id = r.recipe_id
        LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
        LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
        WHERE {}
        GROUP BY r.recipe_id
        {}
        LIMIT ? OFFSET ?
        "#,
        FILTER_GUARDS,
        sort.order_clause()
    );

    let rows = sqlx::query_as::<_, (i64, String, Option<String>, Option<i64>, Option<String>)>(&sql)
        .bind(filters.tag.as_deref())
        .bind(filters.tag.as_deref())
        .bind(filters.search_term.as_deref())
        .bind(filters.search_term.as_deref())
        .bind(filters.ingredient.as_deref())
        .bind(filters.ingredient.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(recipe_id, name, description, servings, ingredients)| RecipeSummary {
            recipe_id,
            name,
            description,
            servings,
            ingredients,
        })
        .collect())
}

/// Count favorite recipes matching the active filters
pub async fn count_favorites(pool: &SqlitePool, filters: &RecipeFilters) -> Result<i64> {
    let sql = format!(
        r#"
        SELECT COUNT(DISTINCT r.recipe_id)
        FROM favorites f
        JOIN recipes r ON f.recipe_id = r.recipe_id
        WHERE {}
        "#,
        FILTER_GUARDS
    );

    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(filters.tag.as_deref())
        .bind(filters.tag.as_deref())
        .bind(filters.search_term.as_deref())
        .bind(filters.search_term.as_deref())
        .bind(filters.ingredient.as_deref())
        .bind(filters.ingredient.as_deref())
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Shared WHERE body for the favorites listing and its count, so the two
/// never disagree about which rows match
const FILTER_GUARDS: &str = r#"
          (? IS NULL OR EXISTS (
              SELECT 1 FROM recipe_tags rt
              WHERE rt.recipe_id = r.recipe_id AND rt.tag_name = ?
          ))
          AND (? IS NULL OR EXISTS (
              SELECT 1 FROM recipe_search_terms rst
              WHERE rst.recipe_id = r.recipe_id AND rst.search_term = ?
          ))
          AND (? IS NULL OR EXISTS (
              SELECT 1 FROM recipe_ingredients ri2
              JOIN ingredients i2 ON ri2.ingredient_id = i2.ingredient_id
              WHERE ri2.recipe_id = r.recipe_id AND i2.ingredient_name = ?
          ))
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use mealprep_common::db::init::init_in_memory;

    async fn seed(pool: &SqlitePool) {
        for (id, name) in [(1, "Garlic Pasta"), (2, "Beef Stew"), (3, "Green Salad")] {
            sqlx::query("INSERT INTO recipes (recipe_id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(pool)
                .await
                .unwrap();
        }

        sqlx::query("INSERT INTO tags (tag_name) VALUES ('vegetarian')")
            .execute(pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_name) VALUES (1, 'vegetarian')")
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_favorite_reports_duplicates() {
        let pool = init_in_memory().await.unwrap();
        seed(&pool).await;

        assert!(add_favorite(&pool, 1).await.unwrap());
        assert!(!add_favorite(&pool, 1).await.unwrap());

        // Still a single row
        let count = count_favorites(&pool, &RecipeFilters::default()).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_remove_restores_previous_set() {
        let pool = init_in_memory().await.unwrap();
        seed(&pool).await;

        add_favorite(&pool, 1).await.unwrap();
        add_favorite(&pool, 2).await.unwrap();
        remove_favorite(&pool, 1).await.unwrap();

        let rows = search_favorites(
            &pool,
            &RecipeFilters::default(),
            SortKey::Unsorted,
            10,
            0,
        )
        .await
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].recipe_id, 2);

        // Removing a recipe that is not a favorite is fine
        remove_favorite(&pool, 3).await.unwrap();
    }

    #[tokio::test]
    async fn test_count_respects_filters() {
        let pool = init_in_memory().await.unwrap();
        seed(&pool).await;

        add_favorite(&pool, 1).await.unwrap();
        add_favorite(&pool, 2).await.unwrap();

        let f = RecipeFilters::normalize(Some("vegetarian".into()), None, None);
        assert_eq!(count_favorites(&pool, &f).await.unwrap(), 1);

        let rows = search_favorites(&pool, &f, SortKey::Unsorted, 10, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Garlic Pasta");
    }
}
