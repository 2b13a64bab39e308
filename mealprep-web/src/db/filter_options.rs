//! Filter dropdown values

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Distinct values for the search page dropdowns; never paginated
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub search_terms: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Load the full distinct tag, search term, and ingredient sets
pub async fn load_filter_options(pool: &SqlitePool) -> Result<FilterOptions> {
    let tags = sqlx::query_scalar::<_, String>("SELECT DISTINCT tag_name FROM tags")
        .fetch_all(pool)
        .await?;

    let search_terms =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT search_term FROM search_terms")
            .fetch_all(pool)
            .await?;

    let ingredients =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT ingredient_name FROM ingredients")
            .fetch_all(pool)
            .await?;

    Ok(FilterOptions {
        tags,
        search_terms,
        ingredients,
    })
}
