//! Recipe search queries
//!
//! The search route and the favorites listing share the filter and sort
//! types defined here, so both routes treat request parameters identically.

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Optional recipe filters shared by the search and favorites routes
///
/// A filter is active only when the parameter arrived non-empty after
/// trimming; an absent parameter and an empty string both mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct RecipeFilters {
    pub tag: Option<String>,
    pub search_term: Option<String>,
    pub ingredient: Option<String>,
}

impl RecipeFilters {
    /// Build filters from raw query parameters
    pub fn normalize(
        tag: Option<String>,
        search_term: Option<String>,
        ingredient: Option<String>,
    ) -> Self {
        Self {
            tag: normalize_filter(tag),
            search_term: normalize_filter(search_term),
            ingredient: normalize_filter(ingredient),
        }
    }
}

fn normalize_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Recipe list ordering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Recipe name, A to Z
    Alphabetical,
    /// Servings, largest first
    Servings,
    /// Database order
    Unsorted,
}

impl SortKey {
    /// Parse the `sort` query parameter; unrecognized values mean unsorted
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("alphabetical") => SortKey::Alphabetical,
            Some("servings") => SortKey::Servings,
            _ => SortKey::Unsorted,
        }
    }

    /// ORDER BY clause fragment, empty when unsorted
    pub(crate) fn order_clause(self) -> &'static str {
        match self {
            SortKey::Alphabetical => "ORDER BY r.name ASC",
            SortKey::Servings => "ORDER BY r.servings DESC",
            SortKey::Unsorted => "",
        }
    }
}

/// One row of a recipe listing
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub recipe_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub servings: Option<i64>,
    /// Comma-joined distinct ingredient names, NULL for recipes without any
    pub ingredients: Option<String>,
}

type SummaryRow = (i64, String, Option<String>, Option<i64>, Option<String>);

fn into_summary(row: SummaryRow) -> RecipeSummary {
    RecipeSummary {
        recipe_id: row.0,
        name: row.1,
        description: row.2,
        servings: row.3,
        ingredients: row.4,
    }
}

/// Fetch one page of recipes matching the active filters
///
/// Inactive filters pass every row through the `(col = ? OR ? IS NULL)`
/// guard, so a single statement serves all filter combinations.
pub async fn search_recipes(
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
        FROM recipes r
        LEFT JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
        LEFT JOIN tags t ON rt.tag_name = t.tag_name
        LEFT JOIN recipe_search_terms rst ON r.recipe_id = rst.recipe_id
        LEFT JOIN search_terms st ON rst.search_term = st.search_term
        LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
        LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
        WHERE (t.tag_name = ? OR ? IS NULL)
          AND (st.search_term = ? OR ? IS NULL)
          AND (i.ingredient_name = ? OR ? IS NULL)
        GROUP BY r.recipe_id
        {}
        LIMIT ? OFFSET ?
        "#,
        sort.order_clause()
    );

    let rows = sqlx::query_as::<_, SummaryRow>(&sql)
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

    Ok(rows.into_iter().map(into_summary).collect())
}

/// Count recipes matching the active filters
pub async fn count_recipes(pool: &SqlitePool, filters: &RecipeFilters) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT r.recipe_id)
        FROM recipes r
        LEFT JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
        LEFT JOIN tags t ON rt.tag_name = t.tag_name
        LEFT JOIN recipe_search_terms rst ON r.recipe_id = rst.recipe_id
        LEFT JOIN search_terms st ON rst.search_term = st.search_term
        LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
        LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
        WHERE (t.tag_name = ? OR ? IS NULL)
          AND (st.search_term = ? OR ? IS NULL)
          AND (i.ingredient_name = ? OR ? IS NULL)
        "#,
    )
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
