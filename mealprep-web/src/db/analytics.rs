//! Dashboard analytics queries
//!
//! A fixed set of eight canned queries, each rendered as a bar chart on the
//! dashboard. Every variant carries its own SQL template, dataset label,
//! row shape, and color scheme; the row extractor is chosen once per
//! dispatch, never guessed from the result columns.

use anyhow::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Bar colors cycled by row index for the multi-color charts
const DISTINCT_COLORS: [&str; 20] = [
    "rgba(255, 99, 71, 0.7)",   // Tomato Red
    "rgba(30, 144, 255, 0.7)",  // Dodger Blue
    "rgba(50, 205, 50, 0.7)",   // Lime Green
    "rgba(255, 165, 0, 0.7)",   // Orange
    "rgba(138, 43, 226, 0.7)",  // Blue Violet
    "rgba(240, 128, 128, 0.7)", // Light Coral
    "rgba(0, 139, 139, 0.7)",   // Dark Cyan
    "rgba(255, 20, 147, 0.7)",  // Deep Pink
    "rgba(70, 130, 180, 0.7)",  // Steel Blue
    "rgba(154, 205, 50, 0.7)",  // Yellow Green
    "rgba(255, 215, 0, 0.7)",   // Gold
    "rgba(0, 100, 0, 0.7)",     // Dark Green
    "rgba(205, 92, 92, 0.7)",   // Indian Red
    "rgba(75, 0, 130, 0.7)",    // Indigo
    "rgba(255, 140, 0, 0.7)",   // Dark Orange
    "rgba(127, 255, 212, 0.7)", // Aquamarine
    "rgba(220, 20, 60, 0.7)",   // Crimson
    "rgba(139, 69, 19, 0.7)",   // Saddle Brown
    "rgba(0, 191, 255, 0.7)",   // Deep Sky Blue
    "rgba(34, 139, 34, 0.7)",   // Forest Green
];

/// Uniform bar color for the popularity and step-count charts
const SINGLE_COLOR: &str = "rgba(54, 162, 235, 0.7)";

/// Chart payload embedded into the dashboard page
///
/// Field names inside the dataset match what Chart.js expects, hence the
/// camelCase renames.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Single bar dataset
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<i64>,
    #[serde(rename = "backgroundColor")]
    pub background_color: Vec<String>,
    /// Per-bar recipe name list, populated only by queries that report one
    #[serde(rename = "recipeNames", skip_serializing_if = "Vec::is_empty")]
    pub recipe_names: Vec<String>,
}

impl ChartData {
    /// Payload with no rows, used when a query fails
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            datasets: vec![Dataset {
                label: String::new(),
                data: Vec::new(),
                background_color: Vec::new(),
                recipe_names: Vec::new(),
            }],
        }
    }
}

/// Result row layout of an analytics query
enum RowShape {
    /// (label, value)
    LabelValue,
    /// (label, value, concatenated recipe names)
    LabelValueNames,
}

/// Identifiers accepted by the dashboard query route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsQuery {
    PopularVegetarian,
    SpecificIngredient,
    CommonLowCalorieTag,
    TopSteps,
    TopIngredients,
    MealType,
    TopTagsForTopIngredients,
    TagsForChocolateRecipes,
}

impl AnalyticsQuery {
    /// Every query, in dashboard dropdown order
    pub const ALL: [AnalyticsQuery; 8] = [
        AnalyticsQuery::PopularVegetarian,
        AnalyticsQuery::SpecificIngredient,
        AnalyticsQuery::CommonLowCalorieTag,
        AnalyticsQuery::TopSteps,
        AnalyticsQuery::TopIngredients,
        AnalyticsQuery::MealType,
        AnalyticsQuery::TopTagsForTopIngredients,
        AnalyticsQuery::TagsForChocolateRecipes,
    ];

    /// Parse a query identifier; anything unrecognized is None
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "popularVegetarian" => Some(AnalyticsQuery::PopularVegetarian),
            "specificIngredient" => Some(AnalyticsQuery::SpecificIngredient),
            "commonLowCalorieTag" => Some(AnalyticsQuery::CommonLowCalorieTag),
            "topSteps" => Some(AnalyticsQuery::TopSteps),
            "topIngredients" => Some(AnalyticsQuery::TopIngredients),
            "mealType" => Some(AnalyticsQuery::MealType),
            "topTagsForTopIngredients" => Some(AnalyticsQuery::TopTagsForTopIngredients),
            "tagsForChocolateRecipes" => Some(AnalyticsQuery::TagsForChocolateRecipes),
            _ => None,
        }
    }

    /// Wire identifier used in the /query URL
    pub fn id(self) -> &'static str {
        match self {
            AnalyticsQuery::PopularVegetarian => "popularVegetarian",
            AnalyticsQuery::SpecificIngredient => "specificIngredient",
            AnalyticsQuery::CommonLowCalorieTag => "commonLowCalorieTag",
            AnalyticsQuery::TopSteps => "topSteps",
            AnalyticsQuery::TopIngredients => "topIngredients",
            AnalyticsQuery::MealType => "mealType",
            AnalyticsQuery::TopTagsForTopIngredients => "topTagsForTopIngredients",
            AnalyticsQuery::TagsForChocolateRecipes => "tagsForChocolateRecipes",
        }
    }

    /// Human title for the dashboard dropdown
    pub fn title(self) -> &'static str {
        match self {
            AnalyticsQuery::PopularVegetarian => "Most popular vegetarian recipes",
            AnalyticsQuery::SpecificIngredient => "Recipes using garlic or olive oil",
            AnalyticsQuery::CommonLowCalorieTag => "Most common low-calorie tag",
            AnalyticsQuery::TopSteps => "Recipes with the most steps",
            AnalyticsQuery::TopIngredients => "Most used ingredients",
            AnalyticsQuery::MealType => "Brunch and dessert recipes",
            AnalyticsQuery::TopTagsForTopIngredients => "Tags of the top three ingredients",
            AnalyticsQuery::TagsForChocolateRecipes => "Tags on chocolate recipes",
        }
    }

    /// Dataset label shown in the chart legend and tooltips
    pub fn dataset_label(self) -> &'static str {
        match self {
            AnalyticsQuery::PopularVegetarian => "Popularity",
            AnalyticsQuery::SpecificIngredient => "Recipes by Ingredient",
            AnalyticsQuery::CommonLowCalorieTag => "Low-Calorie Recipes",
            AnalyticsQuery::TopSteps => "Number of Steps",
            AnalyticsQuery::TopIngredients => "Most Used Ingredients",
            AnalyticsQuery::MealType => "Recipes by Meal Type",
            AnalyticsQuery::TopTagsForTopIngredients => "Tags for Top Ingredients",
            AnalyticsQuery::TagsForChocolateRecipes => "Tags for Chocolate Recipes",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            AnalyticsQuery::PopularVegetarian => {
                r#"
                SELECT r.name AS label, COUNT(rt.tag_name) AS value
                FROM recipes r
                JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
                WHERE rt.tag_name = 'vegetarian'
                GROUP BY r.recipe_id
                ORDER BY value DESC
                LIMIT 5
                "#
            }
            AnalyticsQuery::SpecificIngredient => {
                r#"
                SELECT i.ingredient_name AS label,
                       COUNT(r.recipe_id) AS value,
                       GROUP_CONCAT(r.name, ', ') AS recipe_names
                FROM recipes r
                JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
                JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
                WHERE i.ingredient_name IN ('garlic', 'olive oil')
                GROUP BY i.ingredient_name
                "#
            }
            AnalyticsQuery::CommonLowCalorieTag => {
                r#"
                SELECT rt.tag_name AS label, COUNT(*) AS value
                FROM recipe_tags rt
                JOIN recipes r ON r.recipe_id = rt.recipe_id
                WHERE rt.tag_name = 'low-calorie'
                GROUP BY rt.tag_name
                ORDER BY value DESC
                LIMIT 1
                "#
            }
            AnalyticsQuery::TopSteps => {
                r#"
                SELECT r.name AS label, COUNT(s.step_number) AS value
                FROM recipes r
                JOIN steps s ON r.recipe_id = s.recipe_id
                GROUP BY r.recipe_id
                ORDER BY value DESC
                LIMIT 5
                "#
            }
            AnalyticsQuery::TopIngredients => {
                r#"
                SELECT i.ingredient_name AS label, COUNT(ri.ingredient_id) AS value
                FROM ingredients i
                JOIN recipe_ingredients ri ON i.ingredient_id = ri.ingredient_id
                GROUP BY i.ingredient_name
                ORDER BY value DESC
                LIMIT 10
                "#
            }
            AnalyticsQuery::MealType => {
                r#"
                SELECT rt.tag_name AS label,
                       COUNT(r.recipe_id) AS value,
                       GROUP_CONCAT(r.name, ', ') AS recipe_names
                FROM recipes r
                JOIN recipe_tags rt ON r.recipe_id = rt.recipe_id
                WHERE rt.tag_name IN ('brunch', 'desserts')
                GROUP BY rt.tag_name
                "#
            }
            AnalyticsQuery::TopTagsForTopIngredients => {
                r#"
                WITH top_ingredients AS (
                    SELECT i.ingredient_id, COUNT(ri.ingredient_id) AS usage_count
                    FROM ingredients i
                    JOIN recipe_ingredients ri ON i.ingredient_id = ri.ingredient_id
                    GROUP BY i.ingredient_id
                    ORDER BY usage_count DESC
                    LIMIT 3
                )
                SELECT rt.tag_name AS label, COUNT(rt.recipe_id) AS value
                FROM recipe_tags rt
                JOIN recipe_ingredients ri ON rt.recipe_id = ri.recipe_id
                JOIN top_ingredients ti ON ri.ingredient_id = ti.ingredient_id
                GROUP BY rt.tag_name
                ORDER BY value DESC
                LIMIT 20
                "#
            }
            AnalyticsQuery::TagsForChocolateRecipes => {
                r#"
                SELECT t.tag_name AS label, COUNT(*) AS value
                FROM recipe_ingredients ri
                JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
                JOIN recipe_tags rt ON ri.recipe_id = rt.recipe_id
                JOIN tags t ON rt.tag_name = t.tag_name
                WHERE i.ingredient_name LIKE '%chocolate%'
                GROUP BY t.tag_name
                ORDER BY value DESC
                LIMIT 10
                "#
            }
        }
    }

    fn row_shape(self) -> RowShape {
        match self {
            AnalyticsQuery::SpecificIngredient | AnalyticsQuery::MealType => {
                RowShape::LabelValueNames
            }
            _ => RowShape::LabelValue,
        }
    }

    fn bar_color(self, index: usize) -> &'static str {
        match self {
            AnalyticsQuery::PopularVegetarian | AnalyticsQuery::TopSteps => SINGLE_COLOR,
            _ => DISTINCT_COLORS[index % DISTINCT_COLORS.len()],
        }
    }

    /// Run the query and assemble the chart payload
    pub async fn run(self, pool: &SqlitePool) -> Result<ChartData> {
        let rows: Vec<(String, i64, Option<String>)> = match self.row_shape() {
            RowShape::LabelValueNames => {
                sqlx::query_as::<_, (String, i64, Option<String>)>(self.sql())
                    .fetch_all(pool)
                    .await?
            }
            RowShape::LabelValue => sqlx::query_as::<_, (String, i64)>(self.sql())
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(|(label, value)| (label, value, None))
                .collect(),
        };

        let mut chart = ChartData::empty();
        chart.datasets[0].label = self.dataset_label().to_string();

        for (index, (label, value, names)) in rows.into_iter().enumerate() {
            chart.labels.push(label);
            chart.datasets[0].data.push(value);
            chart.datasets[0]
                .background_color
                .push(self.bar_color(index).to_string());
            if let Some(names) = names {
                chart.datasets[0].recipe_names.push(names);
            }
        }

        Ok(chart)
    }
}
