//! Integration tests for the mealprep-web HTTP routes
//!
//! Tests cover:
//! - Recipe search with filtering, sorting, and page clamping
//! - Favorites listing and add/remove mutations
//! - Meal planner save/fetch/clear
//! - Filter dropdown options
//! - Dashboard query dispatch and redirects
//! - Server-rendered pages and the health endpoint

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use mealprep_common::db::init::init_in_memory;
use mealprep_web::{build_router, AppState};

/// Test helper: fresh in-memory database with the full schema
async fn setup_test_db() -> SqlitePool {
    init_in_memory()
        .await
        .expect("Should create in-memory database")
}

/// Test helper: app wired to the given pool
fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

/// Test helper: request without a body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: request carrying a JSON body
fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: extract text body from response
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

/// Test helper: insert a recipe row
async fn seed_recipe(pool: &SqlitePool, id: i64, name: &str, servings: Option<i64>) {
    sqlx::query("INSERT INTO recipes (recipe_id, name, servings) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(servings)
        .execute(pool)
        .await
        .unwrap();
}

/// Test helper: attach a tag to a recipe, creating the tag if needed
async fn seed_tag(pool: &SqlitePool, recipe_id: i64, tag: &str) {
    sqlx::query("INSERT OR IGNORE INTO tags (tag_name) VALUES (?)")
        .bind(tag)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_name) VALUES (?, ?)")
        .bind(recipe_id)
        .bind(tag)
        .execute(pool)
        .await
        .unwrap();
}

/// Test helper: attach an ingredient to a recipe, creating it if needed
async fn seed_ingredient(pool: &SqlitePool, ingredient_id: i64, recipe_id: i64, name: &str) {
    sqlx::query("INSERT OR IGNORE INTO ingredients (ingredient_id, ingredient_name) VALUES (?, ?)")
        .bind(ingredient_id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?, ?)")
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Test helper: attach a search term to a recipe, creating it if needed
async fn seed_search_term(pool: &SqlitePool, recipe_id: i64, term: &str) {
    sqlx::query("INSERT OR IGNORE INTO search_terms (search_term) VALUES (?)")
        .bind(term)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO recipe_search_terms (recipe_id, search_term) VALUES (?, ?)")
        .bind(recipe_id)
        .bind(term)
        .execute(pool)
        .await
        .unwrap();
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mealprep-web");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_number());
}

// =============================================================================
// Recipe Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_returns_seeded_recipes() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    seed_recipe(&db, 2, "Green Salad", Some(2)).await;
    let app = setup_app(db);

    let response = app.oneshot(test_request("GET", "/search")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_filters_by_tag() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Veggie Bowl", Some(2)).await;
    seed_recipe(&db, 2, "Beef Stew", Some(6)).await;
    seed_tag(&db, 1, "vegetarian").await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/search?tag=vegetarian"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["recipes"][0]["name"], "Veggie Bowl");
}

#[tokio::test]
async fn test_search_treats_blank_filters_as_absent() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    seed_recipe(&db, 2, "Green Salad", Some(2)).await;
    let app = setup_app(db);

    // Empty and whitespace-only values must not filter anything out
    let response = app
        .oneshot(test_request(
            "GET",
            "/search?tag=&searchTerm=%20%20&ingredient=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 2);
}

#[tokio::test]
async fn test_search_pagination_and_clamping() {
    let db = setup_test_db().await;
    // Zero-padded names so alphabetical order matches numeric order
    for i in 1..=25 {
        seed_recipe(&db, i, &format!("Recipe {:02}", i), Some(4)).await;
    }
    let app = setup_app(db);

    // Page 2 holds rows 11..20
    let response = app
        .clone()
        .oneshot(test_request("GET", "/search?sort=alphabetical&page=2"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(body["page"], 2);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(recipes.len(), 10);
    assert_eq!(recipes[0]["name"], "Recipe 11");
    assert_eq!(recipes[9]["name"], "Recipe 20");

    // Beyond the end clamps to the last page
    let response = app
        .clone()
        .oneshot(test_request("GET", "/search?sort=alphabetical&page=99"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 3);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 5);
    assert_eq!(body["recipes"][0]["name"], "Recipe 21");

    // Zero and negative clamp to the first page
    let response = app
        .oneshot(test_request("GET", "/search?sort=alphabetical&page=0"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["recipes"][0]["name"], "Recipe 01");
}

#[tokio::test]
async fn test_search_sorts_by_servings_descending() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Small", Some(2)).await;
    seed_recipe(&db, 2, "Large", Some(6)).await;
    seed_recipe(&db, 3, "Medium", Some(4)).await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/search?sort=servings"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    let names: Vec<&str> = body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Large", "Medium", "Small"]);
}

#[tokio::test]
async fn test_search_rejects_non_numeric_page() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/search?page=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Favorites Tests
// =============================================================================

#[tokio::test]
async fn test_add_favorite_reports_duplicates() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    let app = setup_app(db);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/favorites/add",
            json!({ "recipe_id": 1 }),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Recipe added to favorites!");

    // Adding again is reported, not an error
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/favorites/add",
            json!({ "recipe_id": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Recipe already in favorites.");

    let response = app
        .oneshot(test_request("GET", "/favorites"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 1);
}

#[tokio::test]
async fn test_remove_favorite_always_succeeds() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    let app = setup_app(db);

    // Removing something never favorited still succeeds
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/favorites/remove",
            json!({ "recipe_id": 1 }),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Recipe removed from favorites!");

    // Add then remove leaves the list empty
    app.clone()
        .oneshot(json_request(
            "POST",
            "/favorites/add",
            json!({ "recipe_id": 1 }),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/favorites/remove",
            json!({ "recipe_id": 1 }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(test_request("GET", "/favorites"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 0);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_favorites_listing_filters_rows_and_count() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Veggie Bowl", Some(2)).await;
    seed_recipe(&db, 2, "Beef Stew", Some(6)).await;
    seed_tag(&db, 1, "vegetarian").await;
    let app = setup_app(db);

    for id in [1, 2] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/favorites/add",
                json!({ "recipe_id": id }),
            ))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(test_request("GET", "/favorites?tag=vegetarian"))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    // The count reflects the filter, matching the rows
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(body["recipes"][0]["name"], "Veggie Bowl");
}

// =============================================================================
// Meal Planner Tests
// =============================================================================

#[tokio::test]
async fn test_meal_plan_save_fetch_clear() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    let app = setup_app(db);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/meal-planner/save",
            json!({ "day": "Monday", "meal": "Dinner", "recipeId": 1 }),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Meal plan saved successfully.");

    let response = app
        .clone()
        .oneshot(test_request("GET", "/meal-planner/fetch"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let plan = body["meal_plan"].as_array().unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0]["day"], "Monday");
    assert_eq!(plan[0]["meal_type"], "Dinner");
    assert_eq!(plan[0]["recipe_name"], "Garlic Pasta");

    let response = app
        .clone()
        .oneshot(test_request("POST", "/meal-planner/clear"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Meal plan cleared successfully.");

    let response = app
        .oneshot(test_request("GET", "/meal-planner/fetch"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["meal_plan"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_meal_plan_save_replaces_occupied_slot() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    seed_recipe(&db, 2, "Pasta Bake", Some(6)).await;
    let app = setup_app(db);

    for id in [1, 2] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/meal-planner/save",
                json!({ "day": "Friday", "meal": "Lunch", "recipeId": id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(test_request("GET", "/meal-planner/fetch"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let plan = body["meal_plan"].as_array().unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0]["recipe_name"], "Pasta Bake");
}

#[tokio::test]
async fn test_meal_plan_save_accepts_snake_case_recipe_id() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    let app = setup_app(db);

    let response = app
        .oneshot(json_request(
            "POST",
            "/meal-planner/save",
            json!({ "day": "Tuesday", "meal": "Breakfast", "recipe_id": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

// =============================================================================
// Filter Options Tests
// =============================================================================

#[tokio::test]
async fn test_filter_options_lists_distinct_values() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Garlic Pasta", Some(4)).await;
    seed_recipe(&db, 2, "Aioli", Some(8)).await;
    seed_tag(&db, 1, "dinner").await;
    seed_tag(&db, 2, "dinner").await;
    seed_ingredient(&db, 1, 1, "garlic").await;
    seed_ingredient(&db, 1, 2, "garlic").await;
    seed_search_term(&db, 1, "pasta").await;

    let app = setup_app(db);
    let response = app.oneshot(test_request("GET", "/filters")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["tags"].as_array().unwrap().len(), 1);
    assert_eq!(body["tags"][0], "dinner");
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(body["search_terms"].as_array().unwrap().len(), 1);
}

// =============================================================================
// Dashboard Query Tests
// =============================================================================

#[tokio::test]
async fn test_query_with_unknown_id_redirects_home() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/query?query=dropAllTables"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_query_without_param_redirects_home() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app.oneshot(test_request("GET", "/query")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_query_renders_chart_with_data() {
    let db = setup_test_db().await;
    seed_recipe(&db, 1, "Veggie Bowl", Some(2)).await;
    seed_tag(&db, 1, "vegetarian").await;
    let app = setup_app(db);

    let response = app
        .oneshot(test_request("GET", "/query?query=popularVegetarian"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = extract_text(response.into_body()).await;
    assert!(page.contains("Veggie Bowl"));
    assert!(page.contains(r#""label":"Popularity""#));
    assert!(page.contains(r#"value="popularVegetarian" selected"#));
}

// =============================================================================
// Page Rendering Tests
// =============================================================================

#[tokio::test]
async fn test_home_page_renders_without_chart() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = extract_text(response.into_body()).await;
    assert!(page.contains("const chartData = null;"));
    assert!(page.contains("mealprep-web v"));
}

#[tokio::test]
async fn test_static_pages_render() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    for (uri, marker) in [
        ("/search-page", "newSearch()"),
        ("/meal-planner", "Monday"),
        ("/favorites-page", "removeFavorite"),
    ] {
        let response = app
            .clone()
            .oneshot(test_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} should render", uri);

        let page = extract_text(response.into_body()).await;
        assert!(page.contains(marker), "{} should contain {}", uri, marker);
    }
}
