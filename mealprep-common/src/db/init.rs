//! Database initialization
//!
//! Creates the recipe schema on first run. Every statement is idempotent,
//! so initialization runs at each service startup and before each import.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL allows concurrent readers while a favorites or meal plan write commits
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    // Wait for a held write lock instead of failing immediately
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the full schema, for tests
///
/// Limited to a single connection: each new connection to `sqlite::memory:`
/// would otherwise open its own empty database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (idempotent, safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_recipes_table(pool).await?;
    create_ingredients_table(pool).await?;
    create_recipe_ingredients_table(pool).await?;
    create_steps_table(pool).await?;
    create_tags_table(pool).await?;
    create_recipe_tags_table(pool).await?;
    create_search_terms_table(pool).await?;
    create_recipe_search_terms_table(pool).await?;
    create_favorites_table(pool).await?;
    create_meal_planner_table(pool).await?;

    Ok(())
}

/// Create the recipes table
///
/// Core entity. Everything except the id and name is nullable because the
/// source CSV leaves cells empty.
async fn create_recipes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            recipe_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            serving_size TEXT,
            servings INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_ingredients_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredients (
            ingredient_id INTEGER PRIMARY KEY,
            ingredient_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_recipe_ingredients_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_ingredients (
            recipe_id INTEGER NOT NULL,
            ingredient_id INTEGER NOT NULL,
            PRIMARY KEY (recipe_id, ingredient_id),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id),
            FOREIGN KEY (ingredient_id) REFERENCES ingredients(ingredient_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Ingredient-side lookups (the PK only covers the recipe_id prefix)
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient
         ON recipe_ingredients(ingredient_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_steps_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS steps (
            recipe_id INTEGER NOT NULL,
            step_number INTEGER NOT NULL,
            step_description TEXT,
            PRIMARY KEY (recipe_id, step_number),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            tag_name TEXT PRIMARY KEY
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_recipe_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_tags (
            recipe_id INTEGER NOT NULL,
            tag_name TEXT NOT NULL,
            PRIMARY KEY (recipe_id, tag_name),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id),
            FOREIGN KEY (tag_name) REFERENCES tags(tag_name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag
         ON recipe_tags(tag_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_search_terms_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS search_terms (
            search_term TEXT PRIMARY KEY
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_recipe_search_terms_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_search_terms (
            recipe_id INTEGER NOT NULL,
            search_term TEXT NOT NULL,
            PRIMARY KEY (recipe_id, search_term),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id),
            FOREIGN KEY (search_term) REFERENCES search_terms(search_term)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_recipe_search_terms_term
         ON recipe_search_terms(search_term)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the favorites table
///
/// The recipe id is the whole row; duplicate adds are ignored by the insert.
async fn create_favorites_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            recipe_id INTEGER PRIMARY KEY,
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the meal planner table
///
/// One slot per (day, meal_type); saving the same slot replaces the recipe.
async fn create_meal_planner_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meal_planner (
            day TEXT NOT NULL,
            meal_type TEXT NOT NULL,
            recipe_id INTEGER NOT NULL,
            PRIMARY KEY (day, meal_type),
            FOREIGN KEY (recipe_id) REFERENCES recipes(recipe_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
