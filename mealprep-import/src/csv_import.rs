//! Ordered CSV import pipeline
//!
//! Eight CSV files map one-to-one onto tables, imported in dependency
//! order so foreign keys are satisfied by the time the join tables load.
//! Each table imports inside its own transaction; a failing row rolls the
//! table back and aborts the remaining steps, while tables already
//! committed stay committed.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// One CSV file mapped to a table and its column list
#[derive(Debug, Clone, Copy)]
pub struct ImportStep {
    pub file_name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

/// Import steps in dependency order: entity tables before the join tables
/// that reference them.
pub const IMPORT_STEPS: [ImportStep; 8] = [
    ImportStep {
        file_name: "recipes.csv",
        table: "recipes",
        columns: &["recipe_id", "name", "description", "serving_size", "servings"],
    },
    ImportStep {
        file_name: "ingredients.csv",
        table: "ingredients",
        columns: &["ingredient_id", "ingredient_name"],
    },
    ImportStep {
        file_name: "recipe_ingredients.csv",
        table: "recipe_ingredients",
        columns: &["recipe_id", "ingredient_id"],
    },
    ImportStep {
        file_name: "steps.csv",
        table: "steps",
        columns: &["recipe_id", "step_number", "step_description"],
    },
    ImportStep {
        file_name: "tags.csv",
        table: "tags",
        columns: &["tag_name"],
    },
    ImportStep {
        file_name: "recipe_tags.csv",
        table: "recipe_tags",
        columns: &["recipe_id", "tag_name"],
    },
    ImportStep {
        file_name: "search_terms.csv",
        table: "search_terms",
        columns: &["search_term"],
    },
    ImportStep {
        file_name: "recipe_search_terms.csv",
        table: "recipe_search_terms",
        columns: &["recipe_id", "search_term"],
    },
];

/// Per-table outcome
#[derive(Debug, Clone)]
pub struct TableReport {
    pub table: String,
    pub rows_imported: usize,
    pub skipped: bool,
}

/// Overall import summary
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub tables: Vec<TableReport>,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows_imported).sum()
    }
}

/// Parse one CSV file into rows of the configured columns.
///
/// Cells are located by header name (case-insensitive), so the file's
/// column order does not matter. A missing or empty cell becomes None,
/// which inserts as NULL rather than an empty string.
pub fn parse_rows<R: Read>(reader: R, columns: &[&str]) -> Result<Vec<Vec<Option<String>>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let mut indexes = Vec::with_capacity(columns.len());
    for name in columns {
        let Some(index) = headers.iter().position(|h| h.eq_ignore_ascii_case(name)) else {
            bail!("Missing required column: {name}");
        };
        indexes.push(index);
    }

    let mut rows = Vec::new();
    for (line_num, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to parse CSV row {}", line_num + 2))?;

        let row: Vec<Option<String>> = indexes
            .iter()
            .map(|&index| {
                record
                    .get(index)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
            .collect();

        rows.push(row);
    }

    Ok(rows)
}

/// Insert parsed rows for one step inside a single transaction.
///
/// The first failing row rolls the whole table back.
pub async fn insert_rows(
    pool: &SqlitePool,
    step: &ImportStep,
    rows: &[Vec<Option<String>>],
) -> Result<()> {
    let placeholders = vec!["?"; step.columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        step.table,
        step.columns.join(", "),
        placeholders
    );

    let mut tx = pool.begin().await.context("Failed to open transaction")?;

    for (row_num, row) in rows.iter().enumerate() {
        let mut query = sqlx::query(&sql);
        for value in row {
            query = query.bind(value.as_deref());
        }
        query
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert row {} into {}", row_num + 1, step.table))?;
    }

    tx.commit().await.context("Failed to commit transaction")?;

    Ok(())
}

/// Run every import step in order against the CSV files under `data_dir`.
///
/// Aborts at the first failing step; steps already committed stay
/// committed. A file that parses to zero rows is skipped with a warning.
pub async fn run_import(pool: &SqlitePool, data_dir: &Path) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for step in &IMPORT_STEPS {
        let path = data_dir.join(step.file_name);
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let rows = parse_rows(file, step.columns)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if rows.is_empty() {
            warn!("{}: no rows, skipping", step.file_name);
            summary.tables.push(TableReport {
                table: step.table.to_string(),
                rows_imported: 0,
                skipped: true,
            });
            continue;
        }

        insert_rows(pool, step, &rows)
            .await
            .with_context(|| format!("Import of {} failed", step.file_name))?;

        info!(
            "{}: imported {} rows into {}",
            step.file_name,
            rows.len(),
            step.table
        );
        summary.tables.push(TableReport {
            table: step.table.to_string(),
            rows_imported: rows.len(),
            skipped: false,
        });
    }

    Ok(summary)
}
