//! mealprep-import binary entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mealprep_common::config::{database_path, ensure_root_folder, resolve_root_folder};
use mealprep_common::db::init::init_database;
use mealprep_import::csv_import::run_import;

/// One-shot CSV to database import for the mealprep schema
#[derive(Parser, Debug)]
#[command(name = "mealprep-import", version, about)]
struct Args {
    /// Directory holding the CSV files
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Root folder holding the database (overrides config file and environment)
    #[arg(short, long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealprep_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mealprep-import v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    ensure_root_folder(&root_folder).context("Failed to create root folder")?;
    info!("Root folder: {}", root_folder.display());

    let db_path = database_path(&root_folder);
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    info!("Importing CSV files from {}", args.data_dir.display());
    let summary = run_import(&pool, &args.data_dir).await?;

    for table in &summary.tables {
        if table.skipped {
            info!("  {}: skipped (no rows)", table.table);
        } else {
            info!("  {}: {} rows", table.table, table.rows_imported);
        }
    }
    info!("Import complete: {} rows total", summary.total_rows());

    Ok(())
}
