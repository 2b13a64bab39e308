//! mealprep-web binary entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mealprep_common::config::{database_path, ensure_root_folder, resolve_root_folder};
use mealprep_common::db::init::init_database;
use mealprep_web::{build_router, AppState};

/// Recipe browsing and meal planning web service
#[derive(Parser, Debug)]
#[command(name = "mealprep-web", version, about)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "MEALPREP_PORT")]
    port: u16,

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
                .unwrap_or_else(|_| "mealprep_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting mealprep-web v{} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TIMESTAMP")
    );

    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    ensure_root_folder(&root_folder).context("Failed to create root folder")?;
    info!("Root folder: {}", root_folder.display());

    let db_path = database_path(&root_folder);
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
