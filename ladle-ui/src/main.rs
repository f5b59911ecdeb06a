//! ladle-ui - Recipe manager web service
//!
//! Serves the recipe/label/profile APIs over HTTP backed by a SQLite
//! database in the application root folder. Zero-config startup: the root
//! folder resolves from CLI argument, environment, config file, or an
//! OS-dependent default, and the database is created on first run.

use anyhow::Result;
use clap::Parser;
use ladle_common::db::settings::get_setting_or;
use ladle_common::{config, db};
use ladle_ui::{build_router, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ladle-ui", about = "Ladle recipe manager web service")]
struct Args {
    /// Root folder holding the database (overrides LADLE_ROOT and config file)
    #[arg(long)]
    root: Option<String>,

    /// Seed demo data (default user, labels, sample recipes) after init
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Ladle UI (ladle-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    if args.seed {
        db::seed::seed_demo_data(&pool).await?;
    }

    let host: String = get_setting_or(&pool, "http_host", "127.0.0.1".to_string()).await?;
    let port: u16 = get_setting_or(&pool, "http_port", 5730u16).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("ladle-ui listening on http://{}:{}", host, port);
    info!("Health check: http://{}:{}/health", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}
