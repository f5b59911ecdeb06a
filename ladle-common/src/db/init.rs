//! Database initialization
//!
//! Creates the database file on first run and brings the schema up
//! idempotently (`CREATE TABLE IF NOT EXISTS`). Relational integrity lives
//! here: uniqueness on user email and label name, cascade delete from
//! recipes to ingredients and label links, and CHECK constraints on the
//! fields the services validate.

use crate::db::settings::ensure_setting;
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

    // Enable foreign keys - cascade delete for ingredients and label links
    // depends on this being on for every connection in the pool
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_users_table(&pool).await?;
    create_sessions_table(&pool).await?;
    create_recipes_table(&pool).await?;
    create_ingredients_table(&pool).await?;
    create_labels_table(&pool).await?;
    create_recipe_labels_table(&pool).await?;
    create_settings_table(&pool).await?;

    init_default_settings(&pool).await?;

    Ok(pool)
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    // password_hash/password_salt are NULL for externally-authenticated
    // accounts; those cannot change a password they do not have
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT,
            password_hash TEXT,
            password_salt TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (length(email) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(guid) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the recipes table
///
/// Every recipe has exactly one owner (`user_id`), immutable after creation.
pub async fn create_recipes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipes (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            instructions TEXT NOT NULL,
            rating INTEGER NOT NULL,
            user_id TEXT NOT NULL REFERENCES users(guid),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (length(title) > 0),
            CHECK (rating >= 1 AND rating <= 5)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user ON recipes(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_created ON recipes(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the ingredients table
///
/// Ingredients are exclusively owned by one recipe and are removed with it
/// (ON DELETE CASCADE). `position` preserves the order they were entered in.
pub async fn create_ingredients_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ingredients (
            guid TEXT PRIMARY KEY,
            recipe_id TEXT NOT NULL REFERENCES recipes(guid) ON DELETE CASCADE,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            CHECK (quantity >= 0),
            CHECK (length(name) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_labels_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS labels (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            color TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CHECK (length(name) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the recipe/label link table
///
/// Links cascade with their recipe. There is deliberately no cascade from
/// labels: deleting a referenced label is blocked at the service level and,
/// as a backstop, by the plain foreign key here.
pub async fn create_recipe_labels_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recipe_labels (
            recipe_id TEXT NOT NULL REFERENCES recipes(guid) ON DELETE CASCADE,
            label_id TEXT NOT NULL REFERENCES labels(guid),
            created_at TEXT NOT NULL,
            PRIMARY KEY (recipe_id, label_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipe_labels_label ON recipe_labels(label_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    // HTTP server settings
    ensure_setting(pool, "http_host", "127.0.0.1").await?;
    ensure_setting(pool, "http_port", "5730").await?;

    // Session and authentication settings
    ensure_setting(pool, "session_timeout_seconds", "2592000").await?; // 30 days

    info!("Default settings initialized");
    Ok(())
}
