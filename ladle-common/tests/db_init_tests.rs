//! Unit tests for database initialization and schema constraints
//!
//! Covers automatic database creation, idempotent re-initialization,
//! default settings, and the relational integrity rules the services
//! rely on (unique email/label name, cascade delete, label FK backstop).

use ladle_common::db::init::init_database;
use ladle_common::time;
use std::path::PathBuf;
use uuid::Uuid;

fn temp_db_path(tag: &str) -> PathBuf {
    PathBuf::from(format!(
        "/tmp/ladle-test-db-{}-{}.db",
        tag,
        std::process::id()
    ))
}

async fn insert_user(pool: &sqlx::SqlitePool, email: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    let now = time::now_rfc3339();
    sqlx::query(
        "INSERT INTO users (guid, email, name, created_at, updated_at) VALUES (?, ?, NULL, ?, ?)",
    )
    .bind(&guid)
    .bind(email)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap();
    guid
}

async fn insert_recipe(pool: &sqlx::SqlitePool, user_id: &str, title: &str) -> String {
    let guid = Uuid::new_v4().to_string();
    let now = time::now_rfc3339();
    sqlx::query(
        r#"
        INSERT INTO recipes (guid, title, author, instructions, rating, user_id, created_at, updated_at)
        VALUES (?, ?, 'A. Cook', 'Mix well.', 3, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(title)
    .bind(user_id)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .unwrap();
    guid
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let db_path = temp_db_path("create");
    let _ = std::fs::remove_file(&db_path);

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");

    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_idempotent_initialization() {
    let db_path = temp_db_path("idempotent");
    let _ = std::fs::remove_file(&db_path);

    let pool1 = init_database(&db_path).await.unwrap();
    drop(pool1);

    // Second initialization should not error or change settings
    let pool2 = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert!(count >= 3, "Expected default settings, got {}", count);

    drop(pool2);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let db_path = temp_db_path("settings");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let test_cases = [
        ("http_host", "127.0.0.1"),
        ("http_port", "5730"),
        ("session_timeout_seconds", "2592000"),
    ];

    for (key, expected_value) in test_cases {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&pool)
            .await
            .unwrap();

        assert_eq!(value.as_deref(), Some(expected_value), "Setting '{}' wrong", key);
    }

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_foreign_keys_enabled() {
    let db_path = temp_db_path("fk");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let fk_enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(fk_enabled, 1, "Foreign keys should be enabled");

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_email_uniqueness_enforced() {
    let db_path = temp_db_path("email-unique");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    insert_user(&pool, "dup@example.com").await;

    let now = time::now_rfc3339();
    let result = sqlx::query(
        "INSERT INTO users (guid, email, created_at, updated_at) VALUES (?, 'dup@example.com', ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&now)
    .bind(&now)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Duplicate email should violate UNIQUE constraint");

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_recipe_delete_cascades_to_children() {
    let db_path = temp_db_path("cascade");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let user_id = insert_user(&pool, "owner@example.com").await;
    let recipe_id = insert_recipe(&pool, &user_id, "Soup").await;
    let now = time::now_rfc3339();

    sqlx::query(
        "INSERT INTO ingredients (guid, recipe_id, quantity, unit, name, position) VALUES (?, ?, 1.0, 'cup', 'stock', 0)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&recipe_id)
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO labels (guid, name, color, created_at, updated_at) VALUES (?, 'Soups', '#123456', ?, ?)")
        .bind("label-1")
        .bind(&now)
        .bind(&now)
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO recipe_labels (recipe_id, label_id, created_at) VALUES (?, 'label-1', ?)")
        .bind(&recipe_id)
        .bind(&now)
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM recipes WHERE guid = ?")
        .bind(&recipe_id)
        .execute(&pool)
        .await
        .unwrap();

    let ingredient_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE recipe_id = ?")
            .bind(&recipe_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(ingredient_count, 0, "Ingredients should cascade with their recipe");

    let link_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe_labels WHERE recipe_id = ?")
            .bind(&recipe_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(link_count, 0, "Label links should cascade with their recipe");

    // The label itself survives - it is shared, not owned
    let label_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM labels")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(label_count, 1);

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_referenced_label_delete_blocked_by_fk() {
    let db_path = temp_db_path("label-fk");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let user_id = insert_user(&pool, "owner@example.com").await;
    let recipe_id = insert_recipe(&pool, &user_id, "Cake").await;
    let now = time::now_rfc3339();

    sqlx::query("INSERT INTO labels (guid, name, color, created_at, updated_at) VALUES ('label-2', 'Cakes', '#654321', ?, ?)")
        .bind(&now)
        .bind(&now)
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO recipe_labels (recipe_id, label_id, created_at) VALUES (?, 'label-2', ?)")
        .bind(&recipe_id)
        .bind(&now)
        .execute(&pool)
        .await
        .unwrap();

    // No cascade from labels: the raw delete must fail while referenced
    let result = sqlx::query("DELETE FROM labels WHERE guid = 'label-2'")
        .execute(&pool)
        .await;
    assert!(result.is_err(), "Deleting a referenced label should violate the FK");

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}

#[tokio::test]
async fn test_rating_check_constraint() {
    let db_path = temp_db_path("rating");
    let _ = std::fs::remove_file(&db_path);

    let pool = init_database(&db_path).await.unwrap();

    let user_id = insert_user(&pool, "owner@example.com").await;
    let now = time::now_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO recipes (guid, title, author, instructions, rating, user_id, created_at, updated_at)
        VALUES (?, 'Bad', 'X', 'Y', 6, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&user_id)
    .bind(&now)
    .bind(&now)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "Rating outside 1..=5 should violate CHECK");

    drop(pool);
    let _ = std::fs::remove_file(&db_path);
}
