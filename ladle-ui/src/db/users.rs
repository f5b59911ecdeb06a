//! User database operations

use ladle_common::db::models::User;
use ladle_common::{auth, time, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::conflict_on_unique;

const USER_COLUMNS: &str =
    "guid, email, name, password_hash, password_salt, created_at, updated_at";

type UserRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

fn row_to_user(row: UserRow) -> User {
    User {
        guid: row.0,
        email: row.1,
        name: row.2,
        password_hash: row.3,
        password_salt: row.4,
        created_at: row.5,
        updated_at: row.6,
    }
}

/// Create a user with a password credential
///
/// Email uniqueness is enforced by the schema; a duplicate surfaces as
/// Conflict.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    name: Option<&str>,
    password: &str,
) -> Result<User> {
    let guid = Uuid::new_v4().to_string();
    let salt = auth::generate_salt();
    let hash = auth::hash_password(password, &salt);
    let now = time::now_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (guid, email, name, password_hash, password_salt, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(email)
    .bind(name)
    .bind(&hash)
    .bind(&salt)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "A user with this email already exists"))?;

    Ok(User {
        guid,
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        password_hash: Some(hash),
        password_salt: Some(salt),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Create a user with no password credential (externally-authenticated)
pub async fn create_external_user(
    pool: &SqlitePool,
    email: &str,
    name: Option<&str>,
) -> Result<User> {
    let guid = Uuid::new_v4().to_string();
    let now = time::now_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (guid, email, name, password_hash, password_salt, created_at, updated_at)
        VALUES (?, ?, ?, NULL, NULL, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(email)
    .bind(name)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "A user with this email already exists"))?;

    Ok(User {
        guid,
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        password_hash: None,
        password_salt: None,
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Load a user by id
pub async fn find_by_id(pool: &SqlitePool, user_id: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {} FROM users WHERE guid = ?",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_user))
}

/// Load a user by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_user))
}

/// Update name and/or email
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: &str,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    if name.is_none() && email.is_none() {
        return Ok(());
    }

    sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            updated_at = ?
        WHERE guid = ?
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(time::now_rfc3339())
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, "Email is already taken"))?;

    Ok(())
}

/// Replace the stored password hash and salt
pub async fn set_password(pool: &SqlitePool, user_id: &str, password: &str) -> Result<()> {
    let salt = auth::generate_salt();
    let hash = auth::hash_password(password, &salt);

    sqlx::query(
        "UPDATE users SET password_hash = ?, password_salt = ?, updated_at = ? WHERE guid = ?",
    )
    .bind(&hash)
    .bind(&salt)
    .bind(time::now_rfc3339())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
