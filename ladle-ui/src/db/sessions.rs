//! Session database operations
//!
//! Sessions are bearer rows in the `sessions` table: token, owning user,
//! and an absolute expiry computed from the `session_timeout_seconds`
//! setting at creation time. Expired rows are deleted lazily on lookup.

use chrono::Duration;
use ladle_common::db::models::Session;
use ladle_common::db::settings::get_setting_or;
use ladle_common::{auth, time, Result};
use sqlx::SqlitePool;

use crate::identity::Identity;

const DEFAULT_TIMEOUT_SECONDS: i64 = 2_592_000; // 30 days

/// Create a session for a user, returning the stored row
pub async fn create_session(pool: &SqlitePool, user_id: &str) -> Result<Session> {
    let timeout_secs: i64 =
        get_setting_or(pool, "session_timeout_seconds", DEFAULT_TIMEOUT_SECONDS).await?;

    let token = auth::generate_session_token();
    let now = chrono::Utc::now();
    let created_at = time::to_rfc3339(now);
    let expires_at = time::to_rfc3339(now + Duration::seconds(timeout_secs));

    sqlx::query(
        "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&token)
    .bind(user_id)
    .bind(&created_at)
    .bind(&expires_at)
    .execute(pool)
    .await?;

    Ok(Session {
        token,
        user_id: user_id.to_string(),
        created_at,
        expires_at,
    })
}

/// Resolve a session token to the caller's identity
///
/// Returns `None` for unknown or expired tokens; expired rows are removed
/// as a side effect.
pub async fn identity_for_token(pool: &SqlitePool, token: &str) -> Result<Option<Identity>> {
    let row: Option<(String, String, Option<String>, String)> = sqlx::query_as(
        r#"
        SELECT u.guid, u.email, u.name, s.expires_at
        FROM sessions s
        JOIN users u ON u.guid = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let Some((user_id, email, name, expires_at)) = row else {
        return Ok(None);
    };

    let expires = time::parse_rfc3339(&expires_at)?;
    if expires <= chrono::Utc::now() {
        delete_session(pool, token).await?;
        return Ok(None);
    }

    Ok(Some(Identity {
        user_id,
        email,
        name,
    }))
}

/// Delete a session (logout, or expiry cleanup)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
