//! Registration, login, and logout
//!
//! Successful register and login responses carry the session token both in
//! the JSON body and as a `Set-Cookie` header, so browser and API clients
//! use the same endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use ladle_common::{auth as credentials, Error};
use serde::{Deserialize, Serialize};

use crate::db::{sessions, users};
use crate::identity::{session_token_from_headers, SESSION_COOKIE};
use crate::AppState;

use super::error::ApiResult;
use super::profile::UserResponse;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1], Json<SessionResponse>)> {
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput("A valid email is required".to_string()).into());
    }
    if payload.password.len() < 6 {
        return Err(Error::InvalidInput(
            "Password must be at least 6 characters long".to_string(),
        )
        .into());
    }

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let user = users::create_user(&state.db, email, name, &payload.password).await?;
    let session = sessions::create_session(&state.db, &user.guid).await?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(SessionResponse {
            token: session.token,
            user: user.into(),
        }),
    ))
}

/// POST /api/auth/login
///
/// All failure paths return the same message so the response does not reveal
/// whether the email exists. Accounts without a stored password (external
/// sign-in) cannot log in here.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<([(header::HeaderName, String); 1], Json<SessionResponse>)> {
    let user = users::find_by_email(&state.db, payload.email.trim())
        .await?
        .ok_or_else(invalid_login)?;

    let (hash, salt) = match (&user.password_hash, &user.password_salt) {
        (Some(hash), Some(salt)) => (hash, salt),
        _ => return Err(invalid_login().into()),
    };

    if !credentials::verify_password(&payload.password, salt, hash) {
        return Err(invalid_login().into());
    }

    let session = sessions::create_session(&state.db, &user.guid).await?;

    Ok((
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(SessionResponse {
            token: session.token,
            user: user.into(),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Deletes the session if one was presented and clears the cookie either way.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<(StatusCode, [(header::HeaderName, String); 1])> {
    if let Some(token) = session_token_from_headers(&headers) {
        sessions::delete_session(&state.db, &token).await?;
    }

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, clear_cookie())]))
}

fn invalid_login() -> Error {
    Error::InvalidCredential("Invalid email or password".to_string())
}

fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    )
}

fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_format() {
        let cookie = session_cookie("abc123");
        assert!(cookie.starts_with("ladle_session=abc123;"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn test_clear_cookie_expires() {
        let cookie = clear_cookie();
        assert!(cookie.starts_with("ladle_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
