//! Authentication context
//!
//! Resolves the caller's identity from the request's session token and
//! exposes exactly one thing: identity or none. Handlers receive the result
//! as an explicit `MaybeIdentity` argument; none of the service logic reads
//! authentication state from anywhere else.
//!
//! The session token is accepted from the `ladle_session` cookie or from an
//! `Authorization: Bearer` header.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;
use std::convert::Infallible;
use tracing::warn;

use crate::{db, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "ladle_session";

/// The resolved caller
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Extractor wrapping "identity or none"
///
/// Never rejects: endpoints that require authentication check the inner
/// `Option` themselves so they control the error and its ordering.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token_from_headers(&parts.headers) else {
            return Ok(MaybeIdentity(None));
        };

        match db::sessions::identity_for_token(&state.db, &token).await {
            Ok(identity) => Ok(MaybeIdentity(identity)),
            Err(e) => {
                // A broken session lookup must not turn a public read into
                // an error; the caller is simply anonymous
                warn!("Session lookup failed: {}", e);
                Ok(MaybeIdentity(None))
            }
        }
    }
}

/// Extract the session token from request headers, if present
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookie_header.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(SESSION_COOKIE) {
                if let Some(value) = parts.next() {
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ladle_session=abc123; other=1"),
        );
        assert_eq!(session_token_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-42"),
        );
        assert_eq!(session_token_from_headers(&headers).as_deref(), Some("tok-42"));
    }

    #[test]
    fn test_no_token() {
        let headers = HeaderMap::new();
        assert!(session_token_from_headers(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("ladle_session="));
        assert!(session_token_from_headers(&headers).is_none());
    }
}
