//! Profile endpoints
//!
//! The password-change path runs its own check ladder: the current password
//! must be supplied, the account must actually hold a password credential,
//! the current password must verify, and the new one must meet the length
//! floor. Each rung has a distinct error.

use axum::{extract::State, Json};
use ladle_common::db::models::User;
use ladle_common::{auth as credentials, Error};
use serde::{Deserialize, Serialize};

use crate::db::recipes::RecipeDetail;
use crate::db::{recipes, users};
use crate::identity::MaybeIdentity;
use crate::AppState;

use super::error::ApiResult;

/// User as it appears on the wire; credential columns never leave the server
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.guid,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> ApiResult<Json<UserResponse>> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to view your profile".to_string())
    })?;

    let user = users::find_by_id(&state.db, &identity.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    Json(payload): Json<ProfilePayload>,
) -> ApiResult<Json<UserResponse>> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to update your profile".to_string())
    })?;

    let user = users::find_by_id(&state.db, &identity.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    // Every check runs before any write so a rejected request leaves the
    // user untouched, password change included
    if let Some(email) = email {
        if !email.contains('@') {
            return Err(Error::InvalidInput("A valid email is required".to_string()).into());
        }
        if email != user.email {
            if let Some(existing) = users::find_by_email(&state.db, email).await? {
                if existing.guid != user.guid {
                    return Err(Error::Conflict("Email is already taken".to_string()).into());
                }
            }
        }
    }

    if let Some(new_password) = &payload.new_password {
        check_password_change(&user, payload.current_password.as_deref(), new_password)?;
        users::set_password(&state.db, &user.guid, new_password).await?;
    }

    users::update_profile(&state.db, &user.guid, name, email).await?;

    let updated = users::find_by_id(&state.db, &user.guid)
        .await?
        .ok_or_else(|| Error::Internal("User vanished after update".to_string()))?;

    Ok(Json(updated.into()))
}

/// GET /api/profile/recipes
///
/// The caller's own recipes, newest first.
pub async fn my_recipes(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
) -> ApiResult<Json<Vec<RecipeDetail>>> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to view your recipes".to_string())
    })?;

    let recipes = recipes::list_by_owner(&state.db, &identity.user_id).await?;
    Ok(Json(recipes))
}

fn check_password_change(
    user: &User,
    current_password: Option<&str>,
    new_password: &str,
) -> Result<(), Error> {
    let current = current_password.ok_or_else(|| {
        Error::InvalidInput("Current password is required to change password".to_string())
    })?;

    let (hash, salt) = match (&user.password_hash, &user.password_salt) {
        (Some(hash), Some(salt)) => (hash, salt),
        _ => {
            return Err(Error::Conflict(
                "Cannot change password for OAuth accounts".to_string(),
            ))
        }
    };

    if !credentials::verify_password(current, salt, hash) {
        return Err(Error::InvalidCredential(
            "Current password is incorrect".to_string(),
        ));
    }

    if new_password.len() < 6 {
        return Err(Error::InvalidInput(
            "New password must be at least 6 characters long".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladle_common::auth;

    fn user_with_password(password: &str) -> User {
        let salt = auth::generate_salt();
        let hash = auth::hash_password(password, &salt);
        User {
            guid: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: None,
            password_hash: Some(hash),
            password_salt: Some(salt),
            created_at: "2026-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_password_change_requires_current() {
        let user = user_with_password("old-secret");
        let err = check_password_change(&user, None, "new-secret").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_password_change_rejects_external_account() {
        let mut user = user_with_password("old-secret");
        user.password_hash = None;
        user.password_salt = None;
        let err = check_password_change(&user, Some("anything"), "new-secret").unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_password_change_verifies_current() {
        let user = user_with_password("old-secret");
        let err = check_password_change(&user, Some("wrong"), "new-secret").unwrap_err();
        assert!(matches!(err, Error::InvalidCredential(_)));
    }

    #[test]
    fn test_password_change_length_floor() {
        let user = user_with_password("old-secret");
        let err = check_password_change(&user, Some("old-secret"), "tiny").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        assert!(check_password_change(&user, Some("old-secret"), "long-enough").is_ok());
    }
}
