//! Label API handlers
//!
//! Labels have no ownership concept: any authenticated caller may create,
//! edit, or delete any label. Deletion is refused while recipes still
//! reference the label.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ladle_common::db::models::Label;
use ladle_common::Error;
use serde::{Deserialize, Serialize};

use crate::db::{labels, recipes};
use crate::identity::MaybeIdentity;
use crate::AppState;

use super::error::ApiResult;
use crate::db::recipes::RecipeDetail;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPayload {
    pub name: String,
    pub color: String,
}

/// Label as it appears on the wire
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Label> for LabelResponse {
    fn from(label: Label) -> Self {
        Self {
            id: label.guid,
            name: label.name,
            color: label.color,
            created_at: label.created_at,
            updated_at: label.updated_at,
        }
    }
}

/// GET /api/labels
pub async fn list_labels(State(state): State<AppState>) -> ApiResult<Json<Vec<LabelResponse>>> {
    let labels = labels::list_labels(&state.db).await?;
    Ok(Json(labels.into_iter().map(LabelResponse::from).collect()))
}

/// GET /api/labels/:id
pub async fn get_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<LabelResponse>> {
    let label = labels::get_label(&state.db, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Label {} not found", id)))?;

    Ok(Json(label.into()))
}

/// GET /api/labels/:id/recipes
///
/// Read-side join: an unknown label id simply yields an empty list.
pub async fn recipes_by_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<RecipeDetail>>> {
    let recipes = recipes::list_by_label(&state.db, &id).await?;
    Ok(Json(recipes))
}

/// POST /api/labels
pub async fn create_label(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    Json(payload): Json<LabelPayload>,
) -> ApiResult<(StatusCode, Json<LabelResponse>)> {
    identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to create labels".to_string())
    })?;

    validate(&payload)?;

    let label = labels::create_label(&state.db, payload.name.trim(), &payload.color).await?;
    Ok((StatusCode::CREATED, Json(label.into())))
}

/// PUT /api/labels/:id
pub async fn update_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MaybeIdentity(identity): MaybeIdentity,
    Json(payload): Json<LabelPayload>,
) -> ApiResult<Json<LabelResponse>> {
    identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to update labels".to_string())
    })?;

    validate(&payload)?;

    let label = labels::update_label(&state.db, &id, payload.name.trim(), &payload.color)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Label {} not found", id)))?;

    Ok(Json(label.into()))
}

/// DELETE /api/labels/:id
pub async fn delete_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MaybeIdentity(identity): MaybeIdentity,
) -> ApiResult<StatusCode> {
    identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to delete labels".to_string())
    })?;

    labels::delete_label(&state.db, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate(payload: &LabelPayload) -> Result<(), Error> {
    if payload.name.trim().is_empty() {
        return Err(Error::InvalidInput("Label name is required".to_string()));
    }
    if payload.color.trim().is_empty() {
        return Err(Error::InvalidInput("Label color is required".to_string()));
    }
    Ok(())
}
