//! Recipe API handlers
//!
//! Reads are public. Mutations run the check ladder in a fixed order -
//! authentication, then existence, then ownership - each short-circuiting
//! with its own error. Updates are full replacements: the supplied
//! ingredient and label sets overwrite whatever the recipe had, and an
//! omitted set means "none".

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ladle_common::Error;
use serde::Deserialize;

use crate::db::recipes::{self, NewIngredient, NewRecipe, RecipeDetail};
use crate::identity::MaybeIdentity;
use crate::AppState;

use super::error::ApiResult;

/// Incoming recipe fields; every field optional so the same shape serves
/// create (all required, checked in validation) and partial update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub instructions: Option<String>,
    pub rating: Option<i64>,
    pub ingredients: Option<Vec<IngredientPayload>>,
    pub label_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPayload {
    pub quantity: QuantityInput,
    #[serde(default)]
    pub unit: String,
    pub name: String,
}

/// A quantity arrives either as a JSON number or as a string, where the
/// string form may be a simple fraction ("1/2" normalizes to 0.5)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(f64),
    Text(String),
}

/// GET /api/recipes
pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<RecipeDetail>>> {
    let recipes = recipes::list_recipes(&state.db).await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecipeDetail>> {
    let recipe = recipes::get_recipe_detail(&state.db, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(recipe))
}

/// POST /api/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    Json(payload): Json<RecipePayload>,
) -> ApiResult<(StatusCode, Json<RecipeDetail>)> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to create recipes".to_string())
    })?;

    let input = validate_full(payload)?;
    let recipe_id = recipes::create_recipe(&state.db, &identity.user_id, &input).await?;

    let recipe = recipes::get_recipe_detail(&state.db, &recipe_id)
        .await?
        .ok_or_else(|| Error::Internal("Recipe vanished after create".to_string()))?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// PUT /api/recipes/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MaybeIdentity(identity): MaybeIdentity,
    Json(payload): Json<RecipePayload>,
) -> ApiResult<Json<RecipeDetail>> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to update recipes".to_string())
    })?;

    let existing = recipes::fetch_recipe(&state.db, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {} not found", id)))?;

    if existing.user_id != identity.user_id {
        return Err(Error::Forbidden("You can only update your own recipes".to_string()).into());
    }

    // Scalars merge with the stored row; child collections do not - an
    // omitted set clears, per the full-replace contract
    let input = NewRecipe {
        title: merged_field(payload.title, existing.title, "Title is required")?,
        author: merged_field(payload.author, existing.author, "Author is required")?,
        instructions: merged_field(
            payload.instructions,
            existing.instructions,
            "Instructions are required",
        )?,
        rating: validate_rating(payload.rating.unwrap_or(existing.rating))?,
        ingredients: validate_ingredients(payload.ingredients.unwrap_or_default())?,
        label_ids: payload.label_ids.unwrap_or_default(),
    };

    recipes::replace_recipe(&state.db, &id, &input).await?;

    let recipe = recipes::get_recipe_detail(&state.db, &id)
        .await?
        .ok_or_else(|| Error::Internal("Recipe vanished after update".to_string()))?;

    Ok(Json(recipe))
}

/// DELETE /api/recipes/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MaybeIdentity(identity): MaybeIdentity,
) -> ApiResult<StatusCode> {
    let identity = identity.ok_or_else(|| {
        Error::Unauthenticated("You must be logged in to delete recipes".to_string())
    })?;

    let existing = recipes::fetch_recipe(&state.db, &id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Recipe {} not found", id)))?;

    if existing.user_id != identity.user_id {
        return Err(Error::Forbidden("You can only delete your own recipes".to_string()).into());
    }

    recipes::delete_recipe(&state.db, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Validate a payload where every field is required (create path)
fn validate_full(payload: RecipePayload) -> Result<NewRecipe, Error> {
    let title = required_field(payload.title, "Title is required")?;
    let author = required_field(payload.author, "Author is required")?;
    let instructions = required_field(payload.instructions, "Instructions are required")?;
    let rating = validate_rating(
        payload
            .rating
            .ok_or_else(|| Error::InvalidInput("Rating is required".to_string()))?,
    )?;

    Ok(NewRecipe {
        title,
        author,
        instructions,
        rating,
        ingredients: validate_ingredients(payload.ingredients.unwrap_or_default())?,
        label_ids: payload.label_ids.unwrap_or_default(),
    })
}

fn required_field(value: Option<String>, message: &str) -> Result<String, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::InvalidInput(message.to_string())),
    }
}

/// A supplied scalar must be non-empty; an omitted one keeps the stored value
fn merged_field(supplied: Option<String>, stored: String, message: &str) -> Result<String, Error> {
    match supplied {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(Error::InvalidInput(message.to_string())),
        None => Ok(stored),
    }
}

fn validate_rating(rating: i64) -> Result<i64, Error> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(Error::InvalidInput(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

fn validate_ingredients(payload: Vec<IngredientPayload>) -> Result<Vec<NewIngredient>, Error> {
    payload
        .into_iter()
        .map(|ing| {
            if ing.name.trim().is_empty() {
                return Err(Error::InvalidInput(
                    "Ingredient name is required".to_string(),
                ));
            }
            Ok(NewIngredient {
                quantity: normalize_quantity(&ing.quantity)?,
                unit: ing.unit,
                name: ing.name,
            })
        })
        .collect()
}

/// Normalize a quantity to a non-negative f64
///
/// String inputs accept plain decimals and simple fractions ("1/2" → 0.5).
fn normalize_quantity(input: &QuantityInput) -> Result<f64, Error> {
    let value = match input {
        QuantityInput::Number(n) => *n,
        QuantityInput::Text(s) => {
            let s = s.trim();
            if let Some((numerator, denominator)) = s.split_once('/') {
                let numerator: f64 = numerator
                    .trim()
                    .parse()
                    .map_err(|_| invalid_quantity(s))?;
                let denominator: f64 = denominator
                    .trim()
                    .parse()
                    .map_err(|_| invalid_quantity(s))?;
                if denominator == 0.0 {
                    return Err(invalid_quantity(s));
                }
                numerator / denominator
            } else {
                s.parse().map_err(|_| invalid_quantity(s))?
            }
        }
    };

    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "Quantity must be a non-negative number, got {}",
            value
        )));
    }

    Ok(value)
}

fn invalid_quantity(raw: &str) -> Error {
    Error::InvalidInput(format!("Invalid quantity: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_from_number() {
        assert_eq!(normalize_quantity(&QuantityInput::Number(2.25)).unwrap(), 2.25);
        assert_eq!(normalize_quantity(&QuantityInput::Number(0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_quantity_fraction_normalizes() {
        let half = normalize_quantity(&QuantityInput::Text("1/2".to_string())).unwrap();
        assert_eq!(half, 0.5);

        let three_quarters = normalize_quantity(&QuantityInput::Text(" 3 / 4 ".to_string())).unwrap();
        assert_eq!(three_quarters, 0.75);
    }

    #[test]
    fn test_quantity_plain_string() {
        assert_eq!(
            normalize_quantity(&QuantityInput::Text("2.5".to_string())).unwrap(),
            2.5
        );
    }

    #[test]
    fn test_quantity_rejects_garbage() {
        assert!(normalize_quantity(&QuantityInput::Text("a lot".to_string())).is_err());
        assert!(normalize_quantity(&QuantityInput::Text("1/0".to_string())).is_err());
        assert!(normalize_quantity(&QuantityInput::Text("-1/2".to_string())).is_err());
        assert!(normalize_quantity(&QuantityInput::Number(-1.0)).is_err());
        assert!(normalize_quantity(&QuantityInput::Number(f64::NAN)).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
