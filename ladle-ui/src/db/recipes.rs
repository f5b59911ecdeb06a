//! Recipe database operations
//!
//! Owns the relational integrity of a recipe and its children:
//! - create inserts the recipe, its ingredients, and its label links in one
//!   transaction
//! - replace (update) deletes existing children, updates the scalar fields,
//!   and inserts the new child sets in one transaction - full replacement,
//!   never a merge
//! - delete relies on the schema's ON DELETE CASCADE for children

use ladle_common::db::models::Recipe;
use ladle_common::{time, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Validated input for creating or fully replacing a recipe
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub author: String,
    pub instructions: String,
    pub rating: i64,
    pub ingredients: Vec<NewIngredient>,
    pub label_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub quantity: f64,
    pub unit: String,
    pub name: String,
}

/// A recipe hydrated with its ingredients, label details, and owner summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: String,
    pub title: String,
    pub author: String,
    pub instructions: String,
    pub rating: i64,
    pub created_at: String,
    pub updated_at: String,
    pub ingredients: Vec<IngredientDetail>,
    pub labels: Vec<LabelSummary>,
    pub owner: OwnerSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDetail {
    pub id: String,
    pub recipe_id: String,
    pub quantity: f64,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

type RecipeOwnerRow = (
    String,         // guid
    String,         // title
    String,         // author
    String,         // instructions
    i64,            // rating
    String,         // user_id
    String,         // created_at
    String,         // updated_at
    Option<String>, // owner name
    String,         // owner email
);

const RECIPE_OWNER_SELECT: &str = r#"
    SELECT r.guid, r.title, r.author, r.instructions, r.rating,
           r.user_id, r.created_at, r.updated_at,
           u.name, u.email
    FROM recipes r
    JOIN users u ON u.guid = r.user_id
"#;

/// Load a recipe row without hydration (ownership and merge checks)
pub async fn fetch_recipe(pool: &SqlitePool, recipe_id: &str) -> Result<Option<Recipe>> {
    let row: Option<(String, String, String, String, i64, String, String, String)> =
        sqlx::query_as(
            r#"
            SELECT guid, title, author, instructions, rating, user_id, created_at, updated_at
            FROM recipes WHERE guid = ?
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(
        |(guid, title, author, instructions, rating, user_id, created_at, updated_at)| Recipe {
            guid,
            title,
            author,
            instructions,
            rating,
            user_id,
            created_at,
            updated_at,
        },
    ))
}

/// All recipes, newest first, hydrated
pub async fn list_recipes(pool: &SqlitePool) -> Result<Vec<RecipeDetail>> {
    let rows: Vec<RecipeOwnerRow> =
        sqlx::query_as(&format!("{} ORDER BY r.created_at DESC", RECIPE_OWNER_SELECT))
            .fetch_all(pool)
            .await?;

    hydrate_rows(pool, rows).await
}

/// One recipe, hydrated
pub async fn get_recipe_detail(pool: &SqlitePool, recipe_id: &str) -> Result<Option<RecipeDetail>> {
    let row: Option<RecipeOwnerRow> =
        sqlx::query_as(&format!("{} WHERE r.guid = ?", RECIPE_OWNER_SELECT))
            .bind(recipe_id)
            .fetch_optional(pool)
            .await?;

    match row {
        Some(row) => Ok(Some(hydrate_row(pool, row).await?)),
        None => Ok(None),
    }
}

/// All recipes owned by the given user, newest first, hydrated
pub async fn list_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Vec<RecipeDetail>> {
    let rows: Vec<RecipeOwnerRow> = sqlx::query_as(&format!(
        "{} WHERE r.user_id = ? ORDER BY r.created_at DESC",
        RECIPE_OWNER_SELECT
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    hydrate_rows(pool, rows).await
}

/// All recipes carrying the given label, newest first, hydrated
pub async fn list_by_label(pool: &SqlitePool, label_id: &str) -> Result<Vec<RecipeDetail>> {
    let rows: Vec<RecipeOwnerRow> = sqlx::query_as(&format!(
        r#"{}
        JOIN recipe_labels rl ON rl.recipe_id = r.guid
        WHERE rl.label_id = ?
        ORDER BY r.created_at DESC
        "#,
        RECIPE_OWNER_SELECT
    ))
    .bind(label_id)
    .fetch_all(pool)
    .await?;

    hydrate_rows(pool, rows).await
}

/// Create a recipe with its ingredients and label links in one transaction
///
/// A dangling label id fails the FK constraint and rolls the whole insert
/// back; no partial recipe survives.
pub async fn create_recipe(
    pool: &SqlitePool,
    owner_id: &str,
    input: &NewRecipe,
) -> Result<String> {
    let recipe_id = Uuid::new_v4().to_string();
    let now = time::now_rfc3339();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO recipes (guid, title, author, instructions, rating, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&recipe_id)
    .bind(&input.title)
    .bind(&input.author)
    .bind(&input.instructions)
    .bind(input.rating)
    .bind(owner_id)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    insert_children(&mut tx, &recipe_id, input, &now).await?;

    tx.commit().await?;
    Ok(recipe_id)
}

/// Replace a recipe's scalar fields and child collections in one transaction
///
/// Ordering matters and is deliberate: existing ingredients and label links
/// are deleted first, then the scalars update, then the supplied child sets
/// are inserted. The transaction makes the sequence atomic.
pub async fn replace_recipe(pool: &SqlitePool, recipe_id: &str, input: &NewRecipe) -> Result<()> {
    let now = time::now_rfc3339();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM recipe_labels WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        UPDATE recipes
        SET title = ?, author = ?, instructions = ?, rating = ?, updated_at = ?
        WHERE guid = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.author)
    .bind(&input.instructions)
    .bind(input.rating)
    .bind(&now)
    .bind(recipe_id)
    .execute(&mut *tx)
    .await?;

    insert_children(&mut tx, recipe_id, input, &now).await?;

    tx.commit().await?;
    Ok(())
}

/// Delete a recipe; ingredients and label links cascade via the schema
pub async fn delete_recipe(pool: &SqlitePool, recipe_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM recipes WHERE guid = ?")
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

async fn insert_children(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    recipe_id: &str,
    input: &NewRecipe,
    now: &str,
) -> Result<()> {
    for (position, ingredient) in input.ingredients.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO ingredients (guid, recipe_id, quantity, unit, name, position)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(recipe_id)
        .bind(ingredient.quantity)
        .bind(&ingredient.unit)
        .bind(&ingredient.name)
        .bind(position as i64)
        .execute(&mut **tx)
        .await?;
    }

    for label_id in &input.label_ids {
        sqlx::query(
            "INSERT INTO recipe_labels (recipe_id, label_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(label_id)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn hydrate_rows(
    pool: &SqlitePool,
    rows: Vec<RecipeOwnerRow>,
) -> Result<Vec<RecipeDetail>> {
    let mut details = Vec::with_capacity(rows.len());
    for row in rows {
        details.push(hydrate_row(pool, row).await?);
    }
    Ok(details)
}

async fn hydrate_row(pool: &SqlitePool, row: RecipeOwnerRow) -> Result<RecipeDetail> {
    let (guid, title, author, instructions, rating, user_id, created_at, updated_at, owner_name, owner_email) =
        row;

    let ingredient_rows: Vec<(String, f64, String, String)> = sqlx::query_as(
        "SELECT guid, quantity, unit, name FROM ingredients WHERE recipe_id = ? ORDER BY position",
    )
    .bind(&guid)
    .fetch_all(pool)
    .await?;

    let ingredients = ingredient_rows
        .into_iter()
        .map(|(id, quantity, unit, name)| IngredientDetail {
            id,
            recipe_id: guid.clone(),
            quantity,
            unit,
            name,
        })
        .collect();

    let label_rows: Vec<(String, String, String)> = sqlx::query_as(
        r#"
        SELECT l.guid, l.name, l.color
        FROM recipe_labels rl
        JOIN labels l ON l.guid = rl.label_id
        WHERE rl.recipe_id = ?
        ORDER BY l.name
        "#,
    )
    .bind(&guid)
    .fetch_all(pool)
    .await?;

    let labels = label_rows
        .into_iter()
        .map(|(id, name, color)| LabelSummary { id, name, color })
        .collect();

    Ok(RecipeDetail {
        id: guid,
        title,
        author,
        instructions,
        rating,
        created_at,
        updated_at,
        ingredients,
        labels,
        owner: OwnerSummary {
            id: user_id,
            name: owner_name,
            email: owner_email,
        },
    })
}
