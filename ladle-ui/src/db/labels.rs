//! Label database operations
//!
//! Labels have an independent lifecycle: they are shared across recipes via
//! the `recipe_labels` link table and are never owned by a recipe or a
//! user. Deleting a label is refused while any recipe still references it.

use ladle_common::db::models::Label;
use ladle_common::{time, Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::conflict_on_unique;

const NAME_CONFLICT_MESSAGE: &str = "A label with this name already exists";

type LabelRow = (String, String, String, String, String);

fn row_to_label(row: LabelRow) -> Label {
    Label {
        guid: row.0,
        name: row.1,
        color: row.2,
        created_at: row.3,
        updated_at: row.4,
    }
}

/// All labels ordered by name ascending
pub async fn list_labels(pool: &SqlitePool) -> Result<Vec<Label>> {
    let rows: Vec<LabelRow> = sqlx::query_as(
        "SELECT guid, name, color, created_at, updated_at FROM labels ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(row_to_label).collect())
}

/// Load a label by id
pub async fn get_label(pool: &SqlitePool, label_id: &str) -> Result<Option<Label>> {
    let row: Option<LabelRow> = sqlx::query_as(
        "SELECT guid, name, color, created_at, updated_at FROM labels WHERE guid = ?",
    )
    .bind(label_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(row_to_label))
}

/// Create a label; a duplicate name surfaces as Conflict
pub async fn create_label(pool: &SqlitePool, name: &str, color: &str) -> Result<Label> {
    let guid = Uuid::new_v4().to_string();
    let now = time::now_rfc3339();

    sqlx::query(
        "INSERT INTO labels (guid, name, color, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(name)
    .bind(color)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, NAME_CONFLICT_MESSAGE))?;

    Ok(Label {
        guid,
        name: name.to_string(),
        color: color.to_string(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Update a label's name and color
///
/// Returns the updated label, or `None` when the id does not resolve.
pub async fn update_label(
    pool: &SqlitePool,
    label_id: &str,
    name: &str,
    color: &str,
) -> Result<Option<Label>> {
    let result = sqlx::query(
        "UPDATE labels SET name = ?, color = ?, updated_at = ? WHERE guid = ?",
    )
    .bind(name)
    .bind(color)
    .bind(time::now_rfc3339())
    .bind(label_id)
    .execute(pool)
    .await
    .map_err(|e| conflict_on_unique(e, NAME_CONFLICT_MESSAGE))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_label(pool, label_id).await
}

/// Number of recipes currently referencing a label
pub async fn reference_count(pool: &SqlitePool, label_id: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_labels WHERE label_id = ?")
        .bind(label_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Delete a label
///
/// Refuses with Conflict while any recipe references it; the explicit check
/// runs before the delete so the caller gets the message rather than a raw
/// foreign-key failure.
pub async fn delete_label(pool: &SqlitePool, label_id: &str) -> Result<()> {
    if reference_count(pool, label_id).await? > 0 {
        return Err(Error::Conflict(
            "Cannot delete label that is being used by recipes".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM labels WHERE guid = ?")
        .bind(label_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Label {} not found", label_id)));
    }

    Ok(())
}
