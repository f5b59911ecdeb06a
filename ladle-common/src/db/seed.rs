//! Demo data seeding
//!
//! Populates a fresh database with a default account, a starter set of
//! labels, and two sample recipes. Safe to run repeatedly: the user and
//! labels upsert by their unique keys, and sample recipes are only inserted
//! into an empty recipes table.

use crate::{auth, time, Result};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

const DEFAULT_EMAIL: &str = "default@example.com";
const DEFAULT_PASSWORD: &str = "password123";

const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("Dessert", "#F59E0B"),
    ("Italian", "#10B981"),
    ("Quick", "#3B82F6"),
    ("Vegetarian", "#8B5CF6"),
    ("Gluten-Free", "#EF4444"),
    ("Breakfast", "#06B6D4"),
    ("Dinner", "#84CC16"),
    ("Snack", "#F97316"),
];

/// Seed demo data (default user, labels, sample recipes)
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    let user_id = ensure_default_user(pool).await?;
    ensure_default_labels(pool).await?;

    let recipe_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;

    if recipe_count > 0 {
        info!("Recipes already present, skipping sample recipes");
        return Ok(());
    }

    seed_recipe(
        pool,
        &user_id,
        "Classic Chocolate Chip Cookies",
        "Jane Smith",
        "1. Preheat oven to 375°F\n2. Mix butter and sugars\n3. Add eggs and vanilla\n4. Mix in dry ingredients\n5. Fold in chocolate chips\n6. Bake for 10-12 minutes",
        5,
        &[
            (2.25, "cups", "flour"),
            (1.0, "cup", "butter"),
            (0.75, "cup", "sugar"),
            (2.0, "", "eggs"),
            (1.0, "tsp", "vanilla"),
            (2.0, "cups", "chocolate chips"),
        ],
        &["Dessert", "Snack"],
    )
    .await?;

    seed_recipe(
        pool,
        &user_id,
        "Homemade Pizza",
        "John Doe",
        "1. Mix yeast with warm water\n2. Add flour and salt\n3. Knead for 10 minutes\n4. Let rise for 1 hour\n5. Roll out dough\n6. Add toppings\n7. Bake at 450°F for 15-20 minutes",
        4,
        &[
            (3.0, "cups", "flour"),
            (1.0, "cup", "warm water"),
            (2.25, "tsp", "yeast"),
            (1.0, "tsp", "salt"),
            (1.0, "tbsp", "olive oil"),
            (1.0, "cup", "pizza sauce"),
            (2.0, "cups", "mozzarella cheese"),
        ],
        &["Italian", "Dinner"],
    )
    .await?;

    info!("Demo data seeded");
    Ok(())
}

/// Create the default user if missing, returning its guid
async fn ensure_default_user(pool: &SqlitePool) -> Result<String> {
    let existing: Option<String> = sqlx::query_scalar("SELECT guid FROM users WHERE email = ?")
        .bind(DEFAULT_EMAIL)
        .fetch_optional(pool)
        .await?;

    if let Some(guid) = existing {
        return Ok(guid);
    }

    let guid = Uuid::new_v4().to_string();
    let salt = auth::generate_salt();
    let hash = auth::hash_password(DEFAULT_PASSWORD, &salt);
    let now = time::now_rfc3339();

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (guid, email, name, password_hash, password_salt, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&guid)
    .bind(DEFAULT_EMAIL)
    .bind("Default User")
    .bind(&hash)
    .bind(&salt)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    // Re-read in case a concurrent seeder won the insert race
    let guid: String = sqlx::query_scalar("SELECT guid FROM users WHERE email = ?")
        .bind(DEFAULT_EMAIL)
        .fetch_one(pool)
        .await?;

    Ok(guid)
}

async fn ensure_default_labels(pool: &SqlitePool) -> Result<()> {
    for (name, color) in DEFAULT_LABELS {
        let now = time::now_rfc3339();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO labels (guid, name, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(color)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn seed_recipe(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
    author: &str,
    instructions: &str,
    rating: i64,
    ingredients: &[(f64, &str, &str)],
    label_names: &[&str],
) -> Result<()> {
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
    .bind(title)
    .bind(author)
    .bind(instructions)
    .bind(rating)
    .bind(user_id)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    for (position, (quantity, unit, name)) in ingredients.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO ingredients (guid, recipe_id, quantity, unit, name, position)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&recipe_id)
        .bind(quantity)
        .bind(unit)
        .bind(name)
        .bind(position as i64)
        .execute(&mut *tx)
        .await?;
    }

    for label_name in label_names {
        let label_id: Option<String> = sqlx::query_scalar("SELECT guid FROM labels WHERE name = ?")
            .bind(label_name)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(label_id) = label_id {
            sqlx::query(
                "INSERT OR IGNORE INTO recipe_labels (recipe_id, label_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(&recipe_id)
            .bind(&label_id)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
