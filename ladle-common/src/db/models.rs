//! Database models

use serde::{Deserialize, Serialize};

/// A registered account. `password_hash`/`password_salt` are `None` for
/// accounts provisioned by an external identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub guid: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub password_salt: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub guid: String,
    pub title: String,
    pub author: String,
    pub instructions: String,
    pub rating: i64,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Exclusively owned by one recipe; rows live and die with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub guid: String,
    pub recipe_id: String,
    pub quantity: f64,
    pub unit: String,
    pub name: String,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub guid: String,
    pub name: String,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Many-to-many link between a recipe and a label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLabel {
    pub recipe_id: String,
    pub label_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
