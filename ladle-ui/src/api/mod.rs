//! HTTP API handlers for ladle-ui

pub mod auth;
pub mod error;
pub mod health;
pub mod labels;
pub mod profile;
pub mod recipes;

pub use auth::{login, logout, register};
pub use health::health_check;
pub use labels::{create_label, delete_label, get_label, list_labels, recipes_by_label, update_label};
pub use profile::{get_profile, my_recipes, update_profile};
pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};
