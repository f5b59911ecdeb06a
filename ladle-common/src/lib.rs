//! # Ladle Common Library
//!
//! Shared code for the Ladle recipe manager:
//! - Error taxonomy used across the service
//! - Database initialization, schema, and models
//! - Configuration loading and root folder resolution
//! - Credential hashing and session token generation
//! - Timestamp formatting helpers

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
