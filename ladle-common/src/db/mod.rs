//! Database access layer
//!
//! Schema creation and shared row models. Entity-specific queries live in
//! the service crate next to the handlers that use them.

pub mod init;
pub mod models;
pub mod seed;
pub mod settings;

pub use init::init_database;
