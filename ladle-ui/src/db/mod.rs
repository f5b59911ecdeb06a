//! Database operations for ladle-ui
//!
//! Free async functions over `&SqlitePool`, one module per entity. Schema
//! creation lives in `ladle_common::db::init`.

use ladle_common::Error;

pub mod labels;
pub mod recipes;
pub mod sessions;
pub mod users;

/// Map a unique-constraint violation to a caller-facing Conflict, leaving
/// every other database error untouched
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation {
            return Error::Conflict(message.to_string());
        }
    }
    Error::Database(err)
}
