//! Content database bootstrap.
//!
//! # Responsibility
//! - Open the content store and register the SQL functions queries rely on.
//! - Bring the schema to the latest migration before any read.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Every handed-out connection has `contains_ci` registered.

mod error;
mod functions;
pub mod migrations;
mod open;

pub use error::{DbError, DbResult, DbTarget};
pub use functions::contains_ci;
pub use open::{open_db, open_db_in_memory};
