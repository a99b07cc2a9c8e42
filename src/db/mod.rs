//! Database module: schema and one-shot creation for the book catalog.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for the `books` table (SQLite)
//! - `sqlite.rs`: create-and-commit routine with rollback-and-delete on failure

pub mod schema;
pub mod sqlite;

pub use schema::SQLITE_INIT;
pub use sqlite::create_database;
