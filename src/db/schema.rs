//! SQL DDL for initializing the book catalog.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT
/// - `available` stored as text (status flag, not a SQLite boolean)
/// - Timestamps stored as text; check-in/check-out are nullable
///
/// Executed only when the database file does not exist yet, so no
/// `IF NOT EXISTS` guard: file presence is the existence check.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    available TEXT NOT NULL,
    date_created TEXT NOT NULL,
    check_in_date TEXT,
    check_out_date TEXT
);
"#;
