use crate::error::SetupError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::fs;
use std::path::Path;

/// Create the database file at `db_file` and apply `ddl` in one transaction.
///
/// On any error the transaction rolls back and the just-created file is
/// removed, so a failed run leaves no zero-byte or half-initialized database
/// behind. The connection is closed on every path before returning.
pub async fn create_database(db_file: &Path, ddl: &str) -> Result<(), SetupError> {
    let options = SqliteConnectOptions::new()
        .filename(db_file)
        .create_if_missing(true);
    let mut conn = options.connect().await?;

    let applied = apply_ddl(&mut conn, ddl).await;
    let closed = conn.close().await;

    if let Err(e) = applied {
        let _ = fs::remove_file(db_file);
        return Err(e);
    }
    closed?;
    Ok(())
}

/// Execute each statement of the bundled DDL inside a single transaction.
/// SQLite accepts multi-command scripts but `sqlx::query` does not, so the
/// script is split on `;`. Dropping the transaction on error rolls it back.
async fn apply_ddl(conn: &mut SqliteConnection, ddl: &str) -> Result<(), SetupError> {
    let mut tx = conn.begin().await?;
    for stmt in ddl.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
