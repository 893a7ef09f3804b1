//! SQLite schema for the query log.

use std::path::Path;

use rusqlite::Connection;

use crate::error::SearchError;

/// Name of the query-log table.
pub const QUERY_LOG_TABLE: &str = "popular_queries";

/// Create the query-log table if it doesn't exist.
///
/// Idempotent, safe to run on every start-up.
pub fn create_schema(conn: &Connection) -> Result<(), SearchError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open or create a query-log database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SearchError> {
    let conn = Connection::open(path)?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory query-log database. Useful for testing.
pub fn open_memory() -> Result<Connection, SearchError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, SearchError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS popular_queries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;
