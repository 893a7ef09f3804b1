use std::path::Path;

use film_finder_core::FilmSummaryRow;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags, params};

use super::{CatalogBackend, GENRE_YEAR_SEARCH_SQL, KEYWORD_SEARCH_SQL};
use crate::error::SearchError;

/// Catalog stored in a local SQLite file with the same three tables.
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Open an existing catalog file read-only.
    pub fn open(path: &Path) -> Result<Self, SearchError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| SearchError::connectivity(format!("{}: {e}", path.display())))?;
        Self::from_connection(conn)
    }

    /// Use an already-open connection (e.g. an in-memory fixture).
    pub fn from_connection(conn: Connection) -> Result<Self, SearchError> {
        register_unicode_lower(&conn)?;
        Ok(Self { conn })
    }
}

/// Replace SQLite's ASCII-only `LOWER()` with full Unicode lower-casing, so
/// `LOWER(column) LIKE ?` agrees with patterns built by `like_pattern`.
fn register_unicode_lower(conn: &Connection) -> Result<(), SearchError> {
    conn.create_scalar_function(
        "lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

impl CatalogBackend for SqliteCatalog {
    fn keyword_page(
        &mut self,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        let mut stmt = self.conn.prepare(KEYWORD_SEARCH_SQL)?;
        let rows = stmt.query_map(params![pattern, pattern, limit, offset], |row| {
            Ok(FilmSummaryRow {
                number: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                release_year: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn genre_year_page(
        &mut self,
        pattern: &str,
        year: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        let mut stmt = self.conn.prepare(GENRE_YEAR_SEARCH_SQL)?;
        let rows = stmt.query_map(params![pattern, year, limit, offset], |row| {
            Ok(FilmSummaryRow {
                number: row.get(0)?,
                title: row.get(1)?,
                description: None,
                release_year: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn close(self) -> Result<(), SearchError> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
