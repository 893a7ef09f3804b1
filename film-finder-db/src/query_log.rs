//! Local record of every search the user has issued.

use std::path::Path;

use film_finder_core::{PopularQueryStat, QueryLogEntry};
use rusqlite::{Connection, params};

use crate::error::SearchError;
use crate::schema;

/// Append-only query log backed by a SQLite file.
///
/// Independent of the catalog connection: a query is logged in its own
/// statement, never in a transaction shared with the search it precedes.
pub struct QueryLogStore {
    conn: Connection,
}

impl QueryLogStore {
    /// Open (creating if needed) the log at `path` and make sure its table
    /// exists.
    pub fn open(path: &Path) -> Result<Self, SearchError> {
        let conn = schema::open_database(path)?;
        log::debug!("Query log opened at {}", path.display());
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory log.
    pub fn open_memory() -> Result<Self, SearchError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    /// Wrap an existing connection, creating the table if it's missing.
    pub fn from_connection(conn: Connection) -> Result<Self, SearchError> {
        schema::create_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Create the log table if absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), SearchError> {
        schema::create_schema(&self.conn)
    }

    /// Append one query; the timestamp is assigned by the database.
    /// Returns the new row id.
    pub fn record(&self, query_text: &str) -> Result<i64, SearchError> {
        self.conn.execute(
            "INSERT INTO popular_queries (query) VALUES (?1)",
            params![query_text],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("Recorded query #{id}: {query_text:?}");
        Ok(id)
    }

    /// The `limit` most frequent query texts, most frequent first.
    ///
    /// Texts are grouped exactly (case-sensitive). Equal counts are ordered
    /// by query text.
    pub fn top_queries(&self, limit: usize) -> Result<Vec<PopularQueryStat>, SearchError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT query, COUNT(query) AS count
             FROM popular_queries
             GROUP BY query
             ORDER BY count DESC, query ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok(PopularQueryStat {
                query_text: row.get(0)?,
                occurrence_count: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Every logged query, oldest first.
    pub fn entries(&self) -> Result<Vec<QueryLogEntry>, SearchError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, query, CAST(created_at AS TEXT)
             FROM popular_queries
             ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(QueryLogEntry {
                id: row.get(0)?,
                query_text: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<(), SearchError> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}
