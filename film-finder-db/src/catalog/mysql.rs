use film_finder_core::FilmSummaryRow;
use sqlx::Connection;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection};
use tokio::runtime::Runtime;

use super::{CatalogBackend, GENRE_YEAR_SEARCH_SQL, KEYWORD_SEARCH_SQL};
use crate::error::SearchError;

/// Connection parameters for the MySQL catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

impl MySqlConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database)
            .charset("utf8mb4");
        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

/// A single MySQL connection, driven synchronously.
///
/// The connection is async (sqlx); a private current-thread runtime blocks
/// on each call so callers stay single-threaded.
pub struct MySqlCatalog {
    runtime: Runtime,
    conn: MySqlConnection,
}

type KeywordRow = (i64, String, Option<String>, i64);
type GenreYearRow = (i64, String, i64);

impl MySqlCatalog {
    /// Connect once. Any failure is a connectivity error.
    pub fn connect(config: &MySqlConfig) -> Result<Self, SearchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SearchError::unexpected(format!("Failed to create tokio runtime: {e}")))?;

        log::debug!(
            "Connecting to mysql://{}@{}:{}/{}",
            config.user,
            config.host,
            config.port,
            config.database
        );
        let conn = runtime
            .block_on(MySqlConnection::connect_with(&config.connect_options()))
            .map_err(|e| SearchError::connectivity(e.to_string()))?;

        Ok(Self { runtime, conn })
    }
}

impl CatalogBackend for MySqlCatalog {
    fn keyword_page(
        &mut self,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        let rows = self.runtime.block_on(
            sqlx::query_as::<MySql, KeywordRow>(KEYWORD_SEARCH_SQL)
                .bind(pattern)
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut self.conn),
        )?;
        Ok(rows
            .into_iter()
            .map(|(number, title, description, release_year)| FilmSummaryRow {
                number,
                title,
                description,
                release_year,
            })
            .collect())
    }

    fn genre_year_page(
        &mut self,
        pattern: &str,
        year: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        let rows = self.runtime.block_on(
            sqlx::query_as::<MySql, GenreYearRow>(GENRE_YEAR_SEARCH_SQL)
                .bind(pattern)
                .bind(year)
                .bind(limit)
                .bind(offset)
                .fetch_all(&mut self.conn),
        )?;
        Ok(rows
            .into_iter()
            .map(|(number, title, release_year)| FilmSummaryRow {
                number,
                title,
                description: None,
                release_year,
            })
            .collect())
    }

    fn close(self) -> Result<(), SearchError> {
        let Self { runtime, conn } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}
