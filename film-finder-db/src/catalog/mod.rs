//! Read-only searches against the film catalog.
//!
//! The catalog schema (`film`, `film_category`, `category`) is owned by
//! someone else; this module only reads it, always through parameterized
//! statements. Both backends run the same SQL text.

pub mod mysql;
pub mod sqlite;

use film_finder_core::{FilmSummaryRow, SearchQuery, ValidationError, page_offset};

use crate::error::SearchError;

pub use mysql::{MySqlCatalog, MySqlConfig};
pub use sqlite::SqliteCatalog;

/// Keyword search. Parameters: title pattern, description pattern, limit,
/// offset.
///
/// `num` is computed over the whole matching set before `LIMIT`/`OFFSET`
/// apply, so numbering continues across pages instead of restarting at 1.
pub const KEYWORD_SEARCH_SQL: &str = "
SELECT CAST(ROW_NUMBER() OVER (ORDER BY title) AS SIGNED) AS num,
       title,
       description,
       CAST(release_year AS SIGNED) AS release_year
FROM film
WHERE LOWER(title) LIKE ? OR LOWER(description) LIKE ?
ORDER BY num
LIMIT ? OFFSET ?";

/// Genre and year search. Parameters: category pattern, year, limit, offset.
pub const GENRE_YEAR_SEARCH_SQL: &str = "
SELECT CAST(ROW_NUMBER() OVER (ORDER BY f.title) AS SIGNED) AS num,
       f.title,
       CAST(f.release_year AS SIGNED) AS release_year
FROM film f
JOIN film_category fc ON fc.film_id = f.film_id
JOIN category c ON c.category_id = fc.category_id
WHERE LOWER(c.name) LIKE ? AND f.release_year = ?
ORDER BY num
LIMIT ? OFFSET ?";

/// A database able to run the two catalog searches.
pub trait CatalogBackend {
    /// Run [`KEYWORD_SEARCH_SQL`] with `pattern` for both title and
    /// description.
    fn keyword_page(
        &mut self,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError>;

    /// Run [`GENRE_YEAR_SEARCH_SQL`].
    fn genre_year_page(
        &mut self,
        pattern: &str,
        year: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError>;

    /// Release the connection.
    fn close(self) -> Result<(), SearchError>
    where
        Self: Sized;
}

/// `%text%` with the text lower-cased, for `LOWER(column) LIKE ?`.
pub fn like_pattern(text: &str) -> String {
    format!("%{}%", text.to_lowercase())
}

/// Paginated film searches over a catalog connection made once, up front.
///
/// If that connection could not be made the reader stays usable as a value
/// but every search fails with a connectivity error; it never reconnects.
pub struct CatalogReader<B> {
    backend: Option<B>,
    unavailable_reason: String,
}

impl<B: CatalogBackend> CatalogReader<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
            unavailable_reason: String::new(),
        }
    }

    /// A reader with no connection behind it.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: None,
            unavailable_reason: reason.into(),
        }
    }

    /// Build a reader from the outcome of a connection attempt, logging
    /// either way.
    pub fn from_connect(result: Result<B, SearchError>) -> Self {
        match result {
            Ok(backend) => {
                log::info!("Connection successful.");
                Self::new(backend)
            }
            Err(e) => {
                log::error!("Error connecting to the database: {e}");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&mut self) -> Result<&mut B, SearchError> {
        let reason = &self.unavailable_reason;
        self.backend.as_mut().ok_or_else(|| {
            SearchError::connectivity(format!("no catalog connection ({reason})"))
        })
    }

    /// One page of films whose title or description contains `keyword`,
    /// case-insensitively.
    pub fn search_by_keyword(
        &mut self,
        keyword: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        if keyword.chars().count() < film_finder_core::MIN_KEYWORD_LEN {
            return Err(ValidationError::KeywordTooShort.into());
        }
        let offset = page_offset(page, per_page)?;
        let pattern = like_pattern(keyword);
        log::debug!("Keyword search {pattern:?}: page {page}, {per_page} per page, offset {offset}");
        self.backend()?
            .keyword_page(&pattern, i64::from(per_page), offset)
    }

    /// One page of films from a category whose name contains `genre`,
    /// released in exactly `year`.
    pub fn search_by_genre_year(
        &mut self,
        genre: &str,
        year: i32,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        if genre.trim().is_empty() || year == 0 {
            return Err(ValidationError::MissingGenreOrYear.into());
        }
        let offset = page_offset(page, per_page)?;
        let pattern = like_pattern(genre);
        log::debug!(
            "Genre search {pattern:?} in {year}: page {page}, {per_page} per page, offset {offset}"
        );
        self.backend()?
            .genre_year_page(&pattern, year, i64::from(per_page), offset)
    }

    /// Dispatch a validated query to the matching search.
    pub fn search(
        &mut self,
        query: &SearchQuery,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        match query {
            SearchQuery::Keyword(keyword) => self.search_by_keyword(keyword, page, per_page),
            SearchQuery::GenreYear { genre, year } => {
                self.search_by_genre_year(genre, *year, page, per_page)
            }
        }
    }

    /// Close the connection, if there is one.
    pub fn close(self) -> Result<(), SearchError> {
        if let Some(backend) = self.backend {
            backend.close()?;
            log::info!("Connection closed.");
        }
        Ok(())
    }
}
