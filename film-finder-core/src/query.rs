//! Search requests and the rows they produce.

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchQuery {
    /// Substring match against film title or description.
    Keyword(String),
    /// Category substring match plus exact release year.
    GenreYear { genre: String, year: i32 },
}

impl SearchQuery {
    /// Text recorded in the query log for this search.
    ///
    /// Keyword searches log the keyword; genre/year searches log
    /// `"<genre> <year>"`, the same shape the user typed.
    pub fn log_text(&self) -> String {
        match self {
            Self::Keyword(keyword) => keyword.clone(),
            Self::GenreYear { genre, year } => format!("{genre} {year}"),
        }
    }

    /// Whether result rows for this search carry a description column.
    pub fn has_description(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }
}

/// One row of a search result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmSummaryRow {
    /// Position of the film in the title ordering of the whole result set,
    /// not within the page.
    pub number: i64,
    pub title: String,
    /// Only filled in by keyword searches.
    pub description: Option<String>,
    pub release_year: i64,
}

/// A persisted query-log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLogEntry {
    pub id: i64,
    pub query_text: String,
    pub created_at: String,
}

/// Aggregated occurrence count of one query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularQueryStat {
    pub query_text: String,
    pub occurrence_count: i64,
}
