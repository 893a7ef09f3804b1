//! Domain types and input rules for the film catalog search tool.
//!
//! Nothing in this crate touches a database or the console; the stores live
//! in `film-finder-db` and the interactive loop in `film-finder-cli`.

pub mod error;
pub mod menu;
pub mod query;
pub mod validate;

pub use error::{ErrorKind, ValidationError};
pub use menu::{MenuChoice, PageAction};
pub use query::{FilmSummaryRow, PopularQueryStat, QueryLogEntry, SearchQuery};
pub use validate::{
    FORBIDDEN_KEYWORD_CHARS, MIN_KEYWORD_LEN, MIN_YEAR, current_year, page_offset,
    parse_genre_year, parse_keyword,
};

/// Number of rows shown per result page unless configured otherwise.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Size of the popular-queries report.
pub const TOP_QUERY_LIMIT: usize = 5;
