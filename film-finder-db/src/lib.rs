//! Storage for the film catalog search tool.
//!
//! Two independent resources: the read-only film catalog (MySQL, or a local
//! SQLite copy) and the SQLite query log. They share no connection and no
//! transaction.

pub mod catalog;
pub mod error;
pub mod query_log;
pub mod schema;

pub use catalog::{
    CatalogBackend, CatalogReader, GENRE_YEAR_SEARCH_SQL, KEYWORD_SEARCH_SQL, MySqlCatalog,
    MySqlConfig, SqliteCatalog, like_pattern,
};
pub use error::SearchError;
pub use query_log::QueryLogStore;
pub use schema::{open_database, open_memory};
