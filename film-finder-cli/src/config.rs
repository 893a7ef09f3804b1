//! Catalog connection settings from the environment.
//!
//! `main` loads `.env` (if present) before anything reads these.

use film_finder_db::{MySqlConfig, SearchError};

/// Name of the catalog database on the MySQL server.
pub(crate) const CATALOG_DATABASE: &str = "sakila";

/// Default MySQL port when `port` is unset.
pub(crate) const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Default query-log file, relative to the working directory.
pub(crate) const DEFAULT_QUERY_LOG: &str = "sqlite_edit.db";

/// Build the MySQL settings from the process environment.
pub(crate) fn mysql_config_from_env() -> Result<MySqlConfig, SearchError> {
    mysql_config_from(|key| std::env::var(key).ok())
}

/// Build the MySQL settings from an arbitrary variable lookup.
///
/// Reads `host`, `user`, `password` and `port`. Without a host or user
/// there is nothing to connect to, which is reported as a connectivity
/// failure.
pub(crate) fn mysql_config_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<MySqlConfig, SearchError> {
    let required = |key: &str| {
        lookup(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SearchError::connectivity(format!("environment variable `{key}` is not set")))
    };

    let host = required("host")?;
    let user = required("user")?;
    let password = lookup("password");
    let port = match lookup("port") {
        Some(raw) => raw.trim().parse().map_err(|_| {
            SearchError::connectivity(format!("environment variable `port` is not a port number: {raw}"))
        })?,
        None => DEFAULT_MYSQL_PORT,
    };

    Ok(MySqlConfig {
        host,
        port,
        user,
        password,
        database: CATALOG_DATABASE.to_string(),
    })
}
