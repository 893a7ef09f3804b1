use thiserror::Error;

/// Errors that stop the CLI outright.
///
/// Search and query-log failures during a session are reported and
/// swallowed by the session itself; only these reach `main`.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Console I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The query log could not be opened at start-up
    #[error("Query log error: {0}")]
    QueryLog(String),
}

impl CliError {
    pub(crate) fn query_log(msg: impl Into<String>) -> Self {
        Self::QueryLog(msg.into())
    }
}
