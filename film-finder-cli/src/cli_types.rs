//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use film_finder_core::DEFAULT_PER_PAGE;

use crate::config::DEFAULT_QUERY_LOG;

#[derive(Parser)]
#[command(name = "film-finder")]
#[command(about = "Search a film catalog by keyword or by genre and year", long_about = None)]
pub(crate) struct Cli {
    /// SQLite file the search history is kept in
    #[arg(long, env = "FILM_FINDER_QUERY_LOG", default_value = DEFAULT_QUERY_LOG)]
    pub query_log: PathBuf,

    /// Read the catalog from a local SQLite copy instead of MySQL
    #[arg(long)]
    pub catalog_sqlite: Option<PathBuf>,

    /// Number of films per result page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Only show warnings and errors in the log output
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}
