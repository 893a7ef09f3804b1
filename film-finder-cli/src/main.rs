//! film-finder CLI
//!
//! Interactive search over a film catalog, with a local log of every
//! search and a report of the most frequent ones.

mod cli_types;
mod config;
mod error;
mod logging;
mod present;
mod prompt;
mod session;

use std::io;

use clap::Parser;

use film_finder_db::{CatalogBackend, CatalogReader, MySqlCatalog, QueryLogStore, SqliteCatalog};

use crate::cli_types::Cli;
use crate::error::CliError;
use crate::session::Session;

fn main() {
    // Before parsing, so `.env` can supply env-backed arguments too.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let query_log = QueryLogStore::open(&cli.query_log).map_err(|e| {
        CliError::query_log(format!("cannot open {}: {e}", cli.query_log.display()))
    })?;

    match &cli.catalog_sqlite {
        Some(path) => {
            log::debug!("Using SQLite catalog at {}", path.display());
            let catalog = CatalogReader::from_connect(SqliteCatalog::open(path));
            run_session(catalog, query_log, cli.per_page)
        }
        None => {
            let connected = config::mysql_config_from_env().and_then(|c| MySqlCatalog::connect(&c));
            let catalog = CatalogReader::from_connect(connected);
            run_session(catalog, query_log, cli.per_page)
        }
    }
}

fn run_session<B: CatalogBackend>(
    catalog: CatalogReader<B>,
    query_log: QueryLogStore,
    per_page: u32,
) -> Result<(), CliError> {
    let shutdown = Session::new(catalog, query_log, io::stdin().lock(), io::stdout().lock())
        .per_page(per_page)
        .run()?;
    if !shutdown.catalog_closed {
        log::warn!("Catalog connection was not closed cleanly");
    }
    if !shutdown.query_log_closed {
        log::warn!("Query log was not closed cleanly");
    }
    Ok(())
}
