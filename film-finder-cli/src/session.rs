//! The interactive session: main menu, search flows and pagination.

use std::io::{self, BufRead, Write};

use film_finder_core::{
    DEFAULT_PER_PAGE, MenuChoice, PageAction, SearchQuery, TOP_QUERY_LIMIT, current_year,
};
use film_finder_db::{CatalogBackend, CatalogReader, QueryLogStore};

use crate::error::CliError;
use crate::{present, prompt};

/// Which stores closed cleanly when a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Shutdown {
    pub(crate) catalog_closed: bool,
    pub(crate) query_log_closed: bool,
}

/// One run of the menu loop over a catalog reader and a query log.
///
/// Owns both stores for its whole lifetime and closes each exactly once
/// when the user quits.
pub(crate) struct Session<B, R, W> {
    catalog: CatalogReader<B>,
    query_log: QueryLogStore,
    input: R,
    out: W,
    per_page: u32,
    current_year: i32,
}

impl<B: CatalogBackend, R: BufRead, W: Write> Session<B, R, W> {
    pub(crate) fn new(catalog: CatalogReader<B>, query_log: QueryLogStore, input: R, out: W) -> Self {
        Self {
            catalog,
            query_log,
            input,
            out,
            per_page: DEFAULT_PER_PAGE,
            current_year: current_year(),
        }
    }

    pub(crate) fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Upper bound for accepted years; defaults to the clock's year.
    #[cfg(test)]
    pub(crate) fn current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Run until the user quits (or input ends), then close both stores.
    ///
    /// A failed close is reported on the console and in the returned
    /// [`Shutdown`], but does not fail the session.
    pub(crate) fn run(mut self) -> Result<Shutdown, CliError> {
        let outcome = self.menu_loop();

        let Self {
            catalog,
            query_log,
            mut out,
            ..
        } = self;
        let catalog_closed = match catalog.close() {
            Ok(()) => true,
            Err(e) => {
                present::report_error(&mut out, &e)?;
                false
            }
        };
        let query_log_closed = match query_log.close() {
            Ok(()) => true,
            Err(e) => {
                present::report_error(&mut out, &e)?;
                false
            }
        };
        out.flush()?;

        outcome?;
        Ok(Shutdown {
            catalog_closed,
            query_log_closed,
        })
    }

    fn menu_loop(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{}", present::MAIN_MENU)?;
            match prompt::read_menu_choice(&mut self.input, &mut self.out)? {
                Some(MenuChoice::Keyword) => self.keyword_flow()?,
                Some(MenuChoice::GenreYear) => self.genre_year_flow()?,
                Some(MenuChoice::TopQueries) => self.top_queries_flow()?,
                Some(MenuChoice::Quit) => return Ok(()),
                None => {}
            }
        }
    }

    fn keyword_flow(&mut self) -> io::Result<()> {
        match prompt::read_keyword(&mut self.input, &mut self.out)? {
            Some(keyword) => self.search_and_paginate(SearchQuery::Keyword(keyword)),
            None => Ok(()),
        }
    }

    fn genre_year_flow(&mut self) -> io::Result<()> {
        match prompt::read_genre_year(&mut self.input, &mut self.out, self.current_year)? {
            Some((genre, year)) => self.search_and_paginate(SearchQuery::GenreYear { genre, year }),
            None => Ok(()),
        }
    }

    fn top_queries_flow(&mut self) -> io::Result<()> {
        let shown = match self.query_log.top_queries(TOP_QUERY_LIMIT) {
            Ok(stats) => present::render_popular(&mut self.out, &stats, 1)?,
            Err(e) => {
                present::report_error(&mut self.out, &e)?;
                false
            }
        };
        if !shown {
            writeln!(self.out, "{}", present::NO_POPULAR_QUERIES)?;
        }
        Ok(())
    }

    /// Log the query, then show pages until one comes back empty or the
    /// user stops.
    ///
    /// A query that can't be logged is not searched.
    fn search_and_paginate(&mut self, query: SearchQuery) -> io::Result<()> {
        if let Err(e) = self.query_log.record(&query.log_text()) {
            return present::report_error(&mut self.out, &e);
        }

        let mut page = 1;
        loop {
            let rows = match self.catalog.search(&query, page, self.per_page) {
                Ok(rows) => rows,
                Err(e) => {
                    present::report_error(&mut self.out, &e)?;
                    Vec::new()
                }
            };
            if !present::render_rows(&mut self.out, &rows, page, query.has_description())? {
                writeln!(self.out, "{}", present::NOTHING_TO_DISPLAY)?;
                return Ok(());
            }
            match prompt::read_page_action(&mut self.input, &mut self.out)? {
                PageAction::Next => page += 1,
                PageAction::Quit => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
