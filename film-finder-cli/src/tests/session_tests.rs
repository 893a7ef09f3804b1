use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use film_finder_core::{FilmSummaryRow, TOP_QUERY_LIMIT};
use film_finder_db::SearchError;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Keyword { pattern: String, limit: i64, offset: i64 },
    GenreYear { pattern: String, year: i32, limit: i64, offset: i64 },
}

#[derive(Default)]
struct Calls {
    requests: Vec<Request>,
    closed: u32,
}

/// Catalog of `total` films named "FILM nn" in title order, recording every
/// request it receives.
struct FakeCatalog {
    total: i64,
    fail_close: bool,
    calls: Rc<RefCell<Calls>>,
}

impl FakeCatalog {
    fn new(total: i64) -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (
            Self {
                total,
                fail_close: false,
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }

    fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    fn slice(&self, limit: i64, offset: i64, description: bool) -> Vec<FilmSummaryRow> {
        let last = (offset + limit).min(self.total);
        (offset + 1..=last)
            .map(|n| FilmSummaryRow {
                number: n,
                title: format!("FILM {n:02}"),
                description: description.then(|| format!("Story number {n}")),
                release_year: 2006,
            })
            .collect()
    }
}

impl CatalogBackend for FakeCatalog {
    fn keyword_page(
        &mut self,
        pattern: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        self.calls.borrow_mut().requests.push(Request::Keyword {
            pattern: pattern.to_string(),
            limit,
            offset,
        });
        Ok(self.slice(limit, offset, true))
    }

    fn genre_year_page(
        &mut self,
        pattern: &str,
        year: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FilmSummaryRow>, SearchError> {
        self.calls.borrow_mut().requests.push(Request::GenreYear {
            pattern: pattern.to_string(),
            year,
            limit,
            offset,
        });
        Ok(self.slice(limit, offset, false))
    }

    fn close(self) -> Result<(), SearchError> {
        self.calls.borrow_mut().closed += 1;
        if self.fail_close {
            return Err(SearchError::operational("disk I/O error"));
        }
        Ok(())
    }
}

/// Run a whole session over `script` and return its console output.
fn run_session(
    catalog: CatalogReader<FakeCatalog>,
    log_path: &Path,
    per_page: u32,
    script: &str,
) -> String {
    run_session_to_shutdown(catalog, log_path, per_page, script).0
}

/// Like [`run_session`], also returning how the stores closed.
fn run_session_to_shutdown(
    catalog: CatalogReader<FakeCatalog>,
    log_path: &Path,
    per_page: u32,
    script: &str,
) -> (String, Shutdown) {
    let query_log = QueryLogStore::open(log_path).unwrap();
    let mut out = Vec::new();
    let shutdown = Session::new(catalog, query_log, script.as_bytes(), &mut out)
        .per_page(per_page)
        .current_year(2024)
        .run()
        .unwrap();
    (String::from_utf8(out).unwrap(), shutdown)
}

fn logged_queries(log_path: &Path) -> Vec<String> {
    let store = QueryLogStore::open(log_path).unwrap();
    store
        .entries()
        .unwrap()
        .into_iter()
        .map(|e| e.query_text)
        .collect()
}

fn offsets(calls: &Rc<RefCell<Calls>>) -> Vec<i64> {
    calls
        .borrow()
        .requests
        .iter()
        .map(|r| match r {
            Request::Keyword { offset, .. } | Request::GenreYear { offset, .. } => *offset,
        })
        .collect()
}

#[test]
fn quit_closes_both_stores_once() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(30);

    let (text, shutdown) =
        run_session_to_shutdown(CatalogReader::new(catalog), &log_path, 10, "q\n");

    assert!(text.contains("Choose search-type:"));
    assert_eq!(
        shutdown,
        Shutdown {
            catalog_closed: true,
            query_log_closed: true,
        }
    );
    assert_eq!(calls.borrow().closed, 1);
    assert!(calls.borrow().requests.is_empty());
    // The log file was released and can be reopened.
    assert!(logged_queries(&log_path).is_empty());
}

#[test]
fn failed_catalog_close_is_reported_and_log_still_closes() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(5);

    let (text, shutdown) = run_session_to_shutdown(
        CatalogReader::new(catalog.failing_close()),
        &log_path,
        10,
        "1\ndr\nq\nq\n",
    );

    assert!(!shutdown.catalog_closed);
    assert!(shutdown.query_log_closed);
    assert_eq!(calls.borrow().closed, 1);
    assert!(text.contains("Error executing SQL query"));
    assert!(text.contains("disk I/O error"));
    assert_eq!(logged_queries(&log_path), vec!["dr"]);
}

#[test]
fn unavailable_catalog_has_nothing_to_close() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let catalog: CatalogReader<FakeCatalog> = CatalogReader::unavailable("connection refused");

    let (_, shutdown) = run_session_to_shutdown(catalog, &log_path, 10, "q\n");

    assert!(shutdown.catalog_closed);
    assert!(shutdown.query_log_closed);
}

#[test]
fn keyword_search_pages_forward() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(25);

    let text = run_session(
        CatalogReader::new(catalog),
        &log_path,
        10,
        "1\ndr\nn\nq\nq\n",
    );

    assert_eq!(
        calls.borrow().requests,
        vec![
            Request::Keyword {
                pattern: "%dr%".to_string(),
                limit: 10,
                offset: 0
            },
            Request::Keyword {
                pattern: "%dr%".to_string(),
                limit: 10,
                offset: 10
            },
        ]
    );
    assert!(text.contains("Page 1"));
    assert!(text.contains("Page 2"));
    assert!(text.contains("FILM 01"));
    assert!(text.contains("FILM 20"));
    assert!(!text.contains("FILM 21"));
    assert!(text.contains("Description"));
    assert!(text.contains("Exit."));
    assert_eq!(logged_queries(&log_path), vec!["dr"]);
    assert_eq!(calls.borrow().closed, 1);
}

#[test]
fn page_offsets_follow_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(100);

    run_session(
        CatalogReader::new(catalog),
        &log_path,
        7,
        "1\nalien\nn\nn\nq\nq\n",
    );

    assert_eq!(offsets(&calls), vec![0, 7, 14]);
}

#[test]
fn empty_page_stops_without_prompting() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(10);

    // After the empty second page the session is back at the menu, so the
    // next "q" quits the program rather than answering a page prompt.
    let text = run_session(CatalogReader::new(catalog), &log_path, 10, "1\ndr\nn\nq\n");

    assert_eq!(offsets(&calls), vec![0, 10]);
    assert_eq!(text.matches(prompt::PAGE_PROMPT).count(), 1);
    assert!(text.contains("No results."));
    assert_eq!(text.matches(present::NOTHING_TO_DISPLAY).count(), 1);
    assert_eq!(text.matches("Choose search-type:").count(), 2);
    assert_eq!(calls.borrow().closed, 1);
}

#[test]
fn invalid_keyword_reprompts() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(5);

    let text = run_session(
        CatalogReader::new(catalog),
        &log_path,
        10,
        "1\na\nab.c\nab%\ndr\nq\nq\n",
    );

    assert!(text.contains("Keyword is too short."));
    assert_eq!(text.matches("Invalid characters.").count(), 2);
    assert_eq!(offsets(&calls), vec![0]);
    // Rejected input never reaches the log.
    assert_eq!(logged_queries(&log_path), vec!["dr"]);
}

#[test]
fn keyword_prompt_quit_returns_to_menu() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(5);

    run_session(CatalogReader::new(catalog), &log_path, 10, "1\nq\nq\n");

    assert!(calls.borrow().requests.is_empty());
    assert!(logged_queries(&log_path).is_empty());
}

#[test]
fn genre_year_search() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(3);

    let text = run_session(
        CatalogReader::new(catalog),
        &log_path,
        10,
        "2\ndrama 1899\nDrama 2005\nq\nq\n",
    );

    assert!(text.contains("Incorrect year. Choose any from 1900 until 2024"));
    assert_eq!(
        calls.borrow().requests,
        vec![Request::GenreYear {
            pattern: "%drama%".to_string(),
            year: 2005,
            limit: 10,
            offset: 0
        }]
    );
    assert!(!text.contains("Description"));
    assert!(text.contains("FILM 03"));
    assert_eq!(logged_queries(&log_path), vec!["Drama 2005"]);
}

#[test]
fn top_queries_report() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    {
        let store = QueryLogStore::open(&log_path).unwrap();
        for text in ["drama 2005", "drama 2005", "dr"] {
            store.record(text).unwrap();
        }
        store.close().unwrap();
    }
    let (catalog, calls) = FakeCatalog::new(5);

    let text = run_session(CatalogReader::new(catalog), &log_path, 10, "3\nq\n");

    assert!(text.contains("Popular queries"));
    assert!(text.contains("drama 2005"));
    assert!(!text.contains(present::NO_POPULAR_QUERIES));
    assert!(!text.contains(prompt::PAGE_PROMPT));
    assert!(calls.borrow().requests.is_empty());
    // Viewing the report is not itself a query.
    assert_eq!(logged_queries(&log_path).len(), 3);
}

#[test]
fn searches_feed_top_queries() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, _calls) = FakeCatalog::new(0);

    let text = run_session(
        CatalogReader::new(catalog),
        &log_path,
        10,
        "2\ncomedy 2006\n2\ncomedy 2006\n1\nzorro\n3\nq\n",
    );

    let store = QueryLogStore::open(&log_path).unwrap();
    let top = store.top_queries(TOP_QUERY_LIMIT).unwrap();
    assert_eq!(top[0].query_text, "comedy 2006");
    assert_eq!(top[0].occurrence_count, 2);
    assert!(text.contains("Popular queries"));
}

#[test]
fn empty_top_queries_report() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, _calls) = FakeCatalog::new(5);

    let text = run_session(CatalogReader::new(catalog), &log_path, 10, "3\nq\n");

    assert!(text.contains("No results."));
    assert!(text.contains(present::NO_POPULAR_QUERIES));
    assert!(!text.contains("Popular queries"));
    assert!(!text.contains(present::NOTHING_TO_DISPLAY));
}

#[test]
fn unknown_menu_input_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(5);

    let text = run_session(CatalogReader::new(catalog), &log_path, 10, "x\n\n4\nq\n");

    assert_eq!(text.matches("Choose search-type:").count(), 4);
    assert!(!text.contains("Error"));
    assert!(!text.contains(present::NOTHING_TO_DISPLAY));
    assert_eq!(calls.borrow().closed, 1);
}

#[test]
fn invalid_page_answer_reprompts() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(30);

    let text = run_session(
        CatalogReader::new(catalog),
        &log_path,
        10,
        "1\ndr\nnext\nq\nq\n",
    );

    assert!(text.contains("Invalid input. Enter 'n' or 'q'."));
    assert_eq!(text.matches(prompt::PAGE_PROMPT).count(), 2);
    assert_eq!(offsets(&calls), vec![0]);
}

#[test]
fn unavailable_catalog_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let catalog: CatalogReader<FakeCatalog> = CatalogReader::unavailable("connection refused");

    let text = run_session(catalog, &log_path, 10, "1\ndr\n3\nq\n");

    assert!(text.contains("Error connecting to the database"));
    assert!(text.contains("connection refused"));
    assert!(text.contains("No results."));
    assert!(text.contains(present::NOTHING_TO_DISPLAY));
    // The query is logged before the search is attempted.
    assert_eq!(logged_queries(&log_path), vec!["dr"]);
    assert!(text.contains("Popular queries"));
}

#[test]
fn end_of_input_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.db");
    let (catalog, calls) = FakeCatalog::new(30);

    run_session(CatalogReader::new(catalog), &log_path, 10, "1\ndr\n");

    assert_eq!(offsets(&calls), vec![0]);
    assert_eq!(calls.borrow().closed, 1);
}
