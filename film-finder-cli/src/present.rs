//! Console rendering: menu, result tables and error messages.

use std::io::{self, Write};

use comfy_table::{Cell, Table, presets};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use film_finder_core::{ErrorKind, FilmSummaryRow, PopularQueryStat, ValidationError};
use film_finder_db::SearchError;

pub(crate) const MAIN_MENU: &str = "
Choose search-type:
1. Search by keyword
2. Search by genre and year
3. Top 5 search queries
q. Exit
";

/// Trailer after the last (empty) page of a search.
pub(crate) const NOTHING_TO_DISPLAY: &str = "Nothing to display.";
/// Trailer after an empty or failed popular-queries report.
pub(crate) const NO_POPULAR_QUERIES: &str = "No results found.";

fn grid() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL);
    table
}

fn no_results<W: Write>(out: &mut W) -> io::Result<bool> {
    writeln!(out, "{}", "No results.".if_supports_color(Stdout, |t| t.yellow()))?;
    Ok(false)
}

/// Print one page of search results.
///
/// Returns `false` (after saying so) when there is nothing to show, which
/// ends pagination. The description column is only drawn for searches
/// that produce one.
pub(crate) fn render_rows<W: Write>(
    out: &mut W,
    rows: &[FilmSummaryRow],
    page: u32,
    with_description: bool,
) -> io::Result<bool> {
    if rows.is_empty() {
        return no_results(out);
    }

    let mut table = grid();
    if with_description {
        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Title"),
            Cell::new("Description"),
            Cell::new("Year"),
        ]);
    } else {
        table.set_header(vec![Cell::new("#"), Cell::new("Title"), Cell::new("Year")]);
    }

    for row in rows {
        let mut cells = vec![Cell::new(row.number), Cell::new(&row.title)];
        if with_description {
            cells.push(Cell::new(row.description.as_deref().unwrap_or("")));
        }
        cells.push(Cell::new(row.release_year));
        table.add_row(cells);
    }

    writeln!(out)?;
    writeln!(out, "{}", format!("Page {page}").if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{table}")?;
    Ok(true)
}

/// Print the popular-queries report. Same contract as [`render_rows`].
pub(crate) fn render_popular<W: Write>(
    out: &mut W,
    stats: &[PopularQueryStat],
    page: u32,
) -> io::Result<bool> {
    if stats.is_empty() {
        return no_results(out);
    }

    let mut table = grid();
    table.set_header(vec![Cell::new("Popular queries"), Cell::new("Count")]);
    for stat in stats {
        table.add_row(vec![Cell::new(&stat.query_text), Cell::new(stat.occurrence_count)]);
    }

    writeln!(out)?;
    writeln!(out, "{}", format!("Page {page}").if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{table}")?;
    Ok(true)
}

/// Print a failed operation with the wording for its category.
pub(crate) fn report_error<W: Write>(out: &mut W, err: &SearchError) -> io::Result<()> {
    let prefix = match err.kind() {
        ErrorKind::Validation => "Validation error",
        ErrorKind::Operational => "Error executing SQL query",
        ErrorKind::Connectivity => "Error connecting to the database",
        ErrorKind::Unexpected => "Unexpected error",
    };
    log::debug!("{} failure: {err:?}", err.kind());
    writeln!(
        out,
        "{}: {}",
        prefix.if_supports_color(Stdout, |t| t.red()),
        err
    )
}

/// Print why a line of input was refused, before prompting again.
pub(crate) fn report_rejection<W: Write>(out: &mut W, err: &ValidationError) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".if_supports_color(Stdout, |t| t.yellow()), err)
}
