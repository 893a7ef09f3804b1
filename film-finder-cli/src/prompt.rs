//! Interactive input collection.
//!
//! Each prompt owns its retry loop and returns only on acceptable input or
//! when the user leaves. End of input counts as leaving.

use std::io::{self, BufRead, Write};

use film_finder_core::{MenuChoice, PageAction, parse_genre_year, parse_keyword};

use crate::present;

pub(crate) const MENU_PROMPT: &str = "Enter 1, 2, 3 or 'q' to quit: ";
pub(crate) const KEYWORD_PROMPT: &str = "Enter a keyword or 'q' to exit: ";
pub(crate) const GENRE_YEAR_PROMPT: &str =
    "Enter genre and year separated by a space or 'q' to quit: ";
pub(crate) const PAGE_PROMPT: &str = "Enter 'n' for next or 'q' for exit: ";

/// Show `prompt` and read one line. `None` at end of input.
pub(crate) fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line))
}

/// Read a main-menu choice. Unrecognised input yields `None`.
pub(crate) fn read_menu_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<MenuChoice>> {
    match read_line(input, out, MENU_PROMPT)? {
        Some(line) => Ok(MenuChoice::from_input(&line)),
        None => Ok(Some(MenuChoice::Quit)),
    }
}

/// Ask for a keyword until one is acceptable. `None` if the user quit.
pub(crate) fn read_keyword<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<String>> {
    loop {
        let Some(line) = read_line(input, out, KEYWORD_PROMPT)? else {
            return Ok(None);
        };
        match parse_keyword(&line) {
            Ok(keyword) => return Ok(keyword),
            Err(e) => present::report_rejection(out, &e)?,
        }
    }
}

/// Ask for `"<genre> <year>"` until acceptable. `None` if the user quit.
pub(crate) fn read_genre_year<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    current_year: i32,
) -> io::Result<Option<(String, i32)>> {
    loop {
        let Some(line) = read_line(input, out, GENRE_YEAR_PROMPT)? else {
            return Ok(None);
        };
        match parse_genre_year(&line, current_year) {
            Ok(pair) => return Ok(pair),
            Err(e) => present::report_rejection(out, &e)?,
        }
    }
}

/// Ask whether to show the next page. Re-prompts on anything but n/q.
pub(crate) fn read_page_action<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<PageAction> {
    loop {
        let Some(line) = read_line(input, out, PAGE_PROMPT)? else {
            return Ok(PageAction::Quit);
        };
        match PageAction::from_input(&line) {
            Some(PageAction::Quit) => {
                writeln!(out, "Exit.")?;
                return Ok(PageAction::Quit);
            }
            Some(action) => return Ok(action),
            None => writeln!(out, "Invalid input. Enter 'n' or 'q'.")?,
        }
    }
}
