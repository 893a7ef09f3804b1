//! Acceptance rules for raw user input.
//!
//! These functions are the non-interactive half of input validation: each
//! call judges one line. The retry loop around them lives in the CLI.

use chrono::Datelike;

use crate::error::ValidationError;

/// Characters that may never appear in a keyword. Most are SQL `LIKE` or
/// regex metacharacters.
pub const FORBIDDEN_KEYWORD_CHARS: &[char] = &[
    '.', '^', '$', '*', '&', '+', '?', '{', '}', '%', '[', ']', '|', '(', ')',
];

/// Shortest keyword accepted, in characters.
pub const MIN_KEYWORD_LEN: usize = 2;

/// Earliest release year accepted in a genre/year search.
pub const MIN_YEAR: i32 = 1900;

/// The exit token accepted at every prompt.
const EXIT_TOKEN: &str = "q";

/// Calendar year according to the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case(EXIT_TOKEN)
}

/// Judge one line of keyword input.
///
/// Returns `Ok(None)` when the user asked to leave (`q`), `Ok(Some(keyword))`
/// with surrounding whitespace removed when the keyword is acceptable.
pub fn parse_keyword(raw: &str) -> Result<Option<String>, ValidationError> {
    let keyword = raw.trim();
    if is_exit(keyword) {
        return Ok(None);
    }
    if keyword.chars().count() < MIN_KEYWORD_LEN {
        return Err(ValidationError::KeywordTooShort);
    }
    if keyword.contains(FORBIDDEN_KEYWORD_CHARS) {
        return Err(ValidationError::InvalidCharacters);
    }
    if !keyword.chars().all(char::is_alphanumeric) {
        return Err(ValidationError::NotAlphanumeric);
    }
    Ok(Some(keyword.to_string()))
}

/// Judge one line of `"<genre> <year>"` input against `current_year` as the
/// upper bound for the year.
///
/// Returns `Ok(None)` on `q`. The two parts must be separated by exactly one
/// space.
pub fn parse_genre_year(
    raw: &str,
    current_year: i32,
) -> Result<Option<(String, i32)>, ValidationError> {
    let input = raw.trim();
    if is_exit(input) {
        return Ok(None);
    }

    let parts: Vec<&str> = input.split(' ').collect();
    let [genre, year] = parts.as_slice() else {
        return Err(ValidationError::GenreYearFormat);
    };

    if !genre.is_empty() && genre.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::GenreNumeric);
    }
    if genre.is_empty() || !genre.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::GenreNotLetters);
    }

    let out_of_range = ValidationError::YearOutOfRange {
        min: MIN_YEAR,
        max: current_year,
    };
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(out_of_range);
    }
    // All digits, so a parse failure can only be overflow.
    let year: i32 = year.parse().map_err(|_| out_of_range.clone())?;
    if !(MIN_YEAR..=current_year).contains(&year) {
        return Err(out_of_range);
    }

    Ok(Some((genre.to_string(), year)))
}

/// Row offset of a 1-based `page` holding `per_page` rows.
pub fn page_offset(page: u32, per_page: u32) -> Result<i64, ValidationError> {
    if page < 1 || per_page < 1 {
        return Err(ValidationError::InvalidPage);
    }
    Ok(i64::from(page - 1) * i64::from(per_page))
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
