use thiserror::Error;

/// Broad category of a failed operation.
///
/// Every fallible operation in the tool reports one of these; the console
/// layer decides how each category is phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad user input (too-short keyword, invalid genre or year, bad page).
    Validation,
    /// The database rejected or failed to execute a statement.
    Operational,
    /// No usable database handle.
    Connectivity,
    /// Anything else.
    Unexpected,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Operational => write!(f, "operational"),
            Self::Connectivity => write!(f, "connectivity"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Rejection of user-supplied search input.
///
/// The display text is what the user sees before being prompted again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Keyword is too short.")]
    KeywordTooShort,

    #[error("Invalid characters.")]
    InvalidCharacters,

    #[error("Keyword can only contain letters and digits.")]
    NotAlphanumeric,

    #[error("Enter genre and year separated by a space.")]
    GenreYearFormat,

    #[error("Genre must be alphabetic.")]
    GenreNumeric,

    #[error("Genre can only contain letters.")]
    GenreNotLetters,

    #[error("Incorrect year. Choose any from {min} until {max}")]
    YearOutOfRange { min: i32, max: i32 },

    #[error("No genre or year specified.")]
    MissingGenreOrYear,

    #[error("Page number and results per page should be greater than zero.")]
    InvalidPage,
}
