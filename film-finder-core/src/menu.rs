//! Tokens accepted at the main menu and the pagination prompt.

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// `1`: search by keyword.
    Keyword,
    /// `2`: search by genre and year.
    GenreYear,
    /// `3`: show the most frequent queries.
    TopQueries,
    /// `q`: leave the program.
    Quit,
}

impl MenuChoice {
    /// Interpret one line of menu input. Unknown input yields `None` and is
    /// meant to be ignored by the caller.
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(Self::Keyword),
            "2" => Some(Self::GenreYear),
            "3" => Some(Self::TopQueries),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// An answer at the pagination prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Next,
    Quit,
}

impl PageAction {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" => Some(Self::Next),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}
