use thiserror::Error;

/// Problems reading a grid structure or a word list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("grid template is empty")]
    EmptyTemplate,

    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {found:?} at row {row}, column {col}")]
    UnexpectedChar { row: usize, col: usize, found: char },

    #[error("entry {entry} extends outside the {height}x{width} grid")]
    EntryOutOfBounds {
        entry: usize,
        height: usize,
        width: usize,
    },

    #[error("more than two entries cross at row {row}, column {col}")]
    OvercrowdedCell { row: usize, col: usize },
}

/// Reasons a fill attempt stopped without deciding whether a solution exists.
///
/// Exhausting the search space is not an error; it is reported through
/// [`crate::FillResult::assignment`] being `None`.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("search visited {states} states without finishing (limit {limit})")]
    StateLimitExceeded { states: u64, limit: u64 },
}
