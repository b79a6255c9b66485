//! Error types for the change model.

use thiserror::Error;

use crate::range::TextRange;

/// Errors raised by range construction, validation and apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// Range bounds are inverted (end before start)
    #[error("invalid range: end {end} is before start {start}")]
    InvalidRange { start: usize, end: usize },

    /// Range does not fit inside the text it was checked against
    #[error("range {range} is outside original text of length {text_len}")]
    RangeOutOfBounds { range: TextRange, text_len: usize },

    /// Range boundary would split a UTF-8 code point
    #[error("range {range} does not fall on character boundaries of the original text")]
    NotOnCharBoundary { range: TextRange },

    /// Two changes, sorted by start, cover overlapping spans
    #[error("overlapping changes: {first_id} {first_range} and {second_id} {second_range}")]
    OverlappingChanges {
        first_id: String,
        first_range: TextRange,
        second_id: String,
        second_range: TextRange,
    },
}

/// Result type for change model operations.
pub type Result<T> = std::result::Result<T, ChangeError>;
