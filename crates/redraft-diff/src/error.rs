//! Error types for diff construction.

use thiserror::Error;

use redraft_core::ChangeError;

/// Errors that can occur while building a line diff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The shortest-edit-script search hit the configured ceiling; the
    /// inputs are too large or too dissimilar to diff within budget.
    #[error("edit distance exceeded the ceiling of {ceiling}; inputs are too dissimilar to diff within budget")]
    EditDistanceExceeded { ceiling: usize },

    /// The constructed change set failed validation against the original
    #[error(transparent)]
    Change(#[from] ChangeError),
}

/// Result type for diff construction.
pub type Result<T> = std::result::Result<T, DiffError>;
