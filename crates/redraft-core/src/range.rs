//! Half-open byte ranges over an original text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChangeError, Result};

/// A half-open byte interval `[start, start + len)` over the original text.
///
/// Offsets are 0-based byte offsets into the original file content. A range
/// is an immutable value; it never refers to the updated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    start: usize,
    len: usize,
}

impl TextRange {
    /// Create a range from a start offset and a length.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Create a range from inclusive start and exclusive end offsets.
    pub fn from_bounds(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(ChangeError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            len: end - start,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check that the range lies inside `original` and that both bounds are
    /// UTF-8 character boundaries. Never clamps.
    pub fn ensure_inside(&self, original: &str) -> Result<()> {
        if self.start > original.len() || self.end() > original.len() {
            return Err(ChangeError::RangeOutOfBounds {
                range: *self,
                text_len: original.len(),
            });
        }
        if !original.is_char_boundary(self.start) || !original.is_char_boundary(self.end()) {
            return Err(ChangeError::NotOnCharBoundary { range: *self });
        }
        Ok(())
    }

    /// Slice `original` to this range, after bounds checking.
    pub fn slice<'a>(&self, original: &'a str) -> Result<&'a str> {
        self.ensure_inside(original)?;
        Ok(&original[self.start..self.end()])
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end())
    }
}
