//! A single reviewable edit on the original text.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::range::TextRange;

/// Kind of edit a [`Change`] performs on the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Delete,
    Replace,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Insert => "Insert",
            ChangeKind::Delete => "Delete",
            ChangeKind::Replace => "Replace",
        };
        f.write_str(name)
    }
}

/// Reviewer verdict on a change: undecided, accepted, or rejected.
///
/// Always a three-variant enum, never a plain boolean; the renderer and
/// applier match on it exhaustively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl Acceptance {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Acceptance::Pending)
    }

    /// `Some(true)` for Accepted, `Some(false)` for Rejected, `None` while
    /// pending.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Acceptance::Pending => None,
            Acceptance::Accepted => Some(true),
            Acceptance::Rejected => Some(false),
        }
    }
}

/// A single edit anchored to the original text. The range and replacement
/// are fixed at construction; only the acceptance verdict changes, and only
/// through the owning [`Difference`](crate::Difference).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    id: String,
    kind: ChangeKind,
    range: TextRange,
    /// Replacement text for Insert/Replace; `None` for Delete.
    new_text: Option<String>,
    accepted: Acceptance,
}

impl Change {
    /// An insertion of `text` at byte offset `at` in the original.
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            kind: ChangeKind::Insert,
            range: TextRange::new(at, 0),
            new_text: Some(text.into()),
            accepted: Acceptance::Pending,
        }
    }

    /// A deletion of the original span `[start, start + len)`.
    pub fn delete(start: usize, len: usize) -> Self {
        Self {
            id: new_id(),
            kind: ChangeKind::Delete,
            range: TextRange::new(start, len),
            new_text: None,
            accepted: Acceptance::Pending,
        }
    }

    /// A replacement of the original span `[start, start + len)` by
    /// `new_text`.
    pub fn replace(start: usize, len: usize, new_text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            kind: ChangeKind::Replace,
            range: TextRange::new(start, len),
            new_text: Some(new_text.into()),
            accepted: Acceptance::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// First six characters of the id, as used in rendered output.
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(6)]
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Replacement text; empty for Delete.
    pub fn new_text(&self) -> &str {
        self.new_text.as_deref().unwrap_or("")
    }

    pub fn accepted(&self) -> Acceptance {
        self.accepted
    }

    /// The original text covered by this change's range.
    pub fn original_slice<'a>(&self, original: &'a str) -> Result<&'a str> {
        self.range.slice(original)
    }

    pub(crate) fn set_accepted(&mut self, accepted: Acceptance) {
        self.accepted = accepted;
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accepted = match self.accepted.as_bool() {
            Some(true) => "true",
            Some(false) => "false",
            None => "null",
        };
        write!(
            f,
            "{} id={} range={} accepted={}",
            self.kind, self.id, self.range, accepted
        )
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
