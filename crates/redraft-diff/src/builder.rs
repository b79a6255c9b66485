//! Building a reviewable [`Difference`] from two versions of a document.

use redraft_core::{segment_lines, Change, Difference, Line};

use crate::coalesce::{coalesce, EditKind};
use crate::error::Result;
use crate::myers::shortest_edit_script;

/// Ceiling on the edit distance explored before a diff is refused.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 10_000;

/// Options for diff construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Maximum edit distance the engine searches before failing with
    /// [`DiffError::EditDistanceExceeded`](crate::DiffError::EditDistanceExceeded).
    /// `None` removes the ceiling and accepts the O((n+m)²) worst case.
    pub max_edit_distance: Option<usize>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_edit_distance: Some(DEFAULT_MAX_EDIT_DISTANCE),
        }
    }
}

/// Compute the line-level changes transforming `original` into `updated`.
///
/// Lines are compared by value, terminators included; each resulting change
/// is anchored to the byte range of the consumed original lines. The kind
/// follows the spans: an aggregate with an empty original span is an
/// Insert, one with an empty replacement is a Delete, and one with both
/// sides non-empty is a Replace. Aggregates that touch nothing are dropped.
pub fn line_changes(
    original: &str,
    updated: &str,
    options: &DiffOptions,
) -> Result<Vec<Change>> {
    let a = segment_lines(original);
    let b = segment_lines(updated);
    let a_texts: Vec<&str> = a.iter().map(|l| l.text()).collect();
    let b_texts: Vec<&str> = b.iter().map(|l| l.text()).collect();

    let script = shortest_edit_script(&a_texts, &b_texts, options.max_edit_distance)?;

    let mut changes = Vec::new();
    for edit in coalesce(&script) {
        if edit.kind == EditKind::Equal {
            continue;
        }
        let (start, end) = original_span(&a, original.len(), edit.a_start, edit.a_end);
        let new_text = concat_lines(&b, edit.b_start, edit.b_end);
        match (end > start, !new_text.is_empty()) {
            (false, false) => {} // consumed nothing on either side
            (false, true) => changes.push(Change::insert(start, new_text)),
            (true, false) => changes.push(Change::delete(start, end - start)),
            (true, true) => changes.push(Change::replace(start, end - start, new_text)),
        }
    }
    Ok(changes)
}

/// Compute the line diff between `original` and `updated` and append the
/// resulting changes to `diff`, validating the whole set afterwards.
pub fn build_line_diff(
    diff: &Difference,
    original: &str,
    updated: &str,
    options: &DiffOptions,
) -> Result<()> {
    let changes = line_changes(original, updated, options)?;
    tracing::debug!(
        file = diff.file_path(),
        changes = changes.len(),
        "built line diff"
    );
    diff.add(changes);
    diff.validate_against(original)?;
    Ok(())
}

/// Map the consumed A-line index range to a byte span of the original
/// text. An empty index range positions at the start of line `a_start`, or
/// at end-of-text for a trailing insert past the last line.
fn original_span(lines: &[Line<'_>], text_len: usize, a_start: usize, a_end: usize) -> (usize, usize) {
    if a_start >= a_end {
        let at = match lines.get(a_start) {
            Some(line) => line.start(),
            None => text_len,
        };
        return (at, at);
    }
    (lines[a_start].start(), lines[a_end - 1].end())
}

fn concat_lines(lines: &[Line<'_>], b_start: usize, b_end: usize) -> String {
    lines[b_start..b_end]
        .iter()
        .map(|l| l.text())
        .collect()
}
