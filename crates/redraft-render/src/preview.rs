//! Shared helpers for both renderers.

use redraft_core::segment_lines;

/// 1-based line number of a byte offset, counting `\n` terminators from the
/// start of the document. Linear scan; rendering is not a hot path.
pub(crate) fn line_of_offset(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset.min(text.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Lines of `text` with terminators stripped, capped at `max_lines`
/// (0 = unlimited). An empty text has no preview lines.
pub(crate) fn preview_lines(text: &str, max_lines: usize) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let lines = segment_lines(text);
    let cap = if max_lines == 0 {
        lines.len()
    } else {
        max_lines.min(lines.len())
    };
    lines[..cap].iter().map(|l| l.content()).collect()
}

/// Count of non-empty lines, used for the hunk header line counts.
pub(crate) fn count_nonempty_lines(text: &str) -> usize {
    preview_lines(text, 0)
        .into_iter()
        .filter(|l| !l.is_empty())
        .count()
}

/// Changes whose original slice and replacement are both empty or
/// whitespace-only are rendering noise and are skipped.
pub(crate) fn is_noop(before: &str, after: &str) -> bool {
    before.trim().is_empty() && after.trim().is_empty()
}
