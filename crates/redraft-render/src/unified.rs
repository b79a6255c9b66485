//! Unified-diff-style rendering for human review.

use std::fmt::Write as _;

use redraft_core::{Difference, Result};

use crate::preview::{count_nonempty_lines, is_noop, line_of_offset, preview_lines};
use crate::RenderOptions;

/// Render the difference as a unified-diff-style view: `--- a/` / `+++ b/`
/// file headers, then one hunk per change carrying its kind, short id and
/// acceptance, followed by `- ` and `+ ` prefixed preview lines. A textual
/// superset of classic unified diff; not guaranteed patch-tool-compatible.
pub fn to_unified_diff(
    diff: &Difference,
    original: &str,
    options: &RenderOptions,
) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "--- a/{}", diff.file_path());
    let _ = writeln!(out, "+++ b/{}", diff.file_path());

    for change in diff.filtered_changes(options.only_accepted, options.include_pending) {
        let before = change.original_slice(original)?;
        let after = change.new_text();
        if is_noop(before, after) {
            continue;
        }

        let start_line = line_of_offset(original, change.range().start());
        let accepted = match change.accepted().as_bool() {
            Some(true) => "true",
            Some(false) => "false",
            None => "null",
        };
        let _ = writeln!(
            out,
            "@@ -{},{} +{},{} @@ {} id={} accepted={}",
            start_line,
            count_nonempty_lines(before),
            start_line,
            count_nonempty_lines(after),
            change.kind(),
            change.short_id(),
            accepted,
        );
        for line in preview_lines(before, options.max_preview_lines) {
            let _ = writeln!(out, "- {line}");
        }
        for line in preview_lines(after, options.max_preview_lines) {
            let _ = writeln!(out, "+ {line}");
        }
    }
    Ok(out)
}
