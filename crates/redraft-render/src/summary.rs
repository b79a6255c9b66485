//! Compact model-facing rendering.
//!
//! The output framing (`before<<<` / `>>>` / `enddiff`) is a contract that
//! automated consumers parse against; every byte of it is pinned by the
//! tests below.

use std::fmt::Write as _;

use redraft_core::{Acceptance, Difference, Result};

use crate::preview::is_noop;
use crate::RenderOptions;

/// Render the difference as a line-oriented summary for an automated
/// reader: one metadata line per change followed by delimited literal
/// before/after blocks, terminated by `enddiff`.
pub fn to_model_summary(
    diff: &Difference,
    original: &str,
    options: &RenderOptions,
) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "diff file: {}", diff.file_path());

    for change in diff.filtered_changes(options.only_accepted, options.include_pending) {
        let before = change.original_slice(original)?;
        let after = change.new_text();
        if is_noop(before, after) {
            continue;
        }

        // Only a definitive accept reads as True; pending and rejected both
        // read False to the model.
        let accepted = if change.accepted() == Acceptance::Accepted {
            "True"
        } else {
            "False"
        };
        let _ = writeln!(
            out,
            "id={} kind={} accepted={} span={}:{}",
            change.short_id(),
            change.kind(),
            accepted,
            change.range().start(),
            change.range().len(),
        );
        out.push_str("before<<<\n");
        out.push_str(before);
        out.push_str("\n>>>\n");
        out.push_str("after<<<\n");
        out.push_str(after);
        out.push_str("\n>>>\n");
    }
    out.push_str("enddiff\n");
    Ok(out)
}
