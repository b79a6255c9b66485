//! Coalescing of unit edits into maximal spans.

use crate::myers::{RawEdit, RawEditKind};

/// A maximal aggregate span of the edit script, covering the index ranges
/// `[a_start, a_end)` in the original sequence and `[b_start, b_end)` in
/// the updated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edit {
    pub kind: EditKind,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// Merge runs of unit edits: consecutive Equal units collapse into one
/// Equal span, and every run of adjacent non-Equal units collapses into a
/// single aggregate classified by what it consumed — Delete if only
/// A-lines, Insert if only B-lines, Replace if both.
pub(crate) fn coalesce(edits: &[RawEdit]) -> Vec<Edit> {
    let mut result = Vec::new();
    let mut i = 0;
    while i < edits.len() {
        let first = edits[i];
        if first.kind == RawEditKind::Equal {
            let mut j = i + 1;
            while j < edits.len() && edits[j].kind == RawEditKind::Equal {
                j += 1;
            }
            result.push(Edit {
                kind: EditKind::Equal,
                a_start: first.a_start,
                a_end: edits[j - 1].a_end,
                b_start: first.b_start,
                b_end: edits[j - 1].b_end,
            });
            i = j;
            continue;
        }

        let mut has_delete = first.kind == RawEditKind::Delete;
        let mut has_insert = first.kind == RawEditKind::Insert;
        let mut j = i + 1;
        while j < edits.len() && edits[j].kind != RawEditKind::Equal {
            has_delete |= edits[j].kind == RawEditKind::Delete;
            has_insert |= edits[j].kind == RawEditKind::Insert;
            j += 1;
        }
        let kind = match (has_delete, has_insert) {
            (true, true) => EditKind::Replace,
            (true, false) => EditKind::Delete,
            (false, _) => EditKind::Insert,
        };
        result.push(Edit {
            kind,
            a_start: first.a_start,
            a_end: edits[j - 1].a_end,
            b_start: first.b_start,
            b_end: edits[j - 1].b_end,
        });
        i = j;
    }
    result
}
