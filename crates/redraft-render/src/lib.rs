//! Diff rendering for the Redraft review engine.
//!
//! Two views over a [`Difference`](redraft_core::Difference) plus the
//! original text: a unified-diff-style rendering for human review and a
//! delimiter-framed summary for an automated (LLM-style) consumer.
//!
//! # Architecture
//!
//! This is a **Layer 2 (Domain)** crate:
//! - Depends on: redraft-core
//! - Used by: UI and chat collaborators that display or re-feed diffs

mod preview;
mod summary;
mod unified;

pub use summary::to_model_summary;
pub use unified::to_unified_diff;

/// Options shared by both renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// When set, only changes with an accepted verdict are rendered.
    pub only_accepted: bool,
    /// When clear (and `only_accepted` is clear), pending changes are
    /// omitted and only decided ones are rendered.
    pub include_pending: bool,
    /// Maximum preview lines per change in each direction; 0 = unlimited.
    pub max_preview_lines: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            only_accepted: false,
            include_pending: true,
            max_preview_lines: 200,
        }
    }
}
