//! Line diff construction for the Redraft review engine.
//!
//! This crate turns two versions of one document into the reviewable
//! [`Change`](redraft_core::Change) records of a
//! [`Difference`](redraft_core::Difference):
//! line segmentation feeds a Myers shortest-edit-script search, adjacent
//! edits are coalesced into maximal spans, and each span is anchored to the
//! byte range it covers in the original text.
//!
//! # Architecture
//!
//! This is a **Layer 2 (Domain)** crate:
//! - Depends on: redraft-core
//! - Used by: callers that propose edits for review
//!
//! Construction is synchronous and CPU-bound over two immutable strings;
//! dispatch it to a blocking worker for large inputs. The search depth is
//! bounded by [`DiffOptions::max_edit_distance`] so pathologically
//! dissimilar inputs fail fast instead of stalling.

mod builder;
mod coalesce;
mod error;
mod myers;

pub use builder::{build_line_diff, line_changes, DiffOptions, DEFAULT_MAX_EDIT_DISTANCE};
pub use error::{DiffError, Result};
