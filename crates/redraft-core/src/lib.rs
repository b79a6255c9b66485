//! Foundation types for the Redraft review engine.
//!
//! This crate provides the change model shared by the rest of the
//! workspace: byte ranges over an original text, line segmentation,
//! reviewable [`Change`] records with tri-state acceptance, and the
//! [`Difference`] aggregate that owns the review protocol (validate, wait
//! for a decision, apply the accepted subset).
//!
//! ## Architecture Principle
//!
//! redraft-core sits at the bottom of the dependency hierarchy:
//! - Layer 1 (Foundation): redraft-core ← YOU ARE HERE
//! - Layer 2 (Domain): redraft-diff, redraft-render
//!
//! It holds no file handles and does no I/O; collaborators hand in plain
//! text and consume plain text and change metadata back.

pub mod change;
pub mod difference;
pub mod error;
pub mod lines;
pub mod range;

pub use change::{Acceptance, Change, ChangeKind};
pub use difference::{Difference, WaitCancelled};
pub use error::{ChangeError, Result};
pub use lines::{segment_lines, Line};
pub use range::TextRange;
