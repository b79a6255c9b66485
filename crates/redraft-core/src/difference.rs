//! The mutable aggregate of reviewable changes for one document.

use std::future::Future;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;

use crate::change::{Acceptance, Change};
use crate::error::{ChangeError, Result};

/// Error returned when a decision wait is cancelled before the review
/// completes. Cancellation is an expected outcome, not a failure of the
/// difference itself; no change is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("decision wait was cancelled")]
pub struct WaitCancelled;

/// A set of [`Change`]s against one logical document, plus the review state
/// derived from them.
///
/// The change list lives behind a single mutex; every mutation recomputes
/// the aggregate [`Acceptance`] and publishes it on a watch channel before
/// the lock is released, so a verdict flip and the resulting aggregate are
/// always observed together. Reads of the aggregate are lock-free snapshots
/// of the channel.
pub struct Difference {
    file_path: String,
    changes: Mutex<Vec<Change>>,
    acceptance_tx: watch::Sender<Acceptance>,
}

impl Difference {
    /// Create an empty difference for the document identified by
    /// `file_path`. The label is opaque to this crate; it only appears in
    /// rendered output.
    pub fn new(file_path: impl Into<String>) -> Self {
        // No changes yet: every change is vacuously rejected.
        let (acceptance_tx, _) = watch::channel(Acceptance::Rejected);
        Self {
            file_path: file_path.into(),
            changes: Mutex::new(Vec::new()),
            acceptance_tx,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Append changes to the collection. Never re-sorts or validates;
    /// overlap and bounds are checked by [`validate_against`](Self::validate_against).
    pub fn add(&self, changes: impl IntoIterator<Item = Change>) {
        let mut list = self.changes.lock();
        list.extend(changes);
        self.publish_acceptance(&list);
    }

    /// Number of changes in the collection.
    pub fn total_changes(&self) -> usize {
        self.changes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.lock().is_empty()
    }

    /// Number of changes whose verdict is no longer pending.
    pub fn decided_changes(&self) -> usize {
        self.changes
            .lock()
            .iter()
            .filter(|c| c.accepted().is_decided())
            .count()
    }

    /// Snapshot of all changes in insertion order.
    pub fn changes(&self) -> Vec<Change> {
        self.changes.lock().clone()
    }

    /// The aggregate verdict: `Pending` if any change is pending, otherwise
    /// `Accepted` if at least one change is accepted, otherwise `Rejected`.
    pub fn acceptance(&self) -> Acceptance {
        *self.acceptance_tx.borrow()
    }

    /// Subscribe to aggregate acceptance updates. UI collaborators use this
    /// to refresh indicators; the receiver always reports the latest value.
    pub fn subscribe(&self) -> watch::Receiver<Acceptance> {
        self.acceptance_tx.subscribe()
    }

    /// Set the verdict of the change with the given id. Returns `false`
    /// when no change has that id. Passing [`Acceptance::Pending`] undoes a
    /// previous decision.
    pub fn set_accepted(&self, id: &str, accepted: Acceptance) -> bool {
        let mut list = self.changes.lock();
        let Some(change) = list.iter_mut().find(|c| c.id() == id) else {
            return false;
        };
        change.set_accepted(accepted);
        tracing::debug!(change = %change, "change verdict updated");
        self.publish_acceptance(&list);
        true
    }

    /// Mark every change accepted.
    pub fn accept_all(&self) {
        self.set_all(Acceptance::Accepted);
    }

    /// Mark every change rejected.
    pub fn discard_all(&self) {
        self.set_all(Acceptance::Rejected);
    }

    /// Wait until the aggregate acceptance leaves `Pending`, resolving to
    /// `true` for net-accepted and `false` for all-rejected. Every
    /// concurrent waiter observes the same resolution.
    ///
    /// `cancel` is any future; when it completes first the wait resolves
    /// with [`WaitCancelled`] and no change is touched. Pass
    /// [`std::future::pending()`] for an uncancellable wait.
    pub async fn wait_for_decision(
        &self,
        cancel: impl Future<Output = ()>,
    ) -> std::result::Result<bool, WaitCancelled> {
        let mut rx = self.acceptance_tx.subscribe();
        tokio::pin!(cancel);
        loop {
            if let Some(decided) = rx.borrow_and_update().as_bool() {
                return Ok(decided);
            }
            tokio::select! {
                changed = rx.changed() => {
                    // The sender lives in `self`, so the channel cannot
                    // close while we hold `&self`.
                    if changed.is_err() {
                        return Err(WaitCancelled);
                    }
                }
                _ = &mut cancel => return Err(WaitCancelled),
            }
        }
    }

    /// Check every change against `original`: each range must be in bounds
    /// on character boundaries, and no two ranges (sorted by start) may
    /// overlap.
    pub fn validate_against(&self, original: &str) -> Result<()> {
        let list = self.changes.lock();
        validate_changes(&list, original)
    }

    /// Changes sorted by range start, filtered by verdict. With
    /// `only_accepted` set, only accepted changes are returned; otherwise
    /// `include_pending` controls whether undecided changes appear.
    pub fn filtered_changes(&self, only_accepted: bool, include_pending: bool) -> Vec<Change> {
        let list = self.changes.lock();
        let mut selected: Vec<Change> = list
            .iter()
            .filter(|c| {
                if only_accepted {
                    c.accepted() == Acceptance::Accepted
                } else {
                    include_pending || c.accepted().is_decided()
                }
            })
            .cloned()
            .collect();
        selected.sort_by_key(|c| c.range().start());
        selected
    }

    /// Reconstruct the document with every accepted change applied.
    pub fn apply(&self, original: &str) -> Result<String> {
        self.apply_with(original, |c| c.accepted() == Acceptance::Accepted, true)
    }

    /// Reconstruct the document with the changes chosen by `selector`
    /// applied, in original-document order. With `validate` set the whole
    /// change set is checked against `original` first; callers may skip the
    /// check only for a set that already validated.
    pub fn apply_with<F>(&self, original: &str, selector: F, validate: bool) -> Result<String>
    where
        F: Fn(&Change) -> bool,
    {
        let list = self.changes.lock();
        if validate {
            validate_changes(&list, original)?;
        }
        let mut selected: Vec<&Change> = list.iter().filter(|c| selector(c)).collect();
        selected.sort_by_key(|c| c.range().start());

        let mut out = String::with_capacity(original.len());
        let mut cursor = 0;
        for change in selected {
            out.push_str(&original[cursor..change.range().start()]);
            out.push_str(change.new_text());
            cursor = change.range().end();
        }
        out.push_str(&original[cursor..]);
        Ok(out)
    }

    fn set_all(&self, accepted: Acceptance) {
        let mut list = self.changes.lock();
        for change in list.iter_mut() {
            change.set_accepted(accepted);
        }
        self.publish_acceptance(&list);
    }

    /// Recompute the aggregate and notify waiters. Must be called with the
    /// change list lock held so the mutation and the published aggregate
    /// stay consistent.
    fn publish_acceptance(&self, changes: &[Change]) {
        self.acceptance_tx.send_replace(compute_acceptance(changes));
    }
}

impl std::fmt::Debug for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Difference")
            .field("file_path", &self.file_path)
            .field("changes", &self.changes.lock().len())
            .field("acceptance", &self.acceptance())
            .finish()
    }
}

fn compute_acceptance(changes: &[Change]) -> Acceptance {
    let mut any_accepted = false;
    for change in changes {
        match change.accepted() {
            Acceptance::Pending => return Acceptance::Pending,
            Acceptance::Accepted => any_accepted = true,
            Acceptance::Rejected => {}
        }
    }
    if any_accepted {
        Acceptance::Accepted
    } else {
        Acceptance::Rejected
    }
}

fn validate_changes(changes: &[Change], original: &str) -> Result<()> {
    for change in changes {
        change.range().ensure_inside(original)?;
    }
    let mut ordered: Vec<&Change> = changes.iter().collect();
    ordered.sort_by_key(|c| c.range().start());
    for pair in ordered.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if prev.range().end() > curr.range().start() {
            return Err(ChangeError::OverlappingChanges {
                first_id: prev.id().to_string(),
                first_range: prev.range(),
                second_id: curr.id().to_string(),
                second_range: curr.range(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::future::pending;
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    fn two_change_diff() -> Difference {
        let diff = Difference::new("notes.md");
        diff.add([Change::replace(0, 2, "AB"), Change::delete(4, 2)]);
        diff
    }

    #[test]
    fn test_empty_difference_reads_rejected() {
        let diff = Difference::new("a.txt");
        assert_eq!(diff.acceptance(), Acceptance::Rejected);
        assert_eq!(diff.total_changes(), 0);
    }

    #[test]
    fn test_adding_pending_change_makes_aggregate_pending() {
        let diff = Difference::new("a.txt");
        diff.add([Change::insert(0, "x")]);
        assert_eq!(diff.acceptance(), Acceptance::Pending);
    }

    #[test]
    fn test_aggregate_accepted_when_any_accepted_none_pending() {
        let diff = two_change_diff();
        let ids: Vec<String> = diff.changes().iter().map(|c| c.id().to_string()).collect();
        assert!(diff.set_accepted(&ids[0], Acceptance::Accepted));
        assert_eq!(diff.acceptance(), Acceptance::Pending);
        assert!(diff.set_accepted(&ids[1], Acceptance::Rejected));
        assert_eq!(diff.acceptance(), Acceptance::Accepted);
    }

    #[test]
    fn test_aggregate_rejected_only_when_all_rejected() {
        let diff = two_change_diff();
        diff.discard_all();
        assert_eq!(diff.acceptance(), Acceptance::Rejected);
        assert_eq!(diff.decided_changes(), 2);
    }

    #[test]
    fn test_undo_returns_aggregate_to_pending() {
        let diff = two_change_diff();
        diff.accept_all();
        assert_eq!(diff.acceptance(), Acceptance::Accepted);
        let id = diff.changes()[0].id().to_string();
        assert!(diff.set_accepted(&id, Acceptance::Pending));
        assert_eq!(diff.acceptance(), Acceptance::Pending);
    }

    #[test]
    fn test_set_accepted_unknown_id() {
        let diff = two_change_diff();
        assert!(!diff.set_accepted("nope", Acceptance::Accepted));
    }

    #[test]
    fn test_validate_detects_overlap() {
        let diff = Difference::new("a.txt");
        diff.add([Change::replace(0, 5, "x"), Change::replace(3, 5, "y")]);
        let err = diff.validate_against("0123456789").unwrap_err();
        assert!(matches!(err, ChangeError::OverlappingChanges { .. }));
    }

    #[test]
    fn test_validate_detects_out_of_bounds() {
        let diff = Difference::new("a.txt");
        diff.add([Change::delete(8, 5)]);
        let err = diff.validate_against("0123456789").unwrap_err();
        assert!(matches!(err, ChangeError::RangeOutOfBounds { .. }));
    }

    #[test]
    fn test_validate_accepts_touching_ranges() {
        let diff = Difference::new("a.txt");
        diff.add([Change::delete(0, 3), Change::delete(3, 3)]);
        assert!(diff.validate_against("0123456789").is_ok());
    }

    #[test]
    fn test_apply_accepted_subset() {
        let original = "0123456789";
        let diff = two_change_diff();
        let ids: Vec<String> = diff.changes().iter().map(|c| c.id().to_string()).collect();
        diff.set_accepted(&ids[0], Acceptance::Accepted);
        diff.set_accepted(&ids[1], Acceptance::Rejected);
        // replace [0,2) with "AB", keep [4,6)
        assert_eq!(diff.apply(original).unwrap(), "AB23456789");
    }

    #[test]
    fn test_apply_all_and_none() {
        let original = "0123456789";
        let diff = two_change_diff();
        diff.accept_all();
        assert_eq!(diff.apply(original).unwrap(), "AB236789");
        diff.discard_all();
        assert_eq!(diff.apply(original).unwrap(), original);
    }

    #[test]
    fn test_apply_is_order_independent_for_disjoint_changes() {
        let original = "0123456789";

        let forward = Difference::new("a.txt");
        forward.add([Change::replace(0, 2, "X"), Change::delete(5, 2)]);
        forward.accept_all();

        let reversed = Difference::new("a.txt");
        reversed.add([Change::delete(5, 2), Change::replace(0, 2, "X")]);
        reversed.accept_all();

        assert_eq!(
            forward.apply(original).unwrap(),
            reversed.apply(original).unwrap()
        );
    }

    #[test]
    fn test_apply_with_custom_selector() {
        let original = "0123456789";
        let diff = two_change_diff();
        let keep = diff.changes()[1].id().to_string();
        let out = diff
            .apply_with(original, |c| c.id() == keep, true)
            .unwrap();
        assert_eq!(out, "01236789");
    }

    #[test]
    fn test_idempotent_reapply_to_original() {
        let original = "alpha\nbeta\n";
        let diff = Difference::new("a.txt");
        diff.add([Change::replace(0, 6, "ALPHA\n")]);
        diff.accept_all();
        let once = diff.apply(original).unwrap();
        let twice = diff.apply(original).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filtered_changes_sorting_and_flags() {
        let diff = Difference::new("a.txt");
        diff.add([Change::delete(6, 1), Change::insert(0, "hi")]);
        let ids: Vec<String> = diff.changes().iter().map(|c| c.id().to_string()).collect();
        diff.set_accepted(&ids[0], Acceptance::Accepted);

        let all = diff.filtered_changes(false, true);
        assert_eq!(all.len(), 2);
        assert!(all[0].range().start() < all[1].range().start());

        let decided = diff.filtered_changes(false, false);
        assert_eq!(decided.len(), 1);
        assert_eq!(decided[0].id(), ids[0]);

        let accepted = diff.filtered_changes(true, true);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id(), ids[0]);
    }

    #[tokio::test]
    async fn test_wait_resolves_true_on_accept_all() {
        let diff = Arc::new(two_change_diff());
        let waiter = {
            let diff = Arc::clone(&diff);
            tokio::spawn(async move { diff.wait_for_decision(pending()).await })
        };
        tokio::task::yield_now().await;
        diff.accept_all();
        assert_eq!(waiter.await.unwrap(), Ok(true));
    }

    #[tokio::test]
    async fn test_wait_resolves_false_on_discard_all() {
        let diff = Arc::new(two_change_diff());
        let waiter = {
            let diff = Arc::clone(&diff);
            tokio::spawn(async move { diff.wait_for_decision(pending()).await })
        };
        tokio::task::yield_now().await;
        diff.discard_all();
        assert_eq!(waiter.await.unwrap(), Ok(false));
    }

    #[tokio::test]
    async fn test_all_concurrent_waiters_observe_same_resolution() {
        let diff = Arc::new(two_change_diff());
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let diff = Arc::clone(&diff);
                tokio::spawn(async move { diff.wait_for_decision(pending()).await })
            })
            .collect();
        tokio::task::yield_now().await;
        diff.accept_all();
        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Ok(true));
        }
    }

    #[tokio::test]
    async fn test_wait_returns_immediately_when_already_decided() {
        let diff = two_change_diff();
        diff.accept_all();
        assert_eq!(diff.wait_for_decision(pending()).await, Ok(true));
    }

    #[tokio::test]
    async fn test_cancelled_wait_leaves_changes_untouched() {
        let diff = two_change_diff();
        let result = diff
            .wait_for_decision(tokio::time::sleep(Duration::from_millis(5)))
            .await;
        assert_eq!(result, Err(WaitCancelled));
        assert_eq!(diff.acceptance(), Acceptance::Pending);
        assert!(diff.changes().iter().all(|c| !c.accepted().is_decided()));
    }

    #[tokio::test]
    async fn test_wait_rearms_after_undo() {
        let diff = Arc::new(two_change_diff());
        diff.accept_all();
        assert_eq!(diff.wait_for_decision(pending()).await, Ok(true));

        let id = diff.changes()[0].id().to_string();
        diff.set_accepted(&id, Acceptance::Pending);
        let waiter = {
            let diff = Arc::clone(&diff);
            tokio::spawn(async move { diff.wait_for_decision(pending()).await })
        };
        tokio::task::yield_now().await;
        diff.set_accepted(&id, Acceptance::Rejected);
        // one accepted change remains, so the second decision is still true
        assert_eq!(waiter.await.unwrap(), Ok(true));
    }
}
