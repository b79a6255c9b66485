//! Myers shortest-edit-script search over two sequences.
//!
//! Forward O((n+m)·D) greedy search over the edit graph. For each edit
//! distance `d` the furthest-reached `x` per diagonal `k = x − y` is kept in
//! a flat frontier vector indexed by `(k + d) / 2`; the recorded frontiers
//! are then walked backward from `(n, m)` to recover the script.

use crate::error::{DiffError, Result};

/// One unit step of the edit script: a single element kept, inserted or
/// deleted, tagged with the index ranges it covers in both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawEdit {
    pub kind: RawEditKind,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawEditKind {
    Equal,
    Insert,
    Delete,
}

/// Furthest-reached x for diagonal `k` in the frontier recorded at depth
/// `d`. Diagonals run `-d, -d+2, …, d`, so the slot is `(k + d) / 2`.
fn reach(frontier: &[usize], d: usize, k: isize) -> usize {
    frontier[((k + d as isize) / 2) as usize]
}

/// Compute a shortest edit script transforming `a` into `b`, replaying as
/// unit [`RawEdit`]s in forward order. Fails with
/// [`DiffError::EditDistanceExceeded`] once the search depth passes
/// `max_edit_distance` without reaching `(n, m)`.
pub(crate) fn shortest_edit_script<T: PartialEq>(
    a: &[T],
    b: &[T],
    max_edit_distance: Option<usize>,
) -> Result<Vec<RawEdit>> {
    let n = a.len();
    let m = b.len();
    let total = n + m;
    let ceiling = max_edit_distance.unwrap_or(total);

    // One frontier per explored depth, required for backtracking.
    let mut trace: Vec<Vec<usize>> = Vec::new();
    for d in 0..=ceiling.min(total) {
        let mut frontier = vec![0usize; d + 1];
        for i in 0..=d {
            let k = -(d as isize) + 2 * i as isize;
            let mut x = if d == 0 {
                0
            } else {
                let prev = &trace[d - 1];
                // Move down (insert) from k+1, or right (delete) from k-1.
                let down = k == -(d as isize)
                    || (k != d as isize && reach(prev, d - 1, k - 1) < reach(prev, d - 1, k + 1));
                if down {
                    reach(prev, d - 1, k + 1)
                } else {
                    reach(prev, d - 1, k - 1) + 1
                }
            };
            let mut y = (x as isize - k) as usize;
            // Extend the snake: free diagonal moves over equal elements.
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            frontier[i] = x;
            if x >= n && y >= m {
                trace.push(frontier);
                return Ok(backtrack(&trace, a, b));
            }
        }
        trace.push(frontier);
    }
    Err(DiffError::EditDistanceExceeded { ceiling })
}

/// Walk the recorded frontiers backward from `(n, m)` to `(0, 0)`,
/// collecting unit edits, then reverse them into forward order.
///
/// At each depth the predecessor diagonal is re-derived from the previous
/// frontier exactly as the forward pass chose it; the snake between that
/// move's landing point and the current point is emitted from the recorded
/// coordinates, never by re-comparing greedily, so every element of both
/// sequences is covered exactly once.
fn backtrack<T: PartialEq>(trace: &[Vec<usize>], a: &[T], b: &[T]) -> Vec<RawEdit> {
    let mut x = a.len();
    let mut y = b.len();
    let mut edits = Vec::new();

    for d in (1..trace.len()).rev() {
        let k = x as isize - y as isize;
        let prev = &trace[d - 1];
        let pd = d - 1;

        let down = k == -(d as isize)
            || (k != d as isize && reach(prev, pd, k - 1) < reach(prev, pd, k + 1));
        // Predecessor point at depth d-1, and where this depth's move landed.
        let (prev_x, prev_y, landing_x) = if down {
            let prev_x = reach(prev, pd, k + 1);
            (prev_x, (prev_x as isize - (k + 1)) as usize, prev_x)
        } else {
            let prev_x = reach(prev, pd, k - 1);
            (prev_x, (prev_x as isize - (k - 1)) as usize, prev_x + 1)
        };

        // Snake from the landing point up to the current point.
        for i in (landing_x..x).rev() {
            edits.push(RawEdit {
                kind: RawEditKind::Equal,
                a_start: i,
                a_end: i + 1,
                b_start: (i as isize - k) as usize,
                b_end: (i as isize - k) as usize + 1,
            });
        }

        if down {
            // Came from below: b[prev_y] was inserted at a-position prev_x.
            edits.push(RawEdit {
                kind: RawEditKind::Insert,
                a_start: prev_x,
                a_end: prev_x,
                b_start: prev_y,
                b_end: prev_y + 1,
            });
        } else {
            // Came from the right: a[prev_x] was deleted.
            edits.push(RawEdit {
                kind: RawEditKind::Delete,
                a_start: prev_x,
                a_end: prev_x + 1,
                b_start: prev_y,
                b_end: prev_y,
            });
        }
        x = prev_x;
        y = prev_y;
    }

    // Leading equal run reached with zero edits (x == y on diagonal 0).
    while x > 0 && y > 0 && a[x - 1] == b[y - 1] {
        edits.push(RawEdit {
            kind: RawEditKind::Equal,
            a_start: x - 1,
            a_end: x,
            b_start: y - 1,
            b_end: y,
        });
        x -= 1;
        y -= 1;
    }

    edits.reverse();
    edits
}
