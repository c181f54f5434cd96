//! Banded dynamic programming for bounded edit distance.
//!
//! The DP matrix has `|A| + 1` rows and `|B| + 1` columns. A path of cost at
//! most `k` cannot visit a cell whose diagonal `d = j - i` satisfies
//! `|d| + |t - d| > k`, where `t = |B| - |A|` is the diagonal of the final
//! cell, so each row only evaluates a window `[lo, hi)` of columns around the
//! segment between diagonal 0 and diagonal `t`.
//!
//! After a row is filled, cells at either end of the window whose value plus
//! their distance to diagonal `t` already exceeds `k` are dropped, and the
//! window slides one column to the right for the next row. Values never
//! decrease along a diagonal, so a dropped diagonal can never come back into
//! reach.

use tracing::trace;

use crate::sequence::PackedSequence;

use super::backtrace::backtrace;
use super::edits::{EditOp, BITS_PER_EDIT};
use super::Comparison;

/// Edit choices recorded for every computed cell, one packed row per DP row.
///
/// Only two DP value rows are alive during a solve, so this is the history
/// backtrace walks once the final cell is known.
#[derive(Debug, Clone)]
pub struct BandTrace {
    rows: Vec<PackedSequence>,
    offsets: Vec<usize>,
    cols: usize,
}

impl BandTrace {
    fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
            offsets: Vec::with_capacity(rows),
            cols,
        }
    }

    fn push_row(&mut self, offset: usize, ops: PackedSequence) {
        self.offsets.push(offset);
        self.rows.push(ops);
    }

    /// Number of DP rows recorded (`|A| + 1` after a complete solve).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of DP columns (`|B| + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Absolute column at which `row`'s band starts.
    pub fn offset(&self, row: usize) -> usize {
        self.offsets[row]
    }

    /// Number of cells computed in `row`.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    /// Recorded choice for the cell at `(row, col)`, if it was computed.
    pub fn op(&self, row: usize, col: usize) -> Option<EditOp> {
        let ops = self.rows.get(row)?;
        col.checked_sub(self.offsets[row])
            .and_then(|local| ops.get(local))
            .map(EditOp::from_code)
    }
}

/// Exact edit distance and alignment of `a` and `b` if it is at most `k`.
///
/// `None` means the distance exceeds `k`; the caller is expected to retry
/// with a larger bound.
pub fn solve_bounded(a: &PackedSequence, b: &PackedSequence, k: usize) -> Option<Comparison> {
    let (distance, trace) = fill_band(a, b, k)?;
    Some(Comparison {
        distance,
        edits: backtrace(&trace),
    })
}

/// Run the banded DP and return the final cell's value with its trace.
pub fn fill_band(a: &PackedSequence, b: &PackedSequence, k: usize) -> Option<(usize, BandTrace)> {
    let a_codes = a.to_codes();
    let b_codes = b.to_codes();
    let rows = a_codes.len() + 1;
    let cols = b_codes.len() + 1;

    // No alignment costs more than |A| + |B|.
    let k = k.min(a_codes.len() + b_codes.len());
    let target = b_codes.len() as isize - a_codes.len() as isize;
    if target.unsigned_abs() > k {
        trace!(k, target, "length difference alone exceeds the bound");
        return None;
    }

    let slack = (k - target.unsigned_abs()) as isize / 2;
    // [lo, hi) in absolute columns; may extend past the matrix on either side.
    let mut lo = target.min(0) - slack;
    let mut hi = target.max(0) + slack + 1;
    let width = (hi - lo) as usize;

    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];
    let (mut prev_l, mut prev_h) = (0usize, 0usize);
    let mut trace = BandTrace::with_capacity(rows, cols);
    let mut distance = usize::MAX;

    for i in 0..rows {
        let row = i as isize;
        if lo - row > target || hi - 1 - row < target {
            trace!(row = i, k, "band no longer contains the final diagonal");
            return None;
        }

        let l = lo.max(0) as usize;
        let h = hi.min(cols as isize) as usize;
        let mut ops = PackedSequence::new(h - l, BITS_PER_EDIT);

        let mut start = 0;
        if l == 0 {
            // Column 0: every symbol of A so far is unmatched.
            curr[0] = i;
            ops.put(0, EditOp::GapB.code());
            start = 1;
        }

        for local in start..(h - l) {
            let j = l + local;
            if i == 0 {
                // Row 0: every symbol of B so far is unmatched.
                curr[local] = j;
                ops.put(local, EditOp::GapA.code());
                continue;
            }

            let diagonal = prev[j - 1 - prev_l];
            let (value, op) = if a_codes[i - 1] == b_codes[j - 1] {
                (diagonal, EditOp::Match)
            } else {
                let mut best = (diagonal + 1, EditOp::Mismatch);
                if j < prev_h {
                    let up = prev[j - prev_l] + 1;
                    if up < best.0 {
                        best = (up, EditOp::GapB);
                    }
                }
                if local > 0 {
                    let left = curr[local - 1] + 1;
                    if left < best.0 {
                        best = (left, EditOp::GapA);
                    }
                }
                best
            };
            curr[local] = value;
            ops.put(local, op.code());
        }

        if i == rows - 1 {
            distance = curr[cols - 1 - l];
        }

        // Drop boundary cells that can no longer finish within k.
        let remaining = |col: isize| (target - (col - row)).unsigned_abs();
        if lo >= 0 {
            while lo < h as isize && curr[(lo as usize) - l] + remaining(lo) > k {
                lo += 1;
            }
        }
        if hi <= cols as isize {
            while hi > l as isize && curr[(hi - 1) as usize - l] + remaining(hi - 1) > k {
                hi -= 1;
            }
        }
        lo += 1;
        hi += 1;

        trace.push_row(l, ops);
        std::mem::swap(&mut prev, &mut curr);
        prev_l = l;
        prev_h = h;
    }

    if distance > k {
        trace!(distance, k, "final cell exceeds the bound");
        return None;
    }
    Some((distance, trace))
}
