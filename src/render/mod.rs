//! Display projections of an alignment.
//!
//! These helpers turn `(A, B, EditScript)` into the strings and index lists a
//! viewer needs. Gap columns render as a blank, collapsed match runs as `…`.

use crate::align::{EditOp, EditScript};
use crate::sequence::{code_to_char, PackedSequence};

/// Placeholder drawn opposite a gap.
pub const GAP: char = ' ';
/// Marker replacing a collapsed run of matches.
pub const ELLIPSIS: char = '…';
/// Marker-line symbol for a matching column.
pub const MATCH_MARK: char = '|';

/// Column positions of each kind of difference in an edit script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditPositions {
    /// Columns holding a substitution.
    pub substitutions: Vec<usize>,
    /// Columns where A has a gap.
    pub gaps_a: Vec<usize>,
    /// Columns where B has a gap.
    pub gaps_b: Vec<usize>,
}

impl EditPositions {
    /// Total number of non-match columns.
    pub fn len(&self) -> usize {
        self.substitutions.len() + self.gaps_a.len() + self.gaps_b.len()
    }

    /// Returns `true` when the alignment has no differences.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compact view of an alignment around its differences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElidedAlignment {
    /// Row for sequence A.
    pub a: String,
    /// Row for sequence B.
    pub b: String,
    /// `|` under matching columns, blank under differences and ellipses.
    pub markers: String,
}

impl ElidedAlignment {
    fn push(&mut self, a: char, b: char, marker: char) {
        self.a.push(a);
        self.b.push(b);
        self.markers.push(marker);
    }

    fn push_ellipsis(&mut self) {
        self.push(ELLIPSIS, ELLIPSIS, GAP);
    }

    fn push_matches(
        &mut self,
        a: &PackedSequence,
        b: &PackedSequence,
        from: (usize, usize),
        count: usize,
    ) {
        for step in 0..count {
            self.push(
                symbol(a, from.0 + step),
                symbol(b, from.1 + step),
                MATCH_MARK,
            );
        }
    }

    /// Number of display columns.
    pub fn width(&self) -> usize {
        self.markers.chars().count()
    }
}

fn symbol(seq: &PackedSequence, idx: usize) -> char {
    seq.get(idx).map(code_to_char).unwrap_or(GAP)
}

/// Expand an edit script into two equal-width rows, blanks marking gaps.
pub fn full_alignment(
    a: &PackedSequence,
    b: &PackedSequence,
    edits: &EditScript,
) -> (String, String) {
    let mut row_a = String::with_capacity(edits.len());
    let mut row_b = String::with_capacity(edits.len());
    let (mut ai, mut bi) = (0, 0);

    for op in edits.iter() {
        if op.consumes_a() {
            row_a.push(symbol(a, ai));
            ai += 1;
        } else {
            row_a.push(GAP);
        }
        if op.consumes_b() {
            row_b.push(symbol(b, bi));
            bi += 1;
        } else {
            row_b.push(GAP);
        }
    }

    (row_a, row_b)
}

/// Show only `context` matching columns on each side of every difference.
///
/// A run of matches that would not shrink by collapsing is printed in full.
/// Leading and trailing runs keep context only on the side facing a
/// difference.
pub fn elided_alignment(
    a: &PackedSequence,
    b: &PackedSequence,
    edits: &EditScript,
    context: usize,
) -> ElidedAlignment {
    let mut out = ElidedAlignment::default();
    let (mut ai, mut bi) = (0, 0);
    let mut run = 0;
    let mut leading = true;
    // Runs no longer than these print in full.
    let edge_limit = context.saturating_add(1);
    let middle_limit = context.saturating_mul(2).saturating_add(1);

    for op in edits.iter() {
        if op == EditOp::Match {
            run += 1;
            ai += 1;
            bi += 1;
            continue;
        }

        let run_start = (ai - run, bi - run);
        let collapse = if leading {
            run > edge_limit
        } else {
            run > middle_limit
        };
        if collapse {
            if !leading {
                out.push_matches(a, b, run_start, context);
            }
            out.push_ellipsis();
            out.push_matches(a, b, (ai - context, bi - context), context);
        } else {
            out.push_matches(a, b, run_start, run);
        }

        match op {
            EditOp::Mismatch => {
                out.push(symbol(a, ai), symbol(b, bi), GAP);
                ai += 1;
                bi += 1;
            }
            EditOp::GapA => {
                out.push(GAP, symbol(b, bi), GAP);
                bi += 1;
            }
            EditOp::GapB => {
                out.push(symbol(a, ai), GAP, GAP);
                ai += 1;
            }
            EditOp::Match => unreachable!("matches are accumulated above"),
        }
        run = 0;
        leading = false;
    }

    let run_start = (ai - run, bi - run);
    if run > edge_limit {
        out.push_matches(a, b, run_start, context);
        out.push_ellipsis();
    } else {
        out.push_matches(a, b, run_start, run);
    }

    out
}

/// Column indices of substitutions and gaps, in script order.
pub fn edit_positions(edits: &EditScript) -> EditPositions {
    let mut positions = EditPositions::default();
    for (idx, op) in edits.iter().enumerate() {
        match op {
            EditOp::Match => {}
            EditOp::Mismatch => positions.substitutions.push(idx),
            EditOp::GapA => positions.gaps_a.push(idx),
            EditOp::GapB => positions.gaps_b.push(idx),
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::encode_sequence;

    fn seq(text: &[u8]) -> PackedSequence {
        encode_sequence(text).unwrap()
    }

    #[test]
    fn full_alignment_inserts_blanks_for_gaps() {
        let a = seq(b"ACGT");
        let b = seq(b"AGT");
        let edits = EditScript::from_ops(&[
            EditOp::Match,
            EditOp::GapB,
            EditOp::Match,
            EditOp::Match,
        ]);
        let (row_a, row_b) = full_alignment(&a, &b, &edits);
        assert_eq!(row_a, "ACGT");
        assert_eq!(row_b, "A GT");
    }

    #[test]
    fn positions_follow_script_order() {
        let edits = EditScript::from_ops(&[
            EditOp::Match,
            EditOp::Mismatch,
            EditOp::GapA,
            EditOp::Match,
            EditOp::GapB,
            EditOp::Mismatch,
        ]);
        let positions = edit_positions(&edits);
        assert_eq!(positions.substitutions, vec![1, 5]);
        assert_eq!(positions.gaps_a, vec![2]);
        assert_eq!(positions.gaps_b, vec![4]);
        assert_eq!(positions.len(), 4);
    }

    #[test]
    fn long_match_runs_collapse() {
        let a = seq(b"AAAAAAAACAAAAAAAAAGAAAAAAA");
        let b = seq(b"AAAAAAAATAAAAAAAAATAAAAAAA");
        let mut ops = vec![EditOp::Match; 26];
        ops[8] = EditOp::Mismatch;
        ops[18] = EditOp::Mismatch;
        let edits = EditScript::from_ops(&ops);

        let view = elided_alignment(&a, &b, &edits, 1);
        assert_eq!(view.a, "…ACA…AGA…");
        assert_eq!(view.b, "…ATA…ATA…");
        assert_eq!(view.markers, " | | | | ");
        assert_eq!(view.width(), view.a.chars().count());
        assert_eq!(view.width(), view.b.chars().count());
    }

    #[test]
    fn huge_context_prints_everything() {
        let a = seq(b"ACGTACGT");
        let b = seq(b"ACGAACGT");
        let mut ops = vec![EditOp::Match; 8];
        ops[3] = EditOp::Mismatch;
        let edits = EditScript::from_ops(&ops);

        let view = elided_alignment(&a, &b, &edits, usize::MAX);
        assert_eq!(view.a, "ACGTACGT");
        assert_eq!(view.b, "ACGAACGT");
        assert_eq!(view.markers, "||| ||||");
    }

    #[test]
    fn short_runs_are_kept_whole() {
        let a = seq(b"ACGTA");
        let b = seq(b"ACTTA");
        let mut ops = vec![EditOp::Match; 5];
        ops[2] = EditOp::Mismatch;
        let edits = EditScript::from_ops(&ops);

        let view = elided_alignment(&a, &b, &edits, 2);
        assert_eq!(view.a, "ACGTA");
        assert_eq!(view.b, "ACTTA");
        assert_eq!(view.markers, "|| ||");
    }
}
