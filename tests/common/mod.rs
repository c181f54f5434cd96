#![allow(dead_code)]

use genodist::{encode_sequence, EditOp, EditScript, PackedSequence};
use proptest::prelude::*;

pub fn seq(text: &str) -> PackedSequence {
    encode_sequence(text.as_bytes()).expect("valid nucleotide text")
}

/// Full quadratic Levenshtein table, used as the reference answer.
pub fn reference_distance(a: &[u8], b: &[u8]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &x) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &y) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(x != y);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Replay an edit script over A, returning the implied B and the implied cost.
///
/// Panics if the script claims a match on differing symbols or consumes
/// past the end of either input.
pub fn apply_script(a: &[u8], b: &[u8], edits: &EditScript) -> (Vec<u8>, usize) {
    let (mut ai, mut bi) = (0, 0);
    let mut rebuilt = Vec::with_capacity(b.len());
    let mut cost = 0;
    for op in edits.iter() {
        match op {
            EditOp::Match => {
                assert_eq!(a[ai], b[bi], "match column {ai}/{bi} differs");
                rebuilt.push(a[ai]);
                ai += 1;
                bi += 1;
            }
            EditOp::Mismatch => {
                assert_ne!(a[ai], b[bi], "mismatch column {ai}/{bi} is equal");
                rebuilt.push(b[bi]);
                cost += 1;
                ai += 1;
                bi += 1;
            }
            EditOp::GapA => {
                rebuilt.push(b[bi]);
                cost += 1;
                bi += 1;
            }
            EditOp::GapB => {
                cost += 1;
                ai += 1;
            }
        }
    }
    assert_eq!(ai, a.len(), "script does not consume all of A");
    assert_eq!(bi, b.len(), "script does not consume all of B");
    (rebuilt, cost)
}

/// Replay an edit script over B, returning the implied A.
///
/// Matched columns copy B; substitutions and gaps in B supply A's symbol;
/// gaps in A drop B's symbol.
pub fn apply_script_inverse(a: &[u8], b: &[u8], edits: &EditScript) -> Vec<u8> {
    let (mut ai, mut bi) = (0, 0);
    let mut rebuilt = Vec::with_capacity(a.len());
    for op in edits.iter() {
        match op {
            EditOp::Match => {
                rebuilt.push(b[bi]);
                ai += 1;
                bi += 1;
            }
            EditOp::Mismatch => {
                rebuilt.push(a[ai]);
                ai += 1;
                bi += 1;
            }
            EditOp::GapA => bi += 1,
            EditOp::GapB => {
                rebuilt.push(a[ai]);
                ai += 1;
            }
        }
    }
    assert_eq!(bi, b.len(), "script does not consume all of B");
    rebuilt
}

pub fn nucleotide() -> impl Strategy<Value = u8> {
    prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')]
}

pub fn genome(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(nucleotide(), 0..max_len)
}

/// Two equal-length genomes where the second carries a handful of point
/// mutations of the first.
pub fn mutated_pair(max_len: usize) -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    proptest::collection::vec(nucleotide(), 1..max_len).prop_flat_map(|base| {
        let len = base.len();
        let mutations = proptest::collection::vec((0..len, nucleotide()), 0..=len.min(6));
        (Just(base), mutations).prop_map(|(base, mutations)| {
            let mut other = base.clone();
            for (idx, symbol) in mutations {
                other[idx] = symbol;
            }
            (base, other)
        })
    })
}

/// Two equal-length genomes where the second is the first shifted by a few
/// positions, padded at the end.
pub fn shifted_pair(max_len: usize) -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (proptest::collection::vec(nucleotide(), 4..max_len), 1usize..4, nucleotide()).prop_map(
        |(base, shift, pad)| {
            let shift = shift.min(base.len() - 1);
            let mut other = base[shift..].to_vec();
            other.resize(base.len(), pad);
            (base, other)
        },
    )
}
