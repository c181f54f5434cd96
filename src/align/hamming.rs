use crate::sequence::PackedSequence;

use super::AlignError;

/// Count positions where two equal-length sequences differ.
///
/// For equal lengths this is always an upper bound on the edit distance; the
/// search driver uses it as its ceiling and never reports it as a distance.
pub fn hamming(a: &PackedSequence, b: &PackedSequence) -> Result<usize, AlignError> {
    if a.len() != b.len() {
        return Err(AlignError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(mismatches(a, b))
}

/// Positions that differ over the common prefix of `a` and `b`.
pub(crate) fn mismatches(a: &PackedSequence, b: &PackedSequence) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::encode_sequence;

    #[test]
    fn counts_mismatched_positions() {
        let a = encode_sequence(b"ACGTACGT").unwrap();
        let b = encode_sequence(b"ACCTACGA").unwrap();
        assert_eq!(hamming(&a, &b).unwrap(), 2);
        assert_eq!(hamming(&a, &a).unwrap(), 0);
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let a = encode_sequence(b"ACGT").unwrap();
        let b = encode_sequence(b"ACG").unwrap();
        assert!(matches!(
            hamming(&a, &b),
            Err(AlignError::LengthMismatch { left: 4, right: 3 })
        ));
    }
}
