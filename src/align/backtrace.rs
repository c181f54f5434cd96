use crate::sequence::PackedSequence;

use super::banded::BandTrace;
use super::edits::{EditOp, EditScript, BITS_PER_EDIT};

/// Rebuild the edit script by replaying recorded choices from the final cell.
///
/// The walk runs from `(|A|, |B|)` back to the origin and writes operations
/// into a buffer sized for the longest possible path; the buffer is then cut
/// to the number of steps taken and exposed in chronological order.
pub fn backtrace(trace: &BandTrace) -> EditScript {
    let mut i = trace.rows().saturating_sub(1);
    let mut j = trace.cols().saturating_sub(1);
    let mut buffer = PackedSequence::new(i + j, BITS_PER_EDIT);
    let mut written = 0;

    while i > 0 || j > 0 {
        let Some(op) = trace.op(i, j) else {
            unreachable!("backtrace stepped outside the computed band at ({i}, {j})");
        };
        buffer.put(written, op.code());
        written += 1;

        match op {
            EditOp::Match | EditOp::Mismatch => {
                i -= 1;
                j -= 1;
            }
            EditOp::GapA => j -= 1,
            EditOp::GapB => i -= 1,
        }
    }

    buffer.truncate(written);
    EditScript::from_backward(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::banded::fill_band;
    use crate::sequence::encode_sequence;

    #[test]
    fn walks_back_to_the_origin() {
        let a = encode_sequence(b"GATTACA").unwrap();
        let b = encode_sequence(b"GACTATA").unwrap();
        let (distance, trace) = fill_band(&a, &b, 4).unwrap();
        let script = backtrace(&trace);

        assert_eq!(script.cost(), distance);
        let consumed_a = script.iter().filter(|op| op.consumes_a()).count();
        let consumed_b = script.iter().filter(|op| op.consumes_b()).count();
        assert_eq!(consumed_a, a.len());
        assert_eq!(consumed_b, b.len());
    }

    #[test]
    fn buffer_is_trimmed_to_path_length() {
        let a = encode_sequence(b"ACGT").unwrap();
        let (_, trace) = fill_band(&a, &a, 1).unwrap();
        let script = backtrace(&trace);
        assert_eq!(script.len(), 4);
        assert_eq!(script.packed().capacity(), 8);
    }
}
