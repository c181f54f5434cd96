use crate::sequence::{PackedSequence, Reversed};

/// Bits used to encode one [`EditOp`].
pub const BITS_PER_EDIT: usize = 2;

/// One column of an alignment between sequences A and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EditOp {
    /// A and B carry the same symbol.
    Match = 0,
    /// A and B carry different symbols (substitution).
    Mismatch = 1,
    /// B has a symbol with no counterpart in A (consumes B only).
    GapA = 2,
    /// A has a symbol with no counterpart in B (consumes A only).
    GapB = 3,
}

impl EditOp {
    /// 2-bit code used in packed traces and scripts.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit code; only the low two bits are inspected.
    #[inline]
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => EditOp::Match,
            1 => EditOp::Mismatch,
            2 => EditOp::GapA,
            _ => EditOp::GapB,
        }
    }

    /// Whether the operation advances through A.
    #[inline]
    pub fn consumes_a(self) -> bool {
        !matches!(self, EditOp::GapA)
    }

    /// Whether the operation advances through B.
    #[inline]
    pub fn consumes_b(self) -> bool {
        !matches!(self, EditOp::GapB)
    }

    /// Unit cost of the operation.
    #[inline]
    pub fn cost(self) -> usize {
        usize::from(self != EditOp::Match)
    }
}

/// Ordered alignment columns from the start of A and B to their ends.
///
/// Backtrace produces operations from the last column to the first, so the
/// script keeps the packed buffer in that order and reads it through the
/// [`Reversed`] view; index 0 is always the chronologically first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript {
    ops: PackedSequence,
}

impl EditScript {
    /// Wrap a buffer filled from the last column back to the first.
    pub(crate) fn from_backward(ops: PackedSequence) -> Self {
        debug_assert_eq!(ops.width(), BITS_PER_EDIT);
        Self { ops }
    }

    /// Build a script from operations in chronological order.
    pub fn from_ops(ops: &[EditOp]) -> Self {
        let mut packed = PackedSequence::new(ops.len(), BITS_PER_EDIT);
        for (idx, op) in ops.iter().rev().enumerate() {
            packed.put(idx, op.code());
        }
        Self { ops: packed }
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` for the alignment of two empty sequences.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operation at column `idx`.
    pub fn get(&self, idx: usize) -> Option<EditOp> {
        self.view().get(idx).map(EditOp::from_code)
    }

    /// Iterate over the operations in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EditOp> + ExactSizeIterator + '_ {
        self.view().iter().map(EditOp::from_code)
    }

    /// Collect the operations into a vector.
    pub fn to_vec(&self) -> Vec<EditOp> {
        self.iter().collect()
    }

    /// Total unit cost (mismatches plus gaps).
    pub fn cost(&self) -> usize {
        self.iter().map(EditOp::cost).sum()
    }

    /// Number of columns of the given kind.
    pub fn count(&self, op: EditOp) -> usize {
        self.iter().filter(|&o| o == op).count()
    }

    /// Packed backing buffer (stored last column first).
    pub fn packed(&self) -> &PackedSequence {
        &self.ops
    }

    fn view(&self) -> Reversed<'_> {
        self.ops.rev()
    }
}
