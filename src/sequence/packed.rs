use std::fmt;

use bitvec::prelude::*;
use thiserror::Error;

/// Widest field supported by [`PackedSequence`]; values are handed out as `u8`.
pub const MAX_FIELD_WIDTH: usize = 8;

/// Errors raised by checked writes into a [`PackedSequence`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackedError {
    /// Index lies beyond the logical length of the sequence.
    #[error("index {index} out of range for packed sequence of length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Logical length at the time of the write.
        len: usize,
    },

    /// Value does not fit in the field width.
    #[error("value {value} does not fit in a {width}-bit field")]
    ValueTooWide {
        /// Value that was rejected.
        value: u8,
        /// Field width in bits.
        width: usize,
    },
}

/// Fixed-width bit-packed array of small unsigned symbols.
///
/// Fields of `width` bits are stored back to back, least significant bits
/// first, in `u64` words. The logical length can be shrunk with
/// [`truncate`](Self::truncate) without touching the allocation, which is how
/// sequences are cut down to a common length and how edit buffers are trimmed
/// after a backtrace.
#[derive(Clone)]
pub struct PackedSequence {
    bits: BitVec<u64, Lsb0>,
    width: usize,
    len: usize,
}

impl PackedSequence {
    /// Allocate a zero-filled sequence of `len` fields, each `width` bits wide.
    ///
    /// # Panics
    /// Panics if `width` is zero or larger than [`MAX_FIELD_WIDTH`].
    pub fn new(len: usize, width: usize) -> Self {
        assert!(
            (1..=MAX_FIELD_WIDTH).contains(&width),
            "field width must be within 1..={MAX_FIELD_WIDTH}, got {width}"
        );
        Self {
            bits: BitVec::repeat(false, len * width),
            width,
            len,
        }
    }

    /// Build a sequence from already-validated symbol codes.
    pub fn from_codes(codes: &[u8], width: usize) -> Result<Self, PackedError> {
        let mut packed = Self::new(codes.len(), width);
        for (idx, &code) in codes.iter().enumerate() {
            packed.set(idx, code)?;
        }
        Ok(packed)
    }

    /// Number of logical fields.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the sequence holds no fields.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of fields the allocation can hold.
    pub fn capacity(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Largest value a field can hold.
    pub fn max_value(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Access the underlying storage words.
    pub fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    /// Value stored at `idx`, or `None` past the logical length.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u8> {
        if idx >= self.len {
            return None;
        }
        Some(self.load(idx))
    }

    /// Overwrite the field at `idx`.
    pub fn set(&mut self, idx: usize, value: u8) -> Result<(), PackedError> {
        if idx >= self.len {
            return Err(PackedError::IndexOutOfRange {
                index: idx,
                len: self.len,
            });
        }
        if value > self.max_value() {
            return Err(PackedError::ValueTooWide {
                value,
                width: self.width,
            });
        }
        self.store(idx, value);
        Ok(())
    }

    /// Unchecked write for callers that construct values of the right width.
    #[inline]
    pub(crate) fn put(&mut self, idx: usize, value: u8) {
        debug_assert!(idx < self.len, "index {idx} out of range {}", self.len);
        debug_assert!(value <= self.max_value());
        self.store(idx, value);
    }

    /// Shrink the logical length. Lengths beyond the current one are ignored.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Read-only view that addresses the sequence from its last field.
    pub fn rev(&self) -> Reversed<'_> {
        Reversed { seq: self }
    }

    /// Iterate over stored values in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            seq: self,
            front: 0,
            back: self.len,
        }
    }

    /// Copy the logical fields into a byte vector.
    pub fn to_codes(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Content fingerprint over the width, logical length and field values.
    ///
    /// Storage beyond the logical length does not contribute, so a truncated
    /// sequence fingerprints the same as a freshly built one.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.width as u64).to_le_bytes());
        hasher.update(&(self.len as u64).to_le_bytes());
        hasher.update(&self.to_codes());
        hasher.finalize()
    }

    #[inline]
    fn load(&self, idx: usize) -> u8 {
        let start = idx * self.width;
        self.bits[start..start + self.width].load_le::<u8>()
    }

    #[inline]
    fn store(&mut self, idx: usize, value: u8) {
        let start = idx * self.width;
        self.bits[start..start + self.width].store_le::<u8>(value);
    }
}

impl PartialEq for PackedSequence {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for PackedSequence {}

impl fmt::Debug for PackedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedSequence")
            .field("width", &self.width)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<'a> IntoIterator for &'a PackedSequence {
    type Item = u8;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reversed addressing over a [`PackedSequence`]: index 0 is the last field.
///
/// Backtrace fills buffers from the end of the alignment towards its start, so
/// this view is what turns such a buffer back into chronological order.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a> {
    seq: &'a PackedSequence,
}

impl<'a> Reversed<'a> {
    /// Number of fields visible through the view.
    pub fn len(&self) -> usize {
        self.seq.len
    }

    /// Returns `true` when the underlying sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Value at reversed position `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u8> {
        if idx >= self.seq.len {
            return None;
        }
        Some(self.seq.load(self.seq.len - 1 - idx))
    }

    /// Iterate from the last field to the first.
    pub fn iter(&self) -> std::iter::Rev<Iter<'a>> {
        self.seq.iter().rev()
    }
}

/// Iterator over the values of a [`PackedSequence`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    seq: &'a PackedSequence,
    front: usize,
    back: usize,
}

impl Iterator for Iter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let value = self.seq.load(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.seq.load(self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}
