//! Packed symbol storage and the nucleotide alphabet.
//!
//! Every sequence the aligner touches lives in a [`PackedSequence`]: genomes
//! as 4-bit nucleotide codes, edit scripts and DP traces as 2-bit operation
//! codes.

mod alphabet;
mod packed;

pub use alphabet::{
    decode_sequence, encode_sequence, EncodeError, Nucleotide, ALPHABET_SIZE, BITS_PER_SYMBOL,
};
pub(crate) use alphabet::code_to_char;
pub use packed::{Iter, PackedError, PackedSequence, Reversed, MAX_FIELD_WIDTH};
