use thiserror::Error;

use super::PackedSequence;

/// Bits used to encode one nucleotide symbol (16-letter IUPAC alphabet).
pub const BITS_PER_SYMBOL: usize = 4;
/// Number of symbols in the nucleotide alphabet.
pub const ALPHABET_SIZE: usize = 16;

const SYMBOLS: [u8; ALPHABET_SIZE] = *b"ACGTURYKMSWBDHVN";

/// Nucleotide codes, including uracil and the IUPAC ambiguity letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
    /// Uracil.
    U = 4,
    /// A or G.
    R = 5,
    /// C or T.
    Y = 6,
    /// G or T.
    K = 7,
    /// A or C.
    M = 8,
    /// C or G.
    S = 9,
    /// A or T.
    W = 10,
    /// Not A.
    B = 11,
    /// Not C.
    D = 12,
    /// Not G.
    H = 13,
    /// Not T.
    V = 14,
    /// Any base.
    N = 15,
}

impl Nucleotide {
    const ALL: [Nucleotide; ALPHABET_SIZE] = [
        Nucleotide::A,
        Nucleotide::C,
        Nucleotide::G,
        Nucleotide::T,
        Nucleotide::U,
        Nucleotide::R,
        Nucleotide::Y,
        Nucleotide::K,
        Nucleotide::M,
        Nucleotide::S,
        Nucleotide::W,
        Nucleotide::B,
        Nucleotide::D,
        Nucleotide::H,
        Nucleotide::V,
        Nucleotide::N,
    ];

    /// Parse an ASCII letter (either case).
    pub fn from_ascii(symbol: u8) -> Option<Self> {
        let upper = symbol.to_ascii_uppercase();
        SYMBOLS
            .iter()
            .position(|&s| s == upper)
            .map(|code| Self::ALL[code])
    }

    /// Look up the nucleotide for a 4-bit code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// 4-bit code stored in packed sequences.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Uppercase ASCII letter.
    #[inline]
    pub fn as_ascii(self) -> u8 {
        SYMBOLS[self as usize]
    }

    /// Uppercase letter as a `char`.
    #[inline]
    pub fn as_char(self) -> char {
        self.as_ascii() as char
    }
}

/// Letter for a packed nucleotide code. Codes are 4 bits wide, so every value
/// maps to a letter.
#[inline]
pub(crate) fn code_to_char(code: u8) -> char {
    SYMBOLS[(code as usize) & (ALPHABET_SIZE - 1)] as char
}

/// Errors produced while encoding text into packed nucleotides.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The input contained a character outside the nucleotide alphabet.
    #[error("unsupported nucleotide '{symbol}' at position {position}")]
    UnsupportedSymbol {
        /// Offending character.
        symbol: char,
        /// Offset within the input.
        position: usize,
    },
}

/// Encode ASCII nucleotide text into a 4-bit packed sequence.
///
/// The whole input is rejected on the first character outside the alphabet.
pub fn encode_sequence(text: &[u8]) -> Result<PackedSequence, EncodeError> {
    let mut packed = PackedSequence::new(text.len(), BITS_PER_SYMBOL);
    for (position, &symbol) in text.iter().enumerate() {
        let base = Nucleotide::from_ascii(symbol).ok_or(EncodeError::UnsupportedSymbol {
            symbol: symbol as char,
            position,
        })?;
        packed.put(position, base.code());
    }
    Ok(packed)
}

/// Decode a 4-bit packed sequence back into uppercase letters.
pub fn decode_sequence(sequence: &PackedSequence) -> String {
    debug_assert_eq!(sequence.width(), BITS_PER_SYMBOL);
    sequence.iter().map(code_to_char).collect()
}
