//! Loading genomes for the command-line front end.
//!
//! The alignment core never reads files; this module turns FASTA text into
//! packed sequences and applies the common-length policy the core expects.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::sequence::{encode_sequence, EncodeError, PackedSequence};

/// Errors raised while loading sequences.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The record had no sequence lines.
    #[error("record contains no sequence data")]
    Empty,

    /// The sequence contained characters outside the nucleotide alphabet.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Parse the first record of FASTA text, or a bare sequence without header.
///
/// Sequence lines are concatenated with surrounding whitespace removed;
/// parsing stops at the second header.
pub fn parse_fasta(text: &str) -> Result<PackedSequence, LoadError> {
    let mut sequence = Vec::with_capacity(text.len());
    let mut seen_header = false;

    for line in text.lines().map(str::trim) {
        if line.starts_with('>') {
            if seen_header || !sequence.is_empty() {
                break;
            }
            seen_header = true;
            continue;
        }
        sequence.extend_from_slice(line.as_bytes());
    }

    if sequence.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(encode_sequence(&sequence)?)
}

/// Read and encode the first record of a FASTA file.
pub fn read_fasta(path: impl AsRef<Path>) -> Result<PackedSequence, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let sequence = parse_fasta(&text)?;
    debug!(path = %path.display(), len = sequence.len(), "loaded sequence");
    Ok(sequence)
}

/// Truncate every sequence to the shortest length in the set.
///
/// Returns the common length (0 for an empty set).
pub fn truncate_to_common_length(sequences: &mut [PackedSequence]) -> usize {
    let common = sequences.iter().map(PackedSequence::len).min().unwrap_or(0);
    for sequence in sequences.iter_mut() {
        sequence.truncate(common);
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::decode_sequence;

    #[test]
    fn header_is_skipped_and_lines_joined() {
        let seq = parse_fasta(">MN908947.3 test genome\nACGT\nacgn\r\n\n").unwrap();
        assert_eq!(decode_sequence(&seq), "ACGTACGN");
    }

    #[test]
    fn only_first_record_is_read() {
        let seq = parse_fasta(">one\nAC\nGT\n>two\nTTTT\n").unwrap();
        assert_eq!(decode_sequence(&seq), "ACGT");
    }

    #[test]
    fn bare_sequence_without_header() {
        let seq = parse_fasta("GATTACA\n").unwrap();
        assert_eq!(seq.len(), 7);
    }

    #[test]
    fn empty_record_is_an_error() {
        assert!(matches!(parse_fasta(">empty\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn invalid_symbols_are_reported() {
        assert!(matches!(
            parse_fasta(">bad\nACGZ\n"),
            Err(LoadError::Encode(EncodeError::UnsupportedSymbol {
                symbol: 'Z',
                position: 3
            }))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_fasta("/nonexistent/genome.fasta").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/genome.fasta"));
    }

    #[test]
    fn truncation_uses_shortest_sequence() {
        let mut seqs = vec![
            encode_sequence(b"ACGTACGT").unwrap(),
            encode_sequence(b"ACG").unwrap(),
            encode_sequence(b"ACGTA").unwrap(),
        ];
        assert_eq!(truncate_to_common_length(&mut seqs), 3);
        assert!(seqs.iter().all(|s| s.len() == 3));
        assert_eq!(decode_sequence(&seqs[0]), "ACG");
        assert_eq!(truncate_to_common_length(&mut []), 0);
    }
}
