//! Bounded edit distance between packed sequences.
//!
//! The pipeline is: Hamming prefilter for an initial ceiling, exponential
//! search over the band radius, banded DP for each attempt, and a backtrace
//! over the recorded per-row choices once an attempt succeeds.
//!
//! All entry points are plain synchronous functions over borrowed inputs and
//! are safe to call from any number of threads at once.

mod backtrace;
mod banded;
mod edits;
mod hamming;
mod search;

pub use backtrace::backtrace;
pub use banded::{fill_band, solve_bounded, BandTrace};
pub use edits::{EditOp, EditScript, BITS_PER_EDIT};
pub use hamming::hamming;
pub use search::{search, search_with, SearchConfig};

use thiserror::Error;

use crate::sequence::PackedSequence;

/// Errors surfaced by the alignment entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    /// Inputs that must have equal length did not.
    #[error("sequence lengths differ: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// The true distance is larger than the caller-supplied ceiling.
    #[error("edit distance exceeds ceiling {ceiling}")]
    CeilingExceeded {
        /// Ceiling that was searched up to.
        ceiling: usize,
    },
}

/// Exact edit distance of a pair together with one optimal alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Levenshtein distance.
    pub distance: usize,
    /// Alignment columns from the start of both sequences.
    pub edits: EditScript,
}

impl Comparison {
    /// Share of `len` positions not accounted for by edits, in percent.
    pub fn percent_identity(&self, len: usize) -> f64 {
        if len == 0 {
            return 100.0;
        }
        100.0 * (1.0 - self.distance as f64 / len as f64)
    }
}

/// Compare two equal-length sequences: Hamming ceiling plus exponential search.
pub fn compare(a: &PackedSequence, b: &PackedSequence) -> Result<Comparison, AlignError> {
    compare_with(a, b, &SearchConfig::default())
}

/// [`compare`] with explicit search parameters.
///
/// The search never goes past the Hamming distance; an explicit ceiling can
/// only lower it.
pub fn compare_with(
    a: &PackedSequence,
    b: &PackedSequence,
    config: &SearchConfig,
) -> Result<Comparison, AlignError> {
    let prefilter = hamming(a, b)?;
    search_with(a, b, &config.with_ceiling(capped_ceiling(config, prefilter)))
}

fn capped_ceiling(config: &SearchConfig, prefilter: usize) -> usize {
    config
        .ceiling
        .map_or(prefilter, |ceiling| ceiling.min(prefilter))
}

/// Edit distance for sequences of any lengths.
pub fn levenshtein(a: &PackedSequence, b: &PackedSequence) -> Comparison {
    match search_with(a, b, &SearchConfig::default()) {
        Ok(found) => found,
        Err(err) => unreachable!("derived ceiling is always solvable: {err}"),
    }
}
