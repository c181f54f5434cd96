use tracing::debug;

use crate::sequence::PackedSequence;

use super::banded::solve_bounded;
use super::hamming::mismatches;
use super::{AlignError, Comparison};

/// Parameters for the exponential search over the band radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Bound tried first.
    pub initial_radius: usize,
    /// Largest bound tried. `None` derives one from the inputs: the Hamming
    /// distance for equal lengths, otherwise the longer length.
    pub ceiling: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_radius: 1,
            ceiling: None,
        }
    }
}

impl SearchConfig {
    /// Start the search at `radius` instead of 1.
    pub fn with_initial_radius(mut self, radius: usize) -> Self {
        self.initial_radius = radius;
        self
    }

    /// Cap the search at an explicit bound.
    pub fn with_ceiling(mut self, ceiling: usize) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Ceiling used for a given pair of inputs.
    pub fn ceiling_for(&self, a: &PackedSequence, b: &PackedSequence) -> usize {
        self.ceiling.unwrap_or_else(|| natural_ceiling(a, b))
    }
}

/// Upper bound on the edit distance that is always solvable.
fn natural_ceiling(a: &PackedSequence, b: &PackedSequence) -> usize {
    if a.len() == b.len() {
        mismatches(a, b)
    } else {
        a.len().max(b.len())
    }
}

/// Exponential search starting at radius 1 and capped at `ceiling`.
pub fn search(
    a: &PackedSequence,
    b: &PackedSequence,
    ceiling: usize,
) -> Result<Comparison, AlignError> {
    search_with(a, b, &SearchConfig::default().with_ceiling(ceiling))
}

/// Double the band radius until the bounded solver succeeds.
///
/// Each failed attempt costs roughly `n * radius` cells, so the total work
/// stays close to `O(n * d)` for a true distance `d`. A ceiling below the
/// true distance yields [`AlignError::CeilingExceeded`]; the derived ceilings
/// never do.
pub fn search_with(
    a: &PackedSequence,
    b: &PackedSequence,
    config: &SearchConfig,
) -> Result<Comparison, AlignError> {
    let ceiling = config.ceiling_for(a, b);
    let mut radius = config.initial_radius.min(ceiling);

    loop {
        if let Some(found) = solve_bounded(a, b, radius) {
            debug!(
                radius,
                ceiling,
                distance = found.distance,
                edits = found.edits.len(),
                "bounded solve succeeded"
            );
            return Ok(found);
        }
        if radius >= ceiling {
            return Err(AlignError::CeilingExceeded { ceiling });
        }

        let next = radius.saturating_mul(2).max(1).min(ceiling);
        debug!(radius, next, ceiling, "band exceeded, widening");
        radius = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::encode_sequence;

    #[test]
    fn finds_distance_beyond_initial_radius() {
        let a = encode_sequence(b"AAAAAAAAAA").unwrap();
        let b = encode_sequence(b"TTTTTAAAAA").unwrap();
        let found = search(&a, &b, 5).unwrap();
        assert_eq!(found.distance, 5);
    }

    #[test]
    fn ceiling_below_distance_is_reported() {
        let a = encode_sequence(b"AAAA").unwrap();
        let b = encode_sequence(b"TTTT").unwrap();
        assert!(matches!(
            search(&a, &b, 2),
            Err(AlignError::CeilingExceeded { ceiling: 2 })
        ));
    }

    #[test]
    fn zero_ceiling_handles_identical_inputs() {
        let a = encode_sequence(b"ACGT").unwrap();
        let found = search(&a, &a, 0).unwrap();
        assert_eq!(found.distance, 0);
    }

    #[test]
    fn derived_ceiling_covers_unequal_lengths() {
        let a = encode_sequence(b"ACGTACGT").unwrap();
        let b = encode_sequence(b"CG").unwrap();
        let config = SearchConfig::default();
        assert_eq!(config.ceiling_for(&a, &b), 8);
        let found = search_with(&a, &b, &config).unwrap();
        assert_eq!(found.distance, 6);
    }

    #[test]
    fn zero_initial_radius_still_grows() {
        let a = encode_sequence(b"ACGTT").unwrap();
        let b = encode_sequence(b"AGGTA").unwrap();
        let config = SearchConfig::default().with_initial_radius(0);
        let found = search_with(&a, &b, &config).unwrap();
        assert_eq!(found.distance, 2);
    }
}
