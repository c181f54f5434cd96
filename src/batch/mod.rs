//! Fan-out of one-against-many comparisons with a publish-once results table.
//!
//! Each slot of a [`ResultTable`] is written by exactly one worker. Writing
//! goes through [`OnceLock`], so a reader either sees nothing or the complete
//! [`Comparison`]; there is no window in which a half-written result is
//! visible.

use std::sync::OnceLock;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::align::{compare_with, AlignError, Comparison, SearchConfig};
use crate::sequence::PackedSequence;

/// Errors raised while publishing into a [`ResultTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Slot index beyond the table.
    #[error("slot {slot} out of range for table of {len} slots")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots in the table.
        len: usize,
    },

    /// The slot already holds a result.
    #[error("slot {0} already holds a result")]
    AlreadyPublished(usize),
}

/// Errors from a batch comparison.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Publishing into the results table failed.
    #[error("results table error: {0}")]
    Table(#[from] TableError),

    /// One of the pairwise comparisons failed.
    #[error("comparison for slot {slot} failed: {source}")]
    Align {
        /// Slot of the failing pair.
        slot: usize,
        /// Underlying error.
        #[source]
        source: AlignError,
    },
}

/// Fixed set of write-once result slots, one per comparison pair.
#[derive(Debug, Default)]
pub struct ResultTable {
    slots: Vec<OnceLock<Comparison>>,
}

impl ResultTable {
    /// Create a table with `len` empty slots.
    pub fn with_slots(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` for a table without slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store the result for `slot`. Each slot accepts exactly one result.
    pub fn publish(&self, slot: usize, result: Comparison) -> Result<(), TableError> {
        let cell = self.slots.get(slot).ok_or(TableError::SlotOutOfRange {
            slot,
            len: self.slots.len(),
        })?;
        cell.set(result).map_err(|_| TableError::AlreadyPublished(slot))
    }

    /// Result for `slot`, once published.
    pub fn get(&self, slot: usize) -> Option<&Comparison> {
        self.slots.get(slot).and_then(OnceLock::get)
    }

    /// Number of slots holding a result.
    pub fn completed(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    /// Whether every slot holds a result.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.get().is_some())
    }

    /// Consume the table, yielding each slot's result.
    pub fn into_results(self) -> Vec<Option<Comparison>> {
        self.slots.into_iter().map(OnceLock::into_inner).collect()
    }
}

/// Compare `base` against each of `others` in parallel.
///
/// The result for `others[i]` is published into slot `i` of `table`. Work
/// runs on the current rayon pool; wrap the call in `ThreadPool::install` to
/// choose a different one.
pub fn compare_against(
    base: &PackedSequence,
    others: &[PackedSequence],
    config: &SearchConfig,
    table: &ResultTable,
) -> Result<(), BatchError> {
    if others.len() > table.len() {
        return Err(TableError::SlotOutOfRange {
            slot: others.len() - 1,
            len: table.len(),
        }
        .into());
    }

    others
        .par_iter()
        .enumerate()
        .try_for_each(|(slot, other)| -> Result<(), BatchError> {
            let result = compare_with(base, other, config)
                .map_err(|source| BatchError::Align { slot, source })?;
            let distance = result.distance;
            table.publish(slot, result)?;
            debug!(slot, distance, "comparison published");
            Ok(())
        })?;

    info!(pairs = others.len(), "batch comparison complete");
    Ok(())
}
