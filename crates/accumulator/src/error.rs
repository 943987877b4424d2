//! Typed failures for tree operations.

use thiserror::Error;

/// Errors that can occur during tree operations.
///
/// All variants are fatal to the invoking call: a failed `insert` or
/// `update` leaves the tree state unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Insert attempted on a full tree.
    #[error("tree is full: all {capacity} leaf slots are occupied")]
    CapacityExceeded { capacity: u64 },

    /// Operation referenced a leaf slot that has never been inserted.
    #[error("leaf {index} has not been inserted (next free slot is {next_index})")]
    LeafNotInserted { index: u64, next_index: u64 },

    /// Supplied path does not authenticate the leaf currently stored.
    #[error("path does not authenticate the current leaf at index {index}")]
    ProofMismatch { index: u64 },
}
