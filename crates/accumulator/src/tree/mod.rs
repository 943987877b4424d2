//! Incremental Merkle tree with path-authenticated updates.
//!
//! This module provides:
//! - The incremental tree itself (strict left-to-right insertion,
//!   O(depth) per operation)
//! - Sibling-path extraction and membership verification
//! - Proof-gated in-place leaf updates

mod incremental;
mod path;

#[cfg(test)]
mod tests;

pub use incremental::IncrementalMerkleTree;
pub use path::MerklePath;
