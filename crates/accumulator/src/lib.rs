//! Incremental Merkle accumulator for ZK membership proofs.
//!
//! This crate provides:
//! - `IncrementalMerkleTree`: fixed-depth tree with O(depth) left-to-right
//!   insertion over lazily-materialized zero subtrees
//! - `MerklePath`: sibling paths for membership verification and
//!   proof-gated in-place leaf updates
//! - `PoseidonHasher`: a Poseidon instance over the BN254 scalar field
//!   implementing the injected `TreeHasher` collaborator

pub mod error;
pub mod hash;
pub mod poseidon;
pub mod tree;

pub use error::TreeError;
pub use hash::TreeHasher;
pub use poseidon::{
    poseidon_config, poseidon_hash, poseidon_hash_many, poseidon_hash_two, PoseidonHasher,
};
pub use tree::{IncrementalMerkleTree, MerklePath};

use ark_bn254::Fr;

/// Digest domain of the bundled Poseidon hasher
pub type Digest = Fr;
