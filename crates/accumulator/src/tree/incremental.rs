//! Incremental Merkle tree native implementation.
//!
//! The tree has a fixed depth and is sparsely populated: leaves are appended
//! strictly left to right, and subtrees no insertion has visited are
//! represented by precomputed all-zero digests instead of materialized
//! nodes. Insertion therefore rehashes a single path of `depth` nodes
//! rather than the whole tree.

use std::collections::HashMap;

use ark_ff::PrimeField;

use super::path::MerklePath;
use crate::error::TreeError;
use crate::hash::TreeHasher;

/// Incremental Merkle tree over a prime field, compressing with `H`.
///
/// Capacity is `2^depth` leaves. Leaves may only be appended in order via
/// [`insert`](Self::insert) or overwritten via [`update`](Self::update),
/// never removed.
#[derive(Clone)]
pub struct IncrementalMerkleTree<F: PrimeField, H: TreeHasher<F>> {
    /// Tree depth (number of levels from leaves to root)
    depth: usize,

    /// Injected compression function
    hasher: H,

    /// Digest of an entirely empty subtree per level; `zeros[0]` is the
    /// zero leaf value
    zeros: Vec<F>,

    /// Most recently completed left subtree per level, the default left
    /// sibling for the next right-child insertion at that level
    filled_subtrees: Vec<F>,

    /// Sparse node storage: (level, index) -> digest.
    /// Absent entries read as the zero subtree for their level.
    nodes: HashMap<(usize, u64), F>,

    /// Inserted leaves in insertion order
    leaves: Vec<F>,

    /// Next free leaf slot
    next_index: u64,

    /// Current root digest
    root: F,
}

impl<F: PrimeField, H: TreeHasher<F>> IncrementalMerkleTree<F, H> {
    /// Create an empty tree of the given depth.
    ///
    /// `zero_value` stands in for every never-written leaf position. The
    /// empty-tree root is `H(zeros[depth-1], zeros[depth-1])`.
    pub fn new(depth: usize, zero_value: F, hasher: H) -> Self {
        assert!(depth >= 1, "depth must be at least 1");
        assert!(depth < 64, "depth must leave leaf indices addressable by u64");

        let mut zeros = Vec::with_capacity(depth);
        zeros.push(zero_value);
        for level in 1..depth {
            let below = zeros[level - 1];
            zeros.push(hash_left_right(&hasher, below, below));
        }

        let top = zeros[depth - 1];
        let root = hash_left_right(&hasher, top, top);

        Self {
            depth,
            hasher,
            filled_subtrees: zeros.clone(),
            zeros,
            nodes: HashMap::new(),
            leaves: Vec::new(),
            next_index: 0,
            root,
        }
    }

    /// Append `leaf` at the next free slot.
    ///
    /// Because insertion is strictly left to right, the right sibling of a
    /// left child is always the zero subtree at that level on first touch,
    /// so only one leaf-to-root path is rehashed.
    pub fn insert(&mut self, leaf: F) -> Result<(), TreeError> {
        if self.next_index == self.capacity() {
            return Err(TreeError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let mut index = self.next_index;
        let mut current = leaf;

        for level in 0..self.depth {
            let (left, right) = if index & 1 == 0 {
                self.filled_subtrees[level] = current;
                (current, self.zeros[level])
            } else {
                (self.filled_subtrees[level], current)
            };

            let pair_base = index & !1;
            self.nodes.insert((level, pair_base), left);
            self.nodes.insert((level, pair_base + 1), right);

            current = hash_left_right(&self.hasher, left, right);
            index >>= 1;
        }

        self.root = current;
        self.leaves.push(leaf);
        self.next_index += 1;

        Ok(())
    }

    /// Check whether `path` authenticates `leaf` at `leaf_index` against the
    /// current root. Read-only.
    ///
    /// Fails with `LeafNotInserted` when the slot has never been written; a
    /// path of the wrong length simply fails to authenticate.
    pub fn leaf_exists(&self, leaf_index: u64, leaf: F, path: &[F]) -> Result<bool, TreeError> {
        self.check_inserted(leaf_index)?;

        if path.len() != self.depth {
            return Ok(false);
        }

        let mut index = leaf_index;
        let mut current = leaf;

        for sibling in path {
            current = if index & 1 == 0 {
                hash_left_right(&self.hasher, current, *sibling)
            } else {
                hash_left_right(&self.hasher, *sibling, current)
            };
            index >>= 1;
        }

        Ok(current == self.root)
    }

    /// Replace the leaf at `leaf_index` with `new_leaf`.
    ///
    /// `path` must authenticate the leaf value currently stored at
    /// `leaf_index`. Requiring the pre-update proof keeps the node cache
    /// consistent with the path an external verifier already trusts; on
    /// success the cache along the leaf's path is rewritten from the
    /// supplied siblings.
    pub fn update(&mut self, leaf_index: u64, new_leaf: F, path: &[F]) -> Result<(), TreeError> {
        self.check_inserted(leaf_index)?;

        let current_leaf = self.leaves[leaf_index as usize];
        if !self.leaf_exists(leaf_index, current_leaf, path)? {
            return Err(TreeError::ProofMismatch { index: leaf_index });
        }

        // path.len() == depth here, authentication would have failed otherwise
        let mut index = leaf_index;
        let mut current = new_leaf;

        for (level, sibling) in path.iter().enumerate() {
            let (left, right) = if index & 1 == 0 {
                (current, *sibling)
            } else {
                (*sibling, current)
            };

            let pair_base = index & !1;
            self.nodes.insert((level, pair_base), left);
            self.nodes.insert((level, pair_base + 1), right);

            current = hash_left_right(&self.hasher, left, right);
            index >>= 1;
        }

        self.root = current;
        self.leaves[leaf_index as usize] = new_leaf;

        Ok(())
    }

    /// Produce the current authentication path for `leaf_index`.
    ///
    /// Returns the sibling digests from the leaf level upward together with
    /// the `(level, sibling_index)` position each one was read from.
    pub fn path_of(&self, leaf_index: u64) -> Result<MerklePath<F>, TreeError> {
        self.check_inserted(leaf_index)?;

        let mut siblings = Vec::with_capacity(self.depth);
        let mut positions = Vec::with_capacity(self.depth);

        let mut index = leaf_index;
        for level in 0..self.depth {
            let sibling_index = index ^ 1;
            siblings.push(self.node(level, sibling_index));
            positions.push((level, sibling_index));
            index >>= 1;
        }

        Ok(MerklePath::new(siblings, positions))
    }

    /// Get the current root digest.
    pub fn root(&self) -> F {
        self.root
    }

    /// Get the tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the leaf capacity, `2^depth`.
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// Get the next free leaf slot.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Get the leaf stored at `leaf_index`, if it has been inserted.
    pub fn leaf(&self, leaf_index: u64) -> Option<F> {
        self.leaves.get(leaf_index as usize).copied()
    }

    /// Get the number of inserted leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if no leaf has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Get the all-empty subtree digest for a level.
    pub fn zero_at_level(&self, level: usize) -> F {
        self.zeros[level]
    }

    /// Read a cached node digest, defaulting to the zero subtree for the
    /// level.
    fn node(&self, level: usize, index: u64) -> F {
        self.nodes
            .get(&(level, index))
            .copied()
            .unwrap_or(self.zeros[level])
    }

    fn check_inserted(&self, leaf_index: u64) -> Result<(), TreeError> {
        if leaf_index >= self.next_index {
            return Err(TreeError::LeafNotInserted {
                index: leaf_index,
                next_index: self.next_index,
            });
        }
        Ok(())
    }
}

/// Two-input combination used for every internal node.
fn hash_left_right<F: PrimeField, H: TreeHasher<F>>(hasher: &H, left: F, right: F) -> F {
    hasher.hash_many(&[left, right])
}
