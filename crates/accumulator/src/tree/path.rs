//! Authentication path structure for membership verification.

use ark_ff::PrimeField;

use crate::hash::TreeHasher;

/// An authentication path for one leaf.
///
/// Contains the sibling digests from the leaf level up to the level below
/// the root, together with the `(level, sibling_index)` position each digest
/// was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath<F: PrimeField> {
    /// Sibling digests, leaf level (0) first
    siblings: Vec<F>,

    /// (level, sibling index) for each entry of `siblings`
    positions: Vec<(usize, u64)>,
}

impl<F: PrimeField> MerklePath<F> {
    /// Create a new path.
    pub fn new(siblings: Vec<F>, positions: Vec<(usize, u64)>) -> Self {
        assert_eq!(
            siblings.len(),
            positions.len(),
            "siblings and positions must have same length"
        );
        Self { siblings, positions }
    }

    /// Get the sibling digests.
    pub fn siblings(&self) -> &[F] {
        &self.siblings
    }

    /// Get the (level, sibling index) pairs.
    pub fn positions(&self) -> &[(usize, u64)] {
        &self.positions
    }

    /// Get the number of levels covered by this path.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Fold the path from `leaf` at `leaf_index` up to a candidate root.
    ///
    /// At each level the parity of the running index decides whether the
    /// current digest is the left or the right child.
    pub fn compute_root<H: TreeHasher<F>>(&self, leaf_index: u64, leaf: F, hasher: &H) -> F {
        let mut index = leaf_index;
        let mut current = leaf;

        for sibling in &self.siblings {
            current = if index & 1 == 0 {
                hasher.hash_many(&[current, *sibling])
            } else {
                hasher.hash_many(&[*sibling, current])
            };
            index >>= 1;
        }

        current
    }
}
