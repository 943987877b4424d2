//! Hash collaborator injected into the tree.

use ark_ff::PrimeField;

/// Two-input and N-input compression over a shared prime field.
///
/// Implementations must be pure, deterministic and collision-resistant;
/// digests and leaves live in the same field `F`. The tree combines child
/// digests exclusively through `hash_many(&[left, right])`.
pub trait TreeHasher<F: PrimeField> {
    /// Hash an ordered pair of digests.
    fn hash_pair(&self, left: F, right: F) -> F;

    /// Hash an ordered sequence of digests.
    fn hash_many(&self, inputs: &[F]) -> F;
}
