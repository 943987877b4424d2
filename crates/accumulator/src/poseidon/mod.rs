//! Poseidon hash function for BN254.
//!
//! Uses arkworks' built-in Poseidon sponge with standard parameters. This is
//! the concrete [`TreeHasher`](crate::hash::TreeHasher) shipped with the
//! crate; callers with their own compression function can inject it instead.

mod config;
mod native;


pub use config::poseidon_config;
pub use native::{poseidon_hash, poseidon_hash_many, poseidon_hash_two, PoseidonHasher};
