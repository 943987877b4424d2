//! Native Poseidon hashing (outside circuits).

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, PoseidonSponge};
use ark_crypto_primitives::sponge::CryptographicSponge;

use super::config::poseidon_config;
use crate::hash::TreeHasher;

/// Hash a single field element.
pub fn poseidon_hash(input: Fr) -> Fr {
    let config = poseidon_config();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&input);
    sponge.squeeze_field_elements(1)[0]
}

/// Hash two field elements.
pub fn poseidon_hash_two(a: Fr, b: Fr) -> Fr {
    poseidon_hash_many(&[a, b])
}

/// Hash multiple field elements.
pub fn poseidon_hash_many(inputs: &[Fr]) -> Fr {
    let config = poseidon_config();
    let mut sponge = PoseidonSponge::new(&config);
    for input in inputs {
        sponge.absorb(input);
    }
    sponge.squeeze_field_elements(1)[0]
}

/// Poseidon instance implementing [`TreeHasher`] over the BN254 scalar field.
///
/// Owns its sponge configuration so repeated hashing does not regenerate the
/// round constants on every call.
#[derive(Clone)]
pub struct PoseidonHasher {
    config: PoseidonConfig<Fr>,
}

impl PoseidonHasher {
    /// Create a hasher with the standard BN254 configuration.
    pub fn new() -> Self {
        Self {
            config: poseidon_config(),
        }
    }
}

impl Default for PoseidonHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHasher<Fr> for PoseidonHasher {
    fn hash_pair(&self, left: Fr, right: Fr) -> Fr {
        self.hash_many(&[left, right])
    }

    fn hash_many(&self, inputs: &[Fr]) -> Fr {
        let mut sponge = PoseidonSponge::new(&self.config);
        for input in inputs {
            sponge.absorb(input);
        }
        sponge.squeeze_field_elements(1)[0]
    }
}
