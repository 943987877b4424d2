//! Integration tests for the tree module.

use super::*;
use ark_bn254::Fr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::TreeError;
use crate::hash::TreeHasher;
use crate::poseidon::PoseidonHasher;

fn tree(depth: usize) -> IncrementalMerkleTree<Fr, PoseidonHasher> {
    IncrementalMerkleTree::new(depth, Fr::from(0u64), PoseidonHasher::new())
}

#[test]
fn test_fill_depth_three_and_verify_all() {
    // Depth 3, capacity 8: insert v0..v7 and authenticate every slot.
    let mut tree = tree(3);

    let leaves: Vec<Fr> = (10..18u64).map(Fr::from).collect();
    for leaf in &leaves {
        tree.insert(*leaf).unwrap();
    }

    for (i, leaf) in leaves.iter().enumerate() {
        let path = tree.path_of(i as u64).unwrap();
        assert!(tree
            .leaf_exists(i as u64, *leaf, path.siblings())
            .unwrap());
    }

    // The 9th insert fails and mutates nothing.
    let root = tree.root();
    assert_eq!(
        tree.insert(Fr::from(999u64)).unwrap_err(),
        TreeError::CapacityExceeded { capacity: 8 }
    );
    assert_eq!(tree.root(), root);
    assert_eq!(tree.next_index(), 8);
}

#[test]
fn test_unrelated_value_does_not_verify() {
    let mut tree = tree(3);

    for i in 0..4u64 {
        tree.insert(Fr::from(100 + i)).unwrap();
    }

    // Path authenticates leaf 2; a different value under the same path fails.
    let path = tree.path_of(2).unwrap();
    assert!(tree.leaf_exists(2, Fr::from(102u64), path.siblings()).unwrap());
    assert!(!tree
        .leaf_exists(2, Fr::from(4444u64), path.siblings())
        .unwrap());

    // A path for another slot does not authenticate this one either.
    let other = tree.path_of(1).unwrap();
    assert!(!tree
        .leaf_exists(2, Fr::from(102u64), other.siblings())
        .unwrap());
}

#[test]
fn test_update_rotates_values() {
    let mut tree = tree(3);

    for i in 0..8u64 {
        tree.insert(Fr::from(i)).unwrap();
    }

    let mut previous = Fr::from(1u64);
    for w in [50u64, 51, 52, 53] {
        let new_leaf = Fr::from(w);
        let path = tree.path_of(1).unwrap();
        tree.update(1, new_leaf, path.siblings()).unwrap();

        let fresh = tree.path_of(1).unwrap();
        assert!(tree.leaf_exists(1, new_leaf, fresh.siblings()).unwrap());
        assert!(!tree.leaf_exists(1, previous, fresh.siblings()).unwrap());
        assert_eq!(tree.leaf(1), Some(new_leaf));

        previous = new_leaf;
    }
}

#[test]
fn test_update_requires_pre_update_proof() {
    let mut tree = tree(3);
    tree.insert(Fr::from(7u64)).unwrap();
    tree.insert(Fr::from(8u64)).unwrap();

    // A path taken before another mutation no longer authenticates.
    let stale = tree.path_of(0).unwrap();
    tree.insert(Fr::from(9u64)).unwrap();

    let root = tree.root();
    assert_eq!(
        tree.update(0, Fr::from(70u64), stale.siblings()).unwrap_err(),
        TreeError::ProofMismatch { index: 0 }
    );
    assert_eq!(tree.root(), root);
    assert_eq!(tree.leaf(0), Some(Fr::from(7u64)));

    // A fresh path goes through.
    let fresh = tree.path_of(0).unwrap();
    tree.update(0, Fr::from(70u64), fresh.siblings()).unwrap();
    assert_eq!(tree.leaf(0), Some(Fr::from(70u64)));
}

#[test]
fn test_update_preserves_other_leaves() {
    let mut tree = tree(3);

    for i in 0..8u64 {
        tree.insert(Fr::from(i)).unwrap();
    }

    let path = tree.path_of(5).unwrap();
    tree.update(5, Fr::from(500u64), path.siblings()).unwrap();

    for i in 0..8u64 {
        let expected = if i == 5 { Fr::from(500u64) } else { Fr::from(i) };
        let path = tree.path_of(i).unwrap();
        assert!(tree.leaf_exists(i, expected, path.siblings()).unwrap());
    }
}

#[test]
fn test_reads_do_not_mutate() {
    let mut tree = tree(4);

    for i in 0..5u64 {
        tree.insert(Fr::from(i)).unwrap();
    }

    let root = tree.root();
    let first = tree.path_of(3).unwrap();

    for _ in 0..10 {
        let path = tree.path_of(3).unwrap();
        assert_eq!(path, first);
        assert!(tree.leaf_exists(3, Fr::from(3u64), path.siblings()).unwrap());
    }

    assert_eq!(tree.root(), root);
}

#[test]
fn test_path_positions_name_siblings() {
    let mut tree = tree(3);

    for i in 0..6u64 {
        tree.insert(Fr::from(i)).unwrap();
    }

    // Leaf 5 = 0b101: sibling indices are 4, 3, 0 at levels 0, 1, 2.
    let path = tree.path_of(5).unwrap();
    assert_eq!(path.positions(), &[(0, 4), (1, 3), (2, 0)]);
    assert_eq!(path.depth(), 3);
}

#[test]
fn test_path_compute_root_matches_tree() {
    let hasher = PoseidonHasher::new();
    let mut tree = tree(4);

    for i in 0..9u64 {
        tree.insert(Fr::from(i * i + 1)).unwrap();
    }

    for i in 0..9u64 {
        let path = tree.path_of(i).unwrap();
        let candidate = path.compute_root(i, tree.leaf(i).unwrap(), &hasher);
        assert_eq!(candidate, tree.root());
    }
}

#[test]
fn test_partial_fill_uses_zero_siblings() {
    let hasher = PoseidonHasher::new();
    let mut tree = tree(3);

    let leaf = Fr::from(42u64);
    tree.insert(leaf).unwrap();

    // With one leaf, every sibling on the path is a zero subtree.
    let path = tree.path_of(0).unwrap();
    for (level, sibling) in path.siblings().iter().enumerate() {
        assert_eq!(*sibling, tree.zero_at_level(level));
    }

    let mut expected = leaf;
    for level in 0..3 {
        expected = hasher.hash_many(&[expected, tree.zero_at_level(level)]);
    }
    assert_eq!(tree.root(), expected);
}

#[test]
fn test_randomized_fill_and_verify() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = tree(6);

    let leaves: Vec<Fr> = (0..64).map(|_| Fr::from(rng.gen::<u64>())).collect();
    for leaf in &leaves {
        tree.insert(*leaf).unwrap();
    }

    for (i, leaf) in leaves.iter().enumerate() {
        let path = tree.path_of(i as u64).unwrap();
        assert!(tree.leaf_exists(i as u64, *leaf, path.siblings()).unwrap());
        assert!(!tree
            .leaf_exists(i as u64, *leaf + Fr::from(1u64), path.siblings())
            .unwrap());
    }
}

#[test]
fn test_same_insertions_same_root() {
    let mut t1 = tree(4);
    let mut t2 = tree(4);

    for i in 0..7u64 {
        t1.insert(Fr::from(i)).unwrap();
        t2.insert(Fr::from(i)).unwrap();
    }

    assert_eq!(t1.root(), t2.root());
}
