//! Randomized consistency checks: any distinct key set, inserted in any
//! order, must leave every engine valid and holding exactly that set.

use std::collections::HashSet;

use proptest::prelude::*;

use step_forest::avl::AvlTree;
use step_forest::bplus::BPlusTree;
use step_forest::btree::BTree;
use step_forest::red_black::RbTree;
use step_forest::splay::SplayTree;

fn sorted(keys: &HashSet<i32>) -> Vec<i32> {
    let mut v: Vec<i32> = keys.iter().copied().collect();
    v.sort_unstable();
    v
}

proptest! {
    #[test]
    fn avl_holds_any_key_set(keys in prop::collection::hash_set(-5_000i32..5_000, 1..120)) {
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        prop_assert_eq!(tree.to_sorted_vec(), sorted(&keys));
    }

    #[test]
    fn avl_survives_deleting_half(keys in prop::collection::hash_set(-5_000i32..5_000, 2..120)) {
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k).expect_ok("fresh key");
        }
        let all = sorted(&keys);
        let (gone, kept) = all.split_at(all.len() / 2);
        for k in gone {
            tree.delete(k).expect_ok("stored key");
            tree.validate().unwrap();
        }
        prop_assert_eq!(tree.to_sorted_vec(), kept.to_vec());
    }

    #[test]
    fn red_black_holds_any_key_set(keys in prop::collection::hash_set(-5_000i32..5_000, 1..120)) {
        let mut tree = RbTree::new();
        for &k in &keys {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        prop_assert_eq!(tree.to_sorted_vec(), sorted(&keys));
    }

    #[test]
    fn red_black_survives_deleting_half(keys in prop::collection::hash_set(-5_000i32..5_000, 2..120)) {
        let mut tree = RbTree::new();
        for &k in &keys {
            tree.insert(k).expect_ok("fresh key");
        }
        let all = sorted(&keys);
        let (gone, kept) = all.split_at(all.len() / 2);
        for k in gone {
            tree.delete(k).expect_ok("stored key");
            tree.validate().unwrap();
        }
        prop_assert_eq!(tree.to_sorted_vec(), kept.to_vec());
    }

    #[test]
    fn splay_finds_everything_it_holds(keys in prop::collection::hash_set(-5_000i32..5_000, 1..100)) {
        let mut tree = SplayTree::new();
        for &k in &keys {
            tree.insert(k).expect_ok("fresh key");
        }
        for &k in &keys {
            let outcome = tree.search(&k).expect_ok("lookup runs");
            prop_assert!(outcome.found);
            tree.validate().unwrap();
        }
        prop_assert_eq!(tree.to_sorted_vec(), sorted(&keys));
    }

    #[test]
    fn multiway_trees_hold_any_key_set(
        order in 3usize..7,
        keys in prop::collection::hash_set(-5_000i32..5_000, 1..150),
    ) {
        let mut bt = BTree::new(order).unwrap();
        let mut bp = BPlusTree::new(order).unwrap();
        for &k in &keys {
            bt.insert(k).expect_ok("fresh key");
            bp.insert(k).expect_ok("fresh key");
        }
        bt.validate().unwrap();
        bp.validate().unwrap();
        let expected = sorted(&keys);
        prop_assert_eq!(bt.to_sorted_vec(), expected.clone());
        prop_assert_eq!(bp.to_sorted_vec(), expected);
    }
}
