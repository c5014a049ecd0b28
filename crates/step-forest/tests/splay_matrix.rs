use step_forest::splay::SplayTree;
use step_forest::{EngineError, StepKind};

#[test]
fn splay_smoke_matrix() {
    let mut tree = SplayTree::new();
    for k in [10, 20, 30, 40, 50] {
        let id = tree.insert(k).expect_ok("fresh key");
        // a fresh insert always finishes at the root
        assert_eq!(tree.root(), Some(id));
        tree.validate().unwrap();
    }
    assert_eq!(tree.key_of(tree.root().unwrap()), Some(&50));
    assert_eq!(tree.to_sorted_vec(), vec![10, 20, 30, 40, 50]);
}

#[test]
fn splay_search_reshapes_matrix() {
    let mut tree = SplayTree::new();
    for k in 0..64 {
        tree.insert(k).expect_ok("fresh key");
    }
    // ascending inserts leave a left spine; one search folds it up
    assert_eq!(tree.height(), 64);
    let outcome = tree.search(&0).expect_ok("lookup runs");
    assert!(outcome.found);
    assert_eq!(tree.key_of(tree.root().unwrap()), Some(&0));
    assert!(tree.height() <= 34);
    tree.validate().unwrap();
}

#[test]
fn splay_miss_changes_nothing_matrix() {
    let mut tree = SplayTree::new();
    for k in [40, 20, 60, 10, 30] {
        tree.insert(k).expect_ok("fresh key");
    }
    let before = tree.level_entries();
    let outcome = tree.search(&35).expect_ok("a miss is still a result");
    assert!(!outcome.found);
    assert!(!outcome.path.is_empty());
    assert_eq!(tree.level_entries(), before);
}

#[test]
fn splay_ladder_insert_delete_matrix() {
    let mut tree = SplayTree::new();
    for i in 0..300 {
        tree.insert(i).expect_ok("fresh key");
        tree.validate().unwrap();
    }
    for i in (0..300).step_by(2) {
        tree.delete(&i).expect_ok("stored key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), 150);
    assert_eq!(
        tree.to_sorted_vec(),
        (0..300).filter(|i| i % 2 == 1).collect::<Vec<_>>()
    );
}

#[test]
fn splay_failure_modes_matrix() {
    let mut tree = SplayTree::new();
    tree.insert(5).expect_ok("fresh key");

    // a duplicate is rejected before any splaying happens
    let dup = tree.insert(5);
    assert_eq!(dup.error(), Some(&EngineError::DuplicateKey));
    assert!(!dup.steps.iter().any(|s| s.kind == StepKind::Rotate));

    assert_eq!(tree.delete(&6).error(), Some(&EngineError::NotFound));
    assert_eq!(tree.len(), 1);
}

#[test]
fn splay_repeated_access_keeps_hot_key_shallow_matrix() {
    let mut tree = SplayTree::new();
    for k in 0..100 {
        tree.insert(k).expect_ok("fresh key");
    }
    for _ in 0..5 {
        let outcome = tree.search(&42).expect_ok("lookup runs");
        assert!(outcome.found);
        assert_eq!(tree.key_of(tree.root().unwrap()), Some(&42));
    }
    // the second lookup of a hot key is a single comparison
    let report = tree.search(&42);
    let compares = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::Compare)
        .count();
    assert_eq!(compares, 1);
    assert!(report.is_ok());
}
