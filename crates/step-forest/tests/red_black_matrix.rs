use step_forest::red_black::{Color, RbTree};
use step_forest::{EngineError, StepKind};

#[test]
fn red_black_smoke_matrix() {
    let mut tree = RbTree::new();
    for k in [10, 20, 30, 15, 25, 5, 1] {
        tree.insert(k).expect_ok("fresh key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.to_sorted_vec(), vec![1, 5, 10, 15, 20, 25, 30]);
    assert_eq!(tree.color_of(tree.root().unwrap()), Some(Color::Black));
}

#[test]
fn red_black_ladder_insert_delete_matrix() {
    let mut tree = RbTree::new();

    for i in 0..300 {
        tree.insert(i).expect_ok("fresh key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), 300);
    // red-black height is at most 2 * log2(n + 1)
    assert!(tree.height() <= 17, "height {} is too tall", tree.height());

    for i in (0..300).step_by(3) {
        tree.delete(&i).expect_ok("stored key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), 200);

    for i in 0..300 {
        let outcome = tree.search(&i).expect_ok("lookup runs");
        assert_eq!(outcome.found, i % 3 != 0, "wrong membership for {i}");
    }
}

#[test]
fn red_black_descending_ladder_matrix() {
    let mut tree = RbTree::new();
    for i in (0..200).rev() {
        tree.insert(i).expect_ok("fresh key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.to_sorted_vec(), (0..200).collect::<Vec<_>>());
}

#[test]
fn red_black_trace_shows_repairs_matrix() {
    let mut tree = RbTree::new();
    tree.insert(10).expect_ok("fresh key");
    tree.insert(20).expect_ok("fresh key");

    // third ascending key forces the first rotation
    let report = tree.insert(30);
    assert!(report.is_ok());
    assert!(report.steps.iter().any(|s| s.kind == StepKind::Rotate));
    assert!(report.steps.iter().any(|s| s.kind == StepKind::Recolor));
    tree.validate().unwrap();
}

#[test]
fn red_black_failure_modes_matrix() {
    let mut tree = RbTree::new();
    assert_eq!(
        tree.delete(&1).error(),
        Some(&EngineError::NotFound)
    );

    tree.insert(1).expect_ok("fresh key");
    assert_eq!(tree.insert(1).error(), Some(&EngineError::DuplicateKey));
    assert_eq!(tree.len(), 1);

    let outcome = tree.search(&2).expect_ok("a miss is still a result");
    assert!(!outcome.found);
}

#[test]
fn red_black_interior_deletions_matrix() {
    let mut tree = RbTree::new();
    for i in 0..100 {
        tree.insert(i).expect_ok("fresh key");
    }
    // interior keys exercise the successor copy path
    for i in [50, 25, 75, 37, 62, 12, 88] {
        tree.delete(&i).expect_ok("stored key");
        tree.validate().unwrap();
    }
    assert_eq!(tree.len(), 93);
    assert!(!tree.search(&50).expect_ok("lookup runs").found);
    assert!(tree.search(&51).expect_ok("lookup runs").found);
}
