use step_forest::trie::Trie;
use step_forest::{EngineError, StepKind};

#[test]
fn trie_dictionary_matrix() {
    let mut trie = Trie::new();
    let words = [
        "a", "an", "ant", "and", "bat", "bath", "cat", "can", "cane",
    ];
    for w in words {
        trie.insert(w).expect_ok("fresh word");
        trie.validate().unwrap();
    }
    assert_eq!(trie.len(), words.len());
    assert_eq!(
        trie.words(),
        vec!["a", "an", "and", "ant", "bat", "bath", "can", "cane", "cat"]
    );

    for w in words {
        assert!(trie.contains(w), "missing {w:?}");
    }
    assert!(!trie.contains("ca"));
    assert!(!trie.contains("bats"));
}

#[test]
fn trie_shared_prefix_fanout_matrix() {
    let mut trie = Trie::new();
    for w in ["tea", "ted", "ten"] {
        trie.insert(w).expect_ok("fresh word");
    }
    // inserting a sibling reuses the shared prefix path
    let report = trie.insert("tex");
    assert!(report.is_ok());
    let visits = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::Visit)
        .count();
    let inserts = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::Insert)
        .count();
    assert_eq!(visits, 2);
    assert_eq!(inserts, 1);
}

#[test]
fn trie_delete_ladder_matrix() {
    let mut trie = Trie::new();
    let words = ["car", "card", "care", "cared", "cares", "carp"];
    for w in words {
        trie.insert(w).expect_ok("fresh word");
    }
    for w in ["cared", "card", "car", "cares", "care", "carp"] {
        trie.delete(w).expect_ok("stored word");
        trie.validate().unwrap();
    }
    assert!(trie.is_empty());
    assert_eq!(trie.words(), Vec::<String>::new());
    // only the root survives a full drain
    assert_eq!(trie.entries().len(), 1);
}

#[test]
fn trie_failure_modes_matrix() {
    let mut trie = Trie::new();
    trie.insert("cat").expect_ok("fresh word");

    assert_eq!(trie.insert("cat").error(), Some(&EngineError::DuplicateKey));
    assert_eq!(trie.delete("dog").error(), Some(&EngineError::NotFound));
    assert_eq!(trie.delete("ca").error(), Some(&EngineError::NotFound));
    assert!(matches!(
        trie.insert("").error(),
        Some(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        trie.search("c4t").error(),
        Some(EngineError::InvalidInput(_))
    ));
    assert_eq!(trie.len(), 1);
    trie.validate().unwrap();
}

#[test]
fn trie_search_reports_the_walk_matrix() {
    let mut trie = Trie::new();
    trie.insert("stone").expect_ok("fresh word");

    let hit = trie.search("stone").expect_ok("lookup runs");
    assert!(hit.found);
    assert_eq!(hit.path.len(), 5);

    let miss = trie.search("stop").expect_ok("a miss is still a result");
    assert!(!miss.found);
    // "sto" matched before the walk fell off
    assert_eq!(miss.path.len(), 3);
}
