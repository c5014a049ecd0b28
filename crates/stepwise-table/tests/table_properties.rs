//! Model-based checks: every variant must agree with a plain map over
//! any operation sequence that stays within capacity.

use std::collections::HashMap;

use proptest::prelude::*;

use stepwise_table::{BucketTable, ChainingTable, EngineError, ProbingTable};

#[derive(Clone, Debug)]
enum Op {
    Insert(String, i32),
    Delete(String),
    Search(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let key = "[a-e]{1,2}";
    prop_oneof![
        (key, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        key.prop_map(Op::Delete),
        key.prop_map(Op::Search),
    ]
}

proptest! {
    #[test]
    fn variants_agree_with_a_model(ops in prop::collection::vec(op_strategy(), 1..40)) {
        // key space is at most 30 distinct keys, so a 64-slot probe
        // table can never fill up and a 64-deep bucket can never
        // overflow
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut chaining = ChainingTable::new(8).unwrap();
        let mut probing = ProbingTable::new(64).unwrap();
        let mut bucket = BucketTable::new(8, 64).unwrap();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    chaining.insert(&k, v).expect_ok("within capacity");
                    probing.insert(&k, v).expect_ok("within capacity");
                    bucket.insert(&k, v).expect_ok("within capacity");
                    model.insert(k, v);
                }
                Op::Delete(k) => {
                    let present = model.remove(&k).is_some();
                    prop_assert_eq!(chaining.delete(&k).is_ok(), present);
                    prop_assert_eq!(probing.delete(&k).is_ok(), present);
                    prop_assert_eq!(bucket.delete(&k).is_ok(), present);
                    if !present {
                        let report = chaining.delete(&k);
                        prop_assert_eq!(
                            report.error(),
                            Some(&EngineError::NotFound)
                        );
                    }
                }
                Op::Search(k) => {
                    let expected = model.get(&k).copied();
                    prop_assert_eq!(chaining.search(&k).expect_ok("lookup runs"), expected);
                    prop_assert_eq!(probing.search(&k).expect_ok("lookup runs"), expected);
                    prop_assert_eq!(bucket.search(&k).expect_ok("lookup runs"), expected);
                }
            }
            prop_assert_eq!(chaining.len(), model.len());
            prop_assert_eq!(probing.len(), model.len());
            prop_assert_eq!(bucket.len(), model.len());
        }
    }

    #[test]
    fn probing_survives_churn_at_full_load(rounds in 1usize..50) {
        // a table that is repeatedly filled and drained must keep
        // resolving keys even when no slot is empty any more
        let mut table = ProbingTable::new(4).unwrap();
        for r in 0..rounds {
            for i in 0..4 {
                table.insert(&format!("r{r}i{i}"), i as i32).expect_ok("table has room");
            }
            prop_assert_eq!(table.len(), 4);
            for i in 0..4 {
                let key = format!("r{r}i{i}");
                prop_assert_eq!(table.search(&key).expect_ok("lookup runs"), Some(i as i32));
                table.delete(&key).expect_ok("stored key");
            }
            prop_assert_eq!(table.len(), 0);
        }
    }
}
