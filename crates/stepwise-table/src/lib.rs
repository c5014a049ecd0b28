//! Stepwise hash table engines.
//!
//! Three collision strategies over the same djb2 slot function: unbounded
//! separate chaining, linear probing with tombstones, and buckets of
//! fixed capacity. Keys are strings, values generic. Every operation
//! returns a [`Report`] whose steps name each slot probed and each key
//! compared, with the slot index as the highlight id.
//!
//! Search misses are successful lookups (`Ok(None)`); only deleting an
//! absent key is an error.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`hash`] | djb2 over UTF-16 code units |
//! | [`chaining`] | [`ChainingTable`]: one growable chain per slot |
//! | [`probing`] | [`ProbingTable`]: open addressing, tombstone deletes |
//! | [`bucket`] | [`BucketTable`]: fixed-capacity buckets, explicit overflow |

use serde::{Deserialize, Serialize};

pub mod bucket;
pub mod chaining;
pub mod hash;
pub mod probing;

pub use bucket::BucketTable;
pub use chaining::ChainingTable;
pub use hash::djb2;
pub use probing::{ProbingTable, Slot};
pub use stepwise_core::{EngineError, NodeId, Report, Step, StepKind};

/// One stored key/value pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

impl<V> Entry<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}
