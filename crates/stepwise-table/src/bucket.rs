//! Bucketed hashing: every slot is a bucket of fixed capacity.
//!
//! Unlike chaining there is no growth path: a full bucket rejects the
//! insert outright. The deliberate capacity bound makes overflow an
//! observable outcome instead of a silently longer chain.

use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

use crate::{hash, Entry};

#[derive(Clone, Debug)]
pub struct BucketTable<V> {
    buckets: Vec<Vec<Entry<V>>>,
    bucket_capacity: usize,
    len: usize,
}

impl<V: Clone> BucketTable<V> {
    pub fn new(capacity: usize, bucket_capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 || bucket_capacity == 0 {
            return Err(EngineError::InvalidInput(
                "capacity and bucket capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            buckets: vec![Vec::new(); capacity],
            bucket_capacity,
            len: 0,
        })
    }

    /// Insert or update; a full bucket is an explicit failure.
    pub fn insert(&mut self, key: &str, value: V) -> Report<usize> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.buckets.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to bucket {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.buckets[slot].iter_mut().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at position {i}", entry.key),
                vec![slot as NodeId],
            );
            if entry.key == key {
                entry.value = value;
                trace.add(
                    StepKind::Update,
                    format!("replacing the value under {key:?}"),
                    vec![slot as NodeId],
                );
                return Report::ok(slot, trace);
            }
        }

        if self.buckets[slot].len() == self.bucket_capacity {
            trace.add(
                StepKind::Info,
                format!(
                    "bucket {slot} already holds {} entries",
                    self.bucket_capacity
                ),
                vec![slot as NodeId],
            );
            return Report::err(
                EngineError::CapacityExceeded(format!("bucket {slot} is full")),
                trace,
            );
        }

        self.buckets[slot].push(Entry::new(key, value));
        self.len += 1;
        trace.add(
            StepKind::Insert,
            format!(
                "placing {key:?} in bucket {slot} ({} of {})",
                self.buckets[slot].len(),
                self.bucket_capacity
            ),
            vec![slot as NodeId],
        );
        Report::ok(slot, trace)
    }

    pub fn search(&self, key: &str) -> Report<Option<V>> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.buckets.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to bucket {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.buckets[slot].iter().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at position {i}", entry.key),
                vec![slot as NodeId],
            );
            if entry.key == key {
                trace.add(
                    StepKind::Found,
                    format!("found {key:?} in bucket {slot}"),
                    vec![slot as NodeId],
                );
                return Report::ok(Some(entry.value.clone()), trace);
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("{key:?} is not in bucket {slot}"),
            vec![slot as NodeId],
        );
        Report::ok(None, trace)
    }

    pub fn delete(&mut self, key: &str) -> Report<()> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.buckets.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to bucket {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.buckets[slot].iter().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at position {i}", entry.key),
                vec![slot as NodeId],
            );
            if entry.key == key {
                self.buckets[slot].remove(i);
                self.len -= 1;
                trace.add(
                    StepKind::Remove,
                    format!("removing {key:?} from bucket {slot}"),
                    vec![slot as NodeId],
                );
                return Report::ok((), trace);
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("{key:?} is not in bucket {slot}"),
            vec![slot as NodeId],
        );
        Report::err(EngineError::NotFound, trace)
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / (self.buckets.len() * self.bucket_capacity) as f64
    }

    pub fn snapshot(&self) -> Vec<Vec<Entry<V>>> {
        self.buckets.clone()
    }
}
