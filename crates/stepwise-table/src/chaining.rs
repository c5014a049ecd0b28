//! Separate chaining: every slot owns a growable chain of entries.

use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

use crate::{hash, Entry};

#[derive(Clone, Debug)]
pub struct ChainingTable<V> {
    slots: Vec<Vec<Entry<V>>>,
    len: usize,
}

impl<V: Clone> ChainingTable<V> {
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidInput(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            slots: vec![Vec::new(); capacity],
            len: 0,
        })
    }

    /// Insert or update; a repeated key replaces its value in place.
    pub fn insert(&mut self, key: &str, value: V) -> Report<usize> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.slots.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.slots[slot].iter_mut().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at chain position {i}", entry.key),
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

        self.slots[slot].push(Entry::new(key, value));
        self.len += 1;
        trace.add(
            StepKind::Insert,
            format!(
                "appending {key:?} to slot {slot} (chain length {})",
                self.slots[slot].len()
            ),
            vec![slot as NodeId],
        );
        Report::ok(slot, trace)
    }

    /// A miss is a successful lookup with no value.
    pub fn search(&self, key: &str) -> Report<Option<V>> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.slots.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.slots[slot].iter().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at chain position {i}", entry.key),
                vec![slot as NodeId],
            );
            if entry.key == key {
                trace.add(
                    StepKind::Found,
                    format!("found {key:?} in slot {slot}"),
                    vec![slot as NodeId],
                );
                return Report::ok(Some(entry.value.clone()), trace);
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("{key:?} is not in slot {slot}'s chain"),
            vec![slot as NodeId],
        );
        Report::ok(None, trace)
    }

    pub fn delete(&mut self, key: &str) -> Report<()> {
        let mut trace = Trace::new();
        let slot = hash::djb2(key, self.slots.len());
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {slot}"),
            vec![slot as NodeId],
        );

        for (i, entry) in self.slots[slot].iter().enumerate() {
            trace.add(
                StepKind::Compare,
                format!("comparing with {:?} at chain position {i}", entry.key),
                vec![slot as NodeId],
            );
            if entry.key == key {
                self.slots[slot].remove(i);
                self.len -= 1;
                trace.add(
                    StepKind::Remove,
                    format!("removing {key:?} from slot {slot}"),
                    vec![slot as NodeId],
                );
                return Report::ok((), trace);
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("{key:?} is not in slot {slot}'s chain"),
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
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Longest chain currently held; hosts surface it as a collision gauge.
    pub fn max_chain(&self) -> usize {
        self.slots.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn snapshot(&self) -> Vec<Vec<Entry<V>>> {
        self.slots.clone()
    }
}
