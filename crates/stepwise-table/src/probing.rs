//! Linear probing: open addressing with tombstone deletion.
//!
//! A tombstone marks "deleted", never "free": probes for a lookup or a
//! delete walk straight past them and stop only at a truly empty slot.
//! An insert also scans past tombstones (the key might live beyond one)
//! but remembers the first tombstone it crossed and reuses that slot
//! when the key turns out to be absent, so deleted slots are reclaimed
//! without ever breaking an existing probe chain.

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

use crate::{hash, Entry};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot<V> {
    Empty,
    Occupied(Entry<V>),
    Tombstone,
}

#[derive(Clone, Debug)]
pub struct ProbingTable<V> {
    slots: Vec<Slot<V>>,
    len: usize,
}

impl<V: Clone> ProbingTable<V> {
    pub fn new(capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidInput(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
        })
    }

    /// Insert or update. Placement order: the key's own slot if it is
    /// already present anywhere on its probe chain, else the first
    /// tombstone crossed, else the first empty slot.
    pub fn insert(&mut self, key: &str, value: V) -> Report<usize> {
        let mut trace = Trace::new();
        let cap = self.slots.len();
        let home = hash::djb2(key, cap);
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {home}"),
            vec![home as NodeId],
        );

        let mut reusable: Option<usize> = None;
        for i in 0..cap {
            let idx = (home + i) % cap;
            match &mut self.slots[idx] {
                Slot::Empty => {
                    let target = reusable.unwrap_or(idx);
                    trace.add(
                        StepKind::Insert,
                        if target == idx {
                            format!("slot {idx} is empty: placing {key:?}")
                        } else {
                            format!(
                                "slot {idx} is empty, so {key:?} is new: \
                                 reusing the tombstone at slot {target}"
                            )
                        },
                        vec![target as NodeId],
                    );
                    self.slots[target] = Slot::Occupied(Entry::new(key, value));
                    self.len += 1;
                    return Report::ok(target, trace);
                }
                Slot::Occupied(entry) if entry.key == key => {
                    trace.add(
                        StepKind::Update,
                        format!("slot {idx} already holds {key:?}: replacing its value"),
                        vec![idx as NodeId],
                    );
                    entry.value = value;
                    return Report::ok(idx, trace);
                }
                Slot::Occupied(entry) => {
                    trace.add(
                        StepKind::Probe,
                        format!("slot {idx} holds {:?}: probing on", entry.key),
                        vec![idx as NodeId],
                    );
                }
                Slot::Tombstone => {
                    trace.add(
                        StepKind::Tombstone,
                        format!("slot {idx} is a tombstone: probing on"),
                        vec![idx as NodeId],
                    );
                    if reusable.is_none() {
                        reusable = Some(idx);
                    }
                }
            }
        }

        // the whole table was probed without an empty slot or a match
        if let Some(target) = reusable {
            trace.add(
                StepKind::Insert,
                format!("probed every slot: reusing the tombstone at slot {target}"),
                vec![target as NodeId],
            );
            self.slots[target] = Slot::Occupied(Entry::new(key, value));
            self.len += 1;
            return Report::ok(target, trace);
        }
        trace.add(
            StepKind::Info,
            format!("probed all {cap} slots without a free one"),
            vec![],
        );
        Report::err(
            EngineError::CapacityExceeded(format!("table of {cap} slots is full")),
            trace,
        )
    }

    /// Probes stop only at an empty slot or a key match, never at a
    /// tombstone.
    pub fn search(&self, key: &str) -> Report<Option<V>> {
        let mut trace = Trace::new();
        let cap = self.slots.len();
        let home = hash::djb2(key, cap);
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {home}"),
            vec![home as NodeId],
        );

        for i in 0..cap {
            let idx = (home + i) % cap;
            match &self.slots[idx] {
                Slot::Empty => {
                    trace.add(
                        StepKind::NotFound,
                        format!("slot {idx} is empty: {key:?} is not in the table"),
                        vec![idx as NodeId],
                    );
                    return Report::ok(None, trace);
                }
                Slot::Occupied(entry) if entry.key == key => {
                    trace.add(
                        StepKind::Found,
                        format!("found {key:?} in slot {idx}"),
                        vec![idx as NodeId],
                    );
                    return Report::ok(Some(entry.value.clone()), trace);
                }
                Slot::Occupied(entry) => {
                    trace.add(
                        StepKind::Probe,
                        format!("slot {idx} holds {:?}: probing on", entry.key),
                        vec![idx as NodeId],
                    );
                }
                Slot::Tombstone => {
                    trace.add(
                        StepKind::Tombstone,
                        format!("slot {idx} is a tombstone: probing on"),
                        vec![idx as NodeId],
                    );
                }
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("probed all {cap} slots: {key:?} is not in the table"),
            vec![],
        );
        Report::ok(None, trace)
    }

    /// Deleting writes a tombstone; the slot never returns to empty.
    pub fn delete(&mut self, key: &str) -> Report<usize> {
        let mut trace = Trace::new();
        let cap = self.slots.len();
        let home = hash::djb2(key, cap);
        trace.add(
            StepKind::Probe,
            format!("{key:?} hashes to slot {home}"),
            vec![home as NodeId],
        );

        for i in 0..cap {
            let idx = (home + i) % cap;
            match &self.slots[idx] {
                Slot::Empty => {
                    trace.add(
                        StepKind::NotFound,
                        format!("slot {idx} is empty: {key:?} is not in the table"),
                        vec![idx as NodeId],
                    );
                    return Report::err(EngineError::NotFound, trace);
                }
                Slot::Occupied(entry) if entry.key == key => {
                    self.slots[idx] = Slot::Tombstone;
                    self.len -= 1;
                    trace.add(
                        StepKind::Tombstone,
                        format!("removing {key:?}: slot {idx} becomes a tombstone"),
                        vec![idx as NodeId],
                    );
                    return Report::ok(idx, trace);
                }
                Slot::Occupied(entry) => {
                    trace.add(
                        StepKind::Probe,
                        format!("slot {idx} holds {:?}: probing on", entry.key),
                        vec![idx as NodeId],
                    );
                }
                Slot::Tombstone => {
                    trace.add(
                        StepKind::Tombstone,
                        format!("slot {idx} is a tombstone: probing on"),
                        vec![idx as NodeId],
                    );
                }
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("probed all {cap} slots: {key:?} is not in the table"),
            vec![],
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

    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    pub fn snapshot(&self) -> Vec<Slot<V>> {
        self.slots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "a", "b", "c" all land on slot 0 of a 1-sized probe space; use a
    // small prime capacity and keys picked to collide
    fn colliders(capacity: usize, n: usize) -> Vec<String> {
        let target = hash::djb2("seed", capacity);
        let mut out = Vec::new();
        let mut i = 0;
        while out.len() < n {
            let key = format!("k{i}");
            if hash::djb2(&key, capacity) == target {
                out.push(key);
            }
            i += 1;
        }
        out
    }

    #[test]
    fn collisions_probe_forward() {
        let keys = colliders(7, 3);
        let mut table = ProbingTable::new(7).unwrap();
        let s0 = table.insert(&keys[0], 0).expect_ok("insert runs");
        let s1 = table.insert(&keys[1], 1).expect_ok("insert runs");
        let s2 = table.insert(&keys[2], 2).expect_ok("insert runs");
        assert_eq!(s1, (s0 + 1) % 7);
        assert_eq!(s2, (s0 + 2) % 7);
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(table.search(k).expect_ok("lookup runs"), Some(i));
        }
    }

    #[test]
    fn search_walks_past_tombstones() {
        let keys = colliders(7, 3);
        let mut table = ProbingTable::new(7).unwrap();
        for (i, k) in keys.iter().enumerate() {
            table.insert(k, i).expect_ok("insert runs");
        }
        // delete the middle of the probe chain
        table.delete(&keys[1]).expect_ok("stored key");
        assert_eq!(table.tombstones(), 1);

        let report = table.search(&keys[2]);
        assert!(report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Tombstone));
        assert_eq!(report.expect_ok("lookup runs"), Some(2));
    }

    #[test]
    fn insert_reuses_a_tombstone_only_for_absent_keys() {
        let keys = colliders(7, 3);
        let mut table = ProbingTable::new(7).unwrap();
        for (i, k) in keys.iter().enumerate() {
            table.insert(k, i).expect_ok("insert runs");
        }
        let freed = table.delete(&keys[0]).expect_ok("stored key");

        // updating a key that lives beyond the tombstone must not
        // double-place it
        let slot = table.insert(&keys[2], 22).expect_ok("update runs");
        assert_ne!(slot, freed);
        assert_eq!(table.len(), 2);

        // a genuinely new key may reclaim the tombstone
        let fresh = colliders(7, 4).pop().unwrap();
        let slot = table.insert(&fresh, 9).expect_ok("insert runs");
        assert_eq!(slot, freed);
        assert_eq!(table.tombstones(), 0);
    }

    #[test]
    fn round_trip_ends_not_found() {
        let mut table = ProbingTable::new(5).unwrap();
        table.insert("x", 1).expect_ok("insert runs");
        table.delete("x").expect_ok("stored key");
        assert_eq!(table.search("x").expect_ok("lookup runs"), None);
        assert_eq!(table.delete("x").error(), Some(&EngineError::NotFound));
    }

    #[test]
    fn full_table_reports_capacity() {
        let mut table = ProbingTable::new(3).unwrap();
        for (i, k) in ["a", "b", "c"].iter().enumerate() {
            table.insert(k, i).expect_ok("insert runs");
        }
        let report = table.insert("d", 3);
        assert!(matches!(
            report.error(),
            Some(EngineError::CapacityExceeded(_))
        ));
        assert_eq!(table.len(), 3);

        // freeing one slot makes the next insert land in its tombstone
        table.delete("b").expect_ok("stored key");
        let slot = table.insert("d", 3).expect_ok("insert runs");
        assert_eq!(table.search("d").expect_ok("lookup runs"), Some(3));
        assert!(slot < 3);
    }

    #[test]
    fn a_fully_probed_search_terminates() {
        // all slots occupied or tombstoned, key absent
        let mut table = ProbingTable::new(3).unwrap();
        for (i, k) in ["a", "b", "c"].iter().enumerate() {
            table.insert(k, i).expect_ok("insert runs");
        }
        table.delete("a").expect_ok("stored key");
        assert_eq!(table.search("zz").expect_ok("lookup runs"), None);
    }
}
