//! Unbalanced binary search tree engine.
//!
//! The plainest of the tree engines: no balance metadata, no restructuring
//! beyond the textbook insert/delete. The balanced engines share its
//! descent shape and layer rotations on top.

use std::fmt::Display;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::links::{self, Descent, KeyLinks, LevelEntry, TreeLinks};

#[derive(Clone, Debug)]
pub struct BstNode<K> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub k: K,
}

impl<K> BstNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
        }
    }
}

impl<K> TreeLinks for BstNode<K> {
    fn p(&self) -> Option<NodeId> {
        self.p
    }
    fn l(&self) -> Option<NodeId> {
        self.l
    }
    fn r(&self) -> Option<NodeId> {
        self.r
    }
    fn set_p(&mut self, v: Option<NodeId>) {
        self.p = v;
    }
    fn set_l(&mut self, v: Option<NodeId>) {
        self.l = v;
    }
    fn set_r(&mut self, v: Option<NodeId>) {
        self.r = v;
    }
}

impl<K> KeyLinks<K> for BstNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}

/// Binary search tree over an arena of [`BstNode`]s.
///
/// Arena slots are never reused, so a node id stays valid for the life of
/// the tree and a host can key its animations on it. `len` counts live
/// nodes only.
#[derive(Clone, Debug, Default)]
pub struct BstTree<K> {
    arena: Vec<BstNode<K>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K: Ord + Clone + Display> BstTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    fn alloc(&mut self, k: K) -> NodeId {
        let id = self.arena.len() as NodeId;
        self.arena.push(BstNode::new(k));
        id
    }

    /// Insert `key`, reporting every comparison on the way down.
    ///
    /// A duplicate leaves the tree untouched and reports
    /// [`EngineError::DuplicateKey`].
    pub fn insert(&mut self, key: K) -> Report<NodeId> {
        let mut trace = Trace::new();
        match links::descend(&self.arena, self.root, &key, &mut trace) {
            Descent::Hit { node, .. } => {
                trace.add(StepKind::Info, format!("{key} is already present"), vec![node]);
                Report::err(EngineError::DuplicateKey, trace)
            }
            Descent::Miss {
                parent, go_left, ..
            } => {
                let id = self.attach(key, parent, go_left, &mut trace);
                Report::ok(id, trace)
            }
        }
    }

    /// Search for `key`. A miss is a successful outcome with
    /// `found == false`; the probe path is reported either way.
    pub fn search(&self, key: &K) -> Report<SearchOutcome> {
        let mut trace = Trace::new();
        match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, path } => {
                trace.add(StepKind::Found, format!("found {key}"), vec![node]);
                Report::ok(SearchOutcome::hit(path), trace)
            }
            Descent::Miss { path, .. } => {
                trace.add(
                    StepKind::NotFound,
                    format!("{key} is not in the tree"),
                    path.clone(),
                );
                Report::ok(SearchOutcome::miss(path), trace)
            }
        }
    }

    /// Delete `key`. A node with two children swaps in its in-order
    /// successor's key and the successor node is removed instead.
    pub fn delete(&mut self, key: &K) -> Report<()> {
        let mut trace = Trace::new();
        let target = match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, .. } => node,
            Descent::Miss { path, .. } => {
                trace.add(StepKind::NotFound, format!("{key} is not in the tree"), path);
                return Report::err(EngineError::NotFound, trace);
            }
        };
        let removed = self.remove_node(target, &mut trace);
        let (root, _) = links::splice_out(&mut self.arena, self.root, removed);
        self.root = root;
        self.len -= 1;
        Report::ok((), trace)
    }

    /// Common two-child handling: copy the in-order successor's key over
    /// the target and return the node to physically unlink.
    fn remove_node(&mut self, target: NodeId, trace: &mut Trace) -> NodeId {
        let node = &self.arena[target as usize];
        let removed = if let (Some(_), Some(r)) = (node.l, node.r) {
            let succ = links::first(&self.arena, Some(r)).expect("right subtree is non-empty");
            let succ_key = self.arena[succ as usize].k.clone();
            trace.add(
                StepKind::Update,
                format!(
                    "replacing {} with its in-order successor {succ_key}",
                    self.arena[target as usize].k
                ),
                vec![target, succ],
            );
            self.arena[target as usize].k = succ_key;
            succ
        } else {
            target
        };
        trace.add(
            StepKind::Remove,
            format!("removing {}", self.arena[removed as usize].k),
            vec![removed],
        );
        removed
    }

    fn attach(&mut self, key: K, parent: Option<NodeId>, go_left: bool, trace: &mut Trace) -> NodeId {
        let id = self.alloc(key);
        match parent {
            None => {
                self.root = Some(id);
                trace.add(
                    StepKind::Insert,
                    format!("inserting {} as the root", self.arena[id as usize].k),
                    vec![id],
                );
            }
            Some(p) => {
                self.arena[id as usize].p = Some(p);
                let side = if go_left { "left" } else { "right" };
                if go_left {
                    self.arena[p as usize].l = Some(id);
                } else {
                    self.arena[p as usize].r = Some(id);
                }
                trace.add(
                    StepKind::Insert,
                    format!(
                        "inserting {} as the {side} child of {}",
                        self.arena[id as usize].k, self.arena[p as usize].k
                    ),
                    vec![id, p],
                );
            }
        }
        self.len += 1;
        id
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn key_of(&self, id: NodeId) -> Option<&K> {
        self.arena.get(id as usize).map(|n| &n.k)
    }

    /// Height in nodes; an empty tree is 0.
    pub fn height(&self) -> usize {
        links::subtree_height(&self.arena, self.root)
    }

    pub fn to_sorted_vec(&self) -> Vec<K> {
        links::in_order_keys(&self.arena, self.root)
    }

    pub fn level_entries(&self) -> Vec<LevelEntry<K>> {
        links::level_entries(&self.arena, self.root)
    }

    /// Check the search-tree invariants; for tests and debugging.
    pub fn validate(&self) -> Result<(), String> {
        links::assert_search_tree(&self.arena, self.root)?;
        let walked = self.to_sorted_vec().len();
        if walked != self.len {
            return Err(format!("len is {} but the walk found {walked}", self.len));
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        links::print_subtree(&self.arena, self.root, "", &|i| {
            format!("Node[{i}] {{ {} }}", self.arena[i as usize].k)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_search_delete_round_trip() {
        let mut tree = BstTree::new();
        for k in [50, 30, 70, 20, 40, 60, 80] {
            assert!(tree.insert(k).is_ok());
            tree.validate().unwrap();
        }
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.to_sorted_vec(), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.height(), 3);

        let hit = tree.search(&40);
        let outcome = hit.expect_ok("40 is present");
        assert!(outcome.found);
        assert_eq!(outcome.path.len(), 3);

        assert!(tree.delete(&30).is_ok());
        tree.validate().unwrap();
        assert_eq!(tree.to_sorted_vec(), vec![20, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn duplicate_insert_is_rejected_without_mutation() {
        let mut tree = BstTree::new();
        tree.insert(5).expect_ok("fresh key");
        let before = tree.to_sorted_vec();

        let report = tree.insert(5);
        assert_eq!(report.error(), Some(&EngineError::DuplicateKey));
        assert_eq!(tree.to_sorted_vec(), before);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn delete_miss_reports_not_found() {
        let mut tree = BstTree::new();
        let report = tree.delete(&9);
        assert_eq!(report.error(), Some(&EngineError::NotFound));

        tree.insert(1).expect_ok("fresh key");
        let report = tree.delete(&9);
        assert_eq!(report.error(), Some(&EngineError::NotFound));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn two_child_delete_promotes_successor() {
        let mut tree = BstTree::new();
        for k in [50, 30, 70, 60, 80] {
            tree.insert(k).expect_ok("fresh key");
        }
        // 70 has two children; 80 is its successor
        tree.delete(&70).expect_ok("70 is present");
        tree.validate().unwrap();
        assert_eq!(tree.to_sorted_vec(), vec![30, 50, 60, 80]);
    }

    #[test]
    fn search_miss_reports_probe_path() {
        let mut tree = BstTree::new();
        for k in [8, 4, 12] {
            tree.insert(k).expect_ok("fresh key");
        }
        let report = tree.search(&5);
        assert!(report.steps.iter().any(|s| s.kind == StepKind::NotFound));
        let outcome = report.expect_ok("miss is not an error");
        assert!(!outcome.found);
        assert_eq!(outcome.path.len(), 2);
    }
}
