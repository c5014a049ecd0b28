//! AVL tree engine.
//!
//! Every node stores its subtree height (a leaf is 1). After an insert or
//! delete the engine walks the path back to the root, recomputing
//! `height = 1 + max(l, r)` and `balance = height(l) - height(r)`, and
//! repairs any node whose balance leaves `[-1, 1]`:
//!
//! * insert classifies LL/LR/RR/RL by comparing the inserted key with the
//!   heavy child's key;
//! * delete classifies by the heavy child's own balance sign and keeps
//!   walking, since one removal can unbalance several ancestors.

use std::fmt::Display;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::links::{self, Descent, KeyLinks, LevelEntry, TreeLinks};

#[derive(Clone, Debug)]
pub struct AvlNode<K> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub k: K,
    /// Height of the subtree rooted here; a leaf is 1.
    pub h: u32,
}

impl<K> AvlNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            h: 1,
        }
    }
}

impl<K> TreeLinks for AvlNode<K> {
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

impl<K> KeyLinks<K> for AvlNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}

#[derive(Clone, Debug, Default)]
pub struct AvlTree<K> {
    arena: Vec<AvlNode<K>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K: Ord + Clone + Display> AvlTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    #[inline]
    fn h(&self, n: Option<NodeId>) -> i32 {
        n.map(|i| self.arena[i as usize].h as i32).unwrap_or(0)
    }

    #[inline]
    fn update_height(&mut self, n: NodeId) {
        let l = self.h(self.arena[n as usize].l);
        let r = self.h(self.arena[n as usize].r);
        self.arena[n as usize].h = (1 + l.max(r)) as u32;
    }

    fn balance(&self, n: NodeId) -> i32 {
        self.h(self.arena[n as usize].l) - self.h(self.arena[n as usize].r)
    }

    fn rotate_left_at(&mut self, n: NodeId) -> NodeId {
        let top = links::rotate_left(&mut self.arena, n);
        self.update_height(n);
        self.update_height(top);
        if self.arena[top as usize].p.is_none() {
            self.root = Some(top);
        }
        top
    }

    fn rotate_right_at(&mut self, n: NodeId) -> NodeId {
        let top = links::rotate_right(&mut self.arena, n);
        self.update_height(n);
        self.update_height(top);
        if self.arena[top as usize].p.is_none() {
            self.root = Some(top);
        }
        top
    }

    pub fn insert(&mut self, key: K) -> Report<NodeId> {
        let mut trace = Trace::new();
        let (parent, go_left) =
            match links::descend(&self.arena, self.root, &key, &mut trace) {
                Descent::Hit { node, .. } => {
                    trace.add(StepKind::Info, format!("{key} is already present"), vec![node]);
                    return Report::err(EngineError::DuplicateKey, trace);
                }
                Descent::Miss {
                    parent, go_left, ..
                } => (parent, go_left),
            };

        let id = self.arena.len() as NodeId;
        self.arena.push(AvlNode::new(key.clone()));
        match parent {
            None => {
                self.root = Some(id);
                trace.add(StepKind::Insert, format!("inserting {key} as the root"), vec![id]);
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
                        "inserting {key} as the {side} child of {}",
                        self.arena[p as usize].k
                    ),
                    vec![id, p],
                );
            }
        }
        self.len += 1;
        self.rebalance_after_insert(parent, &key, &mut trace);
        Report::ok(id, trace)
    }

    /// Walk from the attach point to the root, recomputing heights and
    /// repairing the first over-tilted ancestor.
    fn rebalance_after_insert(&mut self, start: Option<NodeId>, key: &K, trace: &mut Trace) {
        let mut curr = start;
        while let Some(n) = curr {
            let parent = self.arena[n as usize].p;
            self.update_height(n);
            let b = self.balance(n);
            if b > 1 {
                let l = self.arena[n as usize].l.expect("left-heavy node has a left child");
                if *key < self.arena[l as usize].k {
                    trace.add(
                        StepKind::Rotate,
                        format!("LL imbalance at {}: rotating right", self.arena[n as usize].k),
                        vec![n, l],
                    );
                    self.rotate_right_at(n);
                } else {
                    let lr = self.arena[l as usize].r.expect("LR imbalance has a left-right grandchild");
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "LR imbalance at {}: rotating left around {}, then right",
                            self.arena[n as usize].k, self.arena[l as usize].k
                        ),
                        vec![n, l, lr],
                    );
                    self.rotate_left_at(l);
                    self.rotate_right_at(n);
                }
            } else if b < -1 {
                let r = self.arena[n as usize].r.expect("right-heavy node has a right child");
                if *key > self.arena[r as usize].k {
                    trace.add(
                        StepKind::Rotate,
                        format!("RR imbalance at {}: rotating left", self.arena[n as usize].k),
                        vec![n, r],
                    );
                    self.rotate_left_at(n);
                } else {
                    let rl = self.arena[r as usize].l.expect("RL imbalance has a right-left grandchild");
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "RL imbalance at {}: rotating right around {}, then left",
                            self.arena[n as usize].k, self.arena[r as usize].k
                        ),
                        vec![n, r, rl],
                    );
                    self.rotate_right_at(r);
                    self.rotate_left_at(n);
                }
            }
            curr = parent;
        }
    }

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

    pub fn delete(&mut self, key: &K) -> Report<()> {
        let mut trace = Trace::new();
        let mut target = match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, .. } => node,
            Descent::Miss { path, .. } => {
                trace.add(StepKind::NotFound, format!("{key} is not in the tree"), path);
                return Report::err(EngineError::NotFound, trace);
            }
        };

        let node = &self.arena[target as usize];
        if let (Some(_), Some(r)) = (node.l, node.r) {
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
            target = succ;
        }
        trace.add(
            StepKind::Remove,
            format!("removing {}", self.arena[target as usize].k),
            vec![target],
        );
        let (root, spliced_parent) = links::splice_out(&mut self.arena, self.root, target);
        self.root = root;
        self.len -= 1;
        self.rebalance_after_delete(spliced_parent, &mut trace);
        Report::ok((), trace)
    }

    /// Delete rebalancing picks cases by the heavy child's balance sign
    /// and continues to the root; several ancestors may tilt.
    fn rebalance_after_delete(&mut self, start: Option<NodeId>, trace: &mut Trace) {
        let mut curr = start;
        while let Some(n) = curr {
            let parent = self.arena[n as usize].p;
            self.update_height(n);
            let b = self.balance(n);
            if b > 1 {
                let l = self.arena[n as usize].l.expect("left-heavy node has a left child");
                if self.balance(l) >= 0 {
                    trace.add(
                        StepKind::Rotate,
                        format!("LL imbalance at {}: rotating right", self.arena[n as usize].k),
                        vec![n, l],
                    );
                    self.rotate_right_at(n);
                } else {
                    let lr = self.arena[l as usize].r.expect("right-heavy left child has a right child");
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "LR imbalance at {}: rotating left around {}, then right",
                            self.arena[n as usize].k, self.arena[l as usize].k
                        ),
                        vec![n, l, lr],
                    );
                    self.rotate_left_at(l);
                    self.rotate_right_at(n);
                }
            } else if b < -1 {
                let r = self.arena[n as usize].r.expect("right-heavy node has a right child");
                if self.balance(r) <= 0 {
                    trace.add(
                        StepKind::Rotate,
                        format!("RR imbalance at {}: rotating left", self.arena[n as usize].k),
                        vec![n, r],
                    );
                    self.rotate_left_at(n);
                } else {
                    let rl = self.arena[r as usize].l.expect("left-heavy right child has a left child");
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "RL imbalance at {}: rotating right around {}, then left",
                            self.arena[n as usize].k, self.arena[r as usize].k
                        ),
                        vec![n, r, rl],
                    );
                    self.rotate_right_at(r);
                    self.rotate_left_at(n);
                }
            }
            curr = parent;
        }
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

    /// Stored height of a live node; hosts show it next to the key.
    pub fn height_of(&self, id: NodeId) -> Option<u32> {
        self.arena.get(id as usize).map(|n| n.h)
    }

    pub fn balance_of(&self, id: NodeId) -> Option<i32> {
        self.arena.get(id as usize).map(|_| self.balance(id))
    }

    pub fn height(&self) -> usize {
        self.h(self.root) as usize
    }

    pub fn to_sorted_vec(&self) -> Vec<K> {
        links::in_order_keys(&self.arena, self.root)
    }

    pub fn level_entries(&self) -> Vec<LevelEntry<K>> {
        links::level_entries(&self.arena, self.root)
    }

    /// Check ordering, parent links, stored heights, and the AVL balance
    /// bound on every live node.
    pub fn validate(&self) -> Result<(), String> {
        links::assert_search_tree(&self.arena, self.root)?;
        self.check_heights(self.root)?;
        let walked = self.to_sorted_vec().len();
        if walked != self.len {
            return Err(format!("len is {} but the walk found {walked}", self.len));
        }
        Ok(())
    }

    fn check_heights(&self, node: Option<NodeId>) -> Result<i32, String> {
        let Some(n) = node else {
            return Ok(0);
        };
        let l = self.check_heights(self.arena[n as usize].l)?;
        let r = self.check_heights(self.arena[n as usize].r)?;
        let expected = 1 + l.max(r);
        let stored = self.arena[n as usize].h as i32;
        if stored != expected {
            return Err(format!(
                "stored height {stored} at {} but children give {expected}",
                self.arena[n as usize].k
            ));
        }
        let b = l - r;
        if !(-1..=1).contains(&b) {
            return Err(format!("balance {b} at {}", self.arena[n as usize].k));
        }
        Ok(expected)
    }

    pub fn print(&self) -> String {
        links::print_subtree(&self.arena, self.root, "", &|i| {
            let n = &self.arena[i as usize];
            format!("Node[{i}] [h={}] {{ {} }}", n.h, n.k)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_sequence_ends_with_root_30() {
        let mut tree = AvlTree::new();
        for k in [10, 20, 30, 40, 50, 25] {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        let root = tree.root().unwrap();
        assert_eq!(tree.key_of(root), Some(&30));
        assert_eq!(tree.to_sorted_vec(), vec![10, 20, 25, 30, 40, 50]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn rotations_show_up_in_the_trace() {
        let mut tree = AvlTree::new();
        tree.insert(10).expect_ok("fresh key");
        tree.insert(20).expect_ok("fresh key");
        let report = tree.insert(30);
        assert!(report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Rotate && s.description.contains("RR")));
        report.expect_ok("fresh key");
    }
}
