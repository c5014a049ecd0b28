//! Splay tree engine.
//!
//! No balance metadata: every successful access finishes by splaying the
//! touched node to the root through zig / zig-zig / zig-zag cases picked
//! from its relation to parent and grandparent. A search miss reports
//! "not found" and leaves the tree exactly as it was.

use std::fmt::Display;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::links::{self, Descent, KeyLinks, LevelEntry, TreeLinks};

#[derive(Clone, Debug)]
pub struct SplayNode<K> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub k: K,
}

impl<K> SplayNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
        }
    }
}

impl<K> TreeLinks for SplayNode<K> {
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

impl<K> KeyLinks<K> for SplayNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}

#[derive(Clone, Debug, Default)]
pub struct SplayTree<K> {
    arena: Vec<SplayNode<K>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K: Ord + Clone + Display> SplayTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    fn rotate_left_at(&mut self, n: NodeId) {
        let top = links::rotate_left(&mut self.arena, n);
        if self.arena[top as usize].p.is_none() {
            self.root = Some(top);
        }
    }

    fn rotate_right_at(&mut self, n: NodeId) {
        let top = links::rotate_right(&mut self.arena, n);
        if self.arena[top as usize].p.is_none() {
            self.root = Some(top);
        }
    }

    /// Move `x` to the root, one zig / zig-zig / zig-zag at a time.
    fn splay(&mut self, x: NodeId, trace: &mut Trace) {
        while let Some(p) = self.arena[x as usize].p {
            let x_left = self.arena[p as usize].l == Some(x);
            match self.arena[p as usize].p {
                None => {
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "zig: rotating {} over {}",
                            self.arena[x as usize].k, self.arena[p as usize].k
                        ),
                        vec![x, p],
                    );
                    if x_left {
                        self.rotate_right_at(p);
                    } else {
                        self.rotate_left_at(p);
                    }
                }
                Some(g) => {
                    let p_left = self.arena[g as usize].l == Some(p);
                    let case = if p_left == x_left { "zig-zig" } else { "zig-zag" };
                    trace.add(
                        StepKind::Rotate,
                        format!(
                            "{case}: rotating {} above {} and {}",
                            self.arena[x as usize].k,
                            self.arena[p as usize].k,
                            self.arena[g as usize].k
                        ),
                        vec![x, p, g],
                    );
                    match (p_left, x_left) {
                        // zig-zig rotates the grandparent first
                        (true, true) => {
                            self.rotate_right_at(g);
                            self.rotate_right_at(p);
                        }
                        (false, false) => {
                            self.rotate_left_at(g);
                            self.rotate_left_at(p);
                        }
                        // zig-zag rotates the parent first
                        (true, false) => {
                            self.rotate_left_at(p);
                            self.rotate_right_at(g);
                        }
                        (false, true) => {
                            self.rotate_right_at(p);
                            self.rotate_left_at(g);
                        }
                    }
                }
            }
        }
    }

    /// Insert `key` and splay the new node to the root. A duplicate is
    /// rejected without touching the tree, splaying included.
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
        self.arena.push(SplayNode::new(key.clone()));
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
        self.splay(id, &mut trace);
        Report::ok(id, trace)
    }

    /// Search for `key`; a hit splays the node to the root, a miss leaves
    /// the structure unchanged.
    pub fn search(&mut self, key: &K) -> Report<SearchOutcome> {
        let mut trace = Trace::new();
        match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, path } => {
                trace.add(
                    StepKind::Found,
                    format!("found {key}, splaying it to the root"),
                    vec![node],
                );
                self.splay(node, &mut trace);
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

    /// Delete `key`: splay it to the root, take it out, then join the two
    /// subtrees by splaying the left maximum and hanging the right
    /// subtree under it.
    pub fn delete(&mut self, key: &K) -> Report<()> {
        let mut trace = Trace::new();
        let target = match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, .. } => node,
            Descent::Miss { path, .. } => {
                trace.add(StepKind::NotFound, format!("{key} is not in the tree"), path);
                return Report::err(EngineError::NotFound, trace);
            }
        };

        trace.add(
            StepKind::Found,
            format!("found {key}, splaying it to the root before removal"),
            vec![target],
        );
        self.splay(target, &mut trace);

        let l = self.arena[target as usize].l;
        let r = self.arena[target as usize].r;
        self.arena[target as usize].l = None;
        self.arena[target as usize].r = None;
        if let Some(l) = l {
            self.arena[l as usize].p = None;
        }
        if let Some(r) = r {
            self.arena[r as usize].p = None;
        }
        trace.add(StepKind::Remove, format!("removing the root {key}"), vec![target]);

        self.root = match (l, r) {
            (None, r) => r,
            (Some(l), None) => Some(l),
            (Some(l), Some(r)) => {
                self.root = Some(l);
                let max = links::last(&self.arena, Some(l)).expect("left subtree is non-empty");
                trace.add(
                    StepKind::Visit,
                    format!(
                        "splaying {}, the largest key on the left, to the root",
                        self.arena[max as usize].k
                    ),
                    vec![max],
                );
                self.splay(max, &mut trace);
                self.arena[max as usize].r = Some(r);
                self.arena[r as usize].p = Some(max);
                trace.add(
                    StepKind::Link,
                    format!("attaching the right subtree under {}", self.arena[max as usize].k),
                    vec![max, r],
                );
                Some(max)
            }
        };
        self.len -= 1;
        Report::ok((), trace)
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

    pub fn height(&self) -> usize {
        links::subtree_height(&self.arena, self.root)
    }

    pub fn to_sorted_vec(&self) -> Vec<K> {
        links::in_order_keys(&self.arena, self.root)
    }

    pub fn level_entries(&self) -> Vec<LevelEntry<K>> {
        links::level_entries(&self.arena, self.root)
    }

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
    fn successful_search_moves_key_to_root() {
        let mut tree = SplayTree::new();
        for k in [10, 20, 30, 40, 50] {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        tree.search(&20).expect_ok("20 is present");
        tree.validate().unwrap();
        assert_eq!(tree.key_of(tree.root().unwrap()), Some(&20));
    }

    #[test]
    fn search_miss_leaves_structure_alone() {
        let mut tree = SplayTree::new();
        for k in [10, 20, 30] {
            tree.insert(k).expect_ok("fresh key");
        }
        let before = tree.level_entries();
        let report = tree.search(&25);
        assert!(!report.expect_ok("miss is not an error").found);
        assert_eq!(tree.level_entries(), before);
    }

    #[test]
    fn delete_joins_subtrees_around_left_maximum() {
        let mut tree = SplayTree::new();
        for k in [40, 20, 60, 10, 30, 50, 70] {
            tree.insert(k).expect_ok("fresh key");
        }
        tree.delete(&40).expect_ok("40 is present");
        tree.validate().unwrap();
        assert_eq!(tree.to_sorted_vec(), vec![10, 20, 30, 50, 60, 70]);
        // the new root is the maximum of the old left subtree
        assert_eq!(tree.key_of(tree.root().unwrap()), Some(&30));
    }
}
