//! Red-Black tree engine.
//!
//! Invariants: the root is black, a red node never has a red child, and
//! every root-to-nil path carries the same number of black nodes. Inserts
//! enter red and are repaired by the uncle-color case analysis; deletes
//! run the standard double-black correction (recolorings plus at most
//! three rotations).

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::links::{self, Descent, KeyLinks, LevelEntry, TreeLinks};

/// Node color as a host sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: Option<NodeId>,
    pub l: Option<NodeId>,
    pub r: Option<NodeId>,
    pub k: K,
    pub black: bool,
}

impl<K> RbNode<K> {
    /// New nodes enter the tree red.
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            black: false,
        }
    }
}

impl<K> TreeLinks for RbNode<K> {
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

impl<K> KeyLinks<K> for RbNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
    fn set_key(&mut self, key: K) {
        self.k = key;
    }
}

#[derive(Clone, Debug, Default)]
pub struct RbTree<K> {
    arena: Vec<RbNode<K>>,
    root: Option<NodeId>,
    len: usize,
}

impl<K: Ord + Clone + Display> RbTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            len: 0,
        }
    }

    #[inline]
    fn is_black(&self, i: NodeId) -> bool {
        self.arena[i as usize].black
    }

    #[inline]
    fn set_black(&mut self, i: NodeId, black: bool) {
        self.arena[i as usize].black = black;
    }

    #[inline]
    fn key_at(&self, i: NodeId) -> &K {
        &self.arena[i as usize].k
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
        self.arena.push(RbNode::new(key.clone()));
        match parent {
            None => {
                self.root = Some(id);
                trace.add(
                    StepKind::Insert,
                    format!("inserting {key} as the root, colored red"),
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
                        "inserting {key} as the red {side} child of {}",
                        self.arena[p as usize].k
                    ),
                    vec![id, p],
                );
            }
        }
        self.len += 1;
        self.fix_after_insert(id, &mut trace);
        Report::ok(id, trace)
    }

    /// Repair a possible red-red violation above the freshly inserted
    /// node, then force the root black.
    fn fix_after_insert(&mut self, mut x: NodeId, trace: &mut Trace) {
        loop {
            let Some(mut p) = self.arena[x as usize].p else {
                break;
            };
            if self.is_black(p) {
                break;
            }
            let Some(g) = self.arena[p as usize].p else {
                break;
            };
            let p_left = self.arena[g as usize].l == Some(p);
            let uncle = if p_left {
                self.arena[g as usize].r
            } else {
                self.arena[g as usize].l
            };

            if let Some(u) = uncle.filter(|&u| !self.is_black(u)) {
                let description = format!(
                    "red uncle {}: recoloring {} and {} black, {} red",
                    self.key_at(u),
                    self.key_at(p),
                    self.key_at(u),
                    self.key_at(g)
                );
                trace.add(StepKind::Recolor, description, vec![p, u, g]);
                self.set_black(p, true);
                self.set_black(u, true);
                self.set_black(g, false);
                x = g;
                continue;
            }

            // black or absent uncle: at most two rotations finish the fix
            if p_left {
                if self.arena[p as usize].r == Some(x) {
                    let description = format!(
                        "left-right case at {}: rotating left around {}",
                        self.key_at(g),
                        self.key_at(p)
                    );
                    trace.add(StepKind::Rotate, description, vec![x, p, g]);
                    self.rotate_left_at(p);
                    std::mem::swap(&mut x, &mut p);
                }
                let description = format!(
                    "recoloring {} black and {} red",
                    self.key_at(p),
                    self.key_at(g)
                );
                trace.add(StepKind::Recolor, description, vec![p, g]);
                self.set_black(p, true);
                self.set_black(g, false);
                let description = format!("rotating right around {}", self.key_at(g));
                trace.add(StepKind::Rotate, description, vec![p, g]);
                self.rotate_right_at(g);
            } else {
                if self.arena[p as usize].l == Some(x) {
                    let description = format!(
                        "right-left case at {}: rotating right around {}",
                        self.key_at(g),
                        self.key_at(p)
                    );
                    trace.add(StepKind::Rotate, description, vec![x, p, g]);
                    self.rotate_right_at(p);
                    std::mem::swap(&mut x, &mut p);
                }
                let description = format!(
                    "recoloring {} black and {} red",
                    self.key_at(p),
                    self.key_at(g)
                );
                trace.add(StepKind::Recolor, description, vec![p, g]);
                self.set_black(p, true);
                self.set_black(g, false);
                let description = format!("rotating left around {}", self.key_at(g));
                trace.add(StepKind::Rotate, description, vec![p, g]);
                self.rotate_left_at(g);
            }
            break;
        }

        if let Some(r) = self.root {
            if !self.is_black(r) {
                trace.add(StepKind::Recolor, "the root is always black", vec![r]);
                self.set_black(r, true);
            }
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
        let mut z = match links::descend(&self.arena, self.root, key, &mut trace) {
            Descent::Hit { node, .. } => node,
            Descent::Miss { path, .. } => {
                trace.add(StepKind::NotFound, format!("{key} is not in the tree"), path);
                return Report::err(EngineError::NotFound, trace);
            }
        };

        let node = &self.arena[z as usize];
        if let (Some(_), Some(r)) = (node.l, node.r) {
            let succ = links::first(&self.arena, Some(r)).expect("right subtree is non-empty");
            let succ_key = self.arena[succ as usize].k.clone();
            trace.add(
                StepKind::Update,
                format!(
                    "replacing {} with its in-order successor {succ_key}",
                    self.arena[z as usize].k
                ),
                vec![z, succ],
            );
            self.arena[z as usize].k = succ_key;
            z = succ;
        }

        // z now has at most one child
        let z_black = self.is_black(z);
        let child = self.arena[z as usize].l.or(self.arena[z as usize].r);
        match child {
            Some(c) => {
                trace.add(
                    StepKind::Remove,
                    format!("removing {}", self.arena[z as usize].k),
                    vec![z],
                );
                let (root, _) = links::splice_out(&mut self.arena, self.root, z);
                self.root = root;
                if z_black {
                    if !self.is_black(c) {
                        let description =
                            format!("recoloring the lifted child {} black", self.key_at(c));
                        trace.add(StepKind::Recolor, description, vec![c]);
                        self.set_black(c, true);
                    } else {
                        self.fix_double_black(c, &mut trace);
                    }
                }
            }
            None => {
                if self.arena[z as usize].p.is_none() {
                    trace.add(
                        StepKind::Remove,
                        format!("removing the root {}", self.arena[z as usize].k),
                        vec![z],
                    );
                    self.root = None;
                } else {
                    // fix while the leaf is still linked, then unlink it
                    if z_black {
                        self.fix_double_black(z, &mut trace);
                    }
                    trace.add(
                        StepKind::Remove,
                        format!("removing {}", self.arena[z as usize].k),
                        vec![z],
                    );
                    let p = self.arena[z as usize].p.expect("leaf keeps its parent through the fix");
                    if self.arena[p as usize].l == Some(z) {
                        self.arena[p as usize].l = None;
                    } else {
                        self.arena[p as usize].r = None;
                    }
                    self.arena[z as usize].p = None;
                }
            }
        }

        if let Some(r) = self.root {
            if !self.is_black(r) {
                trace.add(StepKind::Recolor, "the root is always black", vec![r]);
                self.set_black(r, true);
            }
        }
        self.len -= 1;
        Report::ok((), trace)
    }

    /// Double-black correction. `x` is the node whose subtree is one
    /// black short; it stays linked for the whole correction.
    fn fix_double_black(&mut self, mut x: NodeId, trace: &mut Trace) {
        loop {
            let Some(p) = self.arena[x as usize].p else {
                break;
            };
            let x_left = self.arena[p as usize].l == Some(x);
            let sibling = if x_left {
                self.arena[p as usize].r
            } else {
                self.arena[p as usize].l
            };
            let Some(mut s) = sibling else {
                x = p;
                continue;
            };

            if !self.is_black(s) {
                // red sibling: rotate it over the parent, then retry
                let description = format!(
                    "red sibling {}: recoloring it black, {} red, and rotating",
                    self.key_at(s),
                    self.key_at(p)
                );
                trace.add(StepKind::Recolor, description, vec![s, p]);
                self.set_black(s, true);
                self.set_black(p, false);
                let description = format!("rotating around {}", self.key_at(p));
                trace.add(StepKind::Rotate, description, vec![p, s]);
                if x_left {
                    self.rotate_left_at(p);
                } else {
                    self.rotate_right_at(p);
                }
                let next = if x_left {
                    self.arena[p as usize].r
                } else {
                    self.arena[p as usize].l
                };
                match next {
                    Some(ns) => s = ns,
                    None => {
                        x = p;
                        continue;
                    }
                }
            }

            let near = if x_left {
                self.arena[s as usize].l
            } else {
                self.arena[s as usize].r
            };
            let far = if x_left {
                self.arena[s as usize].r
            } else {
                self.arena[s as usize].l
            };
            let near_red = near.map(|i| !self.is_black(i)).unwrap_or(false);
            let far_red = far.map(|i| !self.is_black(i)).unwrap_or(false);

            if !near_red && !far_red {
                // both nephews black: push the deficit to the parent
                let description =
                    format!("recoloring sibling {} red", self.key_at(s));
                trace.add(StepKind::Recolor, description, vec![s]);
                self.set_black(s, false);
                if !self.is_black(p) {
                    let description =
                        format!("recoloring {} black absorbs the deficit", self.key_at(p));
                    trace.add(StepKind::Recolor, description, vec![p]);
                    self.set_black(p, true);
                    break;
                }
                x = p;
                continue;
            }

            if !far_red {
                // near nephew red: rotate it over the sibling first
                let near = near.expect("near nephew is red");
                let description = format!(
                    "red near nephew {}: exchanging colors with {} and rotating",
                    self.key_at(near),
                    self.key_at(s)
                );
                trace.add(StepKind::Recolor, description, vec![near, s]);
                self.set_black(near, true);
                self.set_black(s, false);
                let description = format!("rotating around {}", self.key_at(s));
                trace.add(StepKind::Rotate, description, vec![s, near]);
                if x_left {
                    self.rotate_right_at(s);
                } else {
                    self.rotate_left_at(s);
                }
                s = near;
            }

            // far nephew red: one rotation settles the black count
            let far = if x_left {
                self.arena[s as usize].r
            } else {
                self.arena[s as usize].l
            };
            let far = far.expect("far nephew is red");
            let p_black = self.is_black(p);
            let description = format!(
                "red far nephew {}: recoloring and rotating around {}",
                self.key_at(far),
                self.key_at(p)
            );
            trace.add(StepKind::Recolor, description, vec![far, s, p]);
            self.set_black(s, p_black);
            self.set_black(p, true);
            self.set_black(far, true);
            let description = format!("rotating around {}", self.key_at(p));
            trace.add(StepKind::Rotate, description, vec![p, s]);
            if x_left {
                self.rotate_left_at(p);
            } else {
                self.rotate_right_at(p);
            }
            break;
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

    pub fn color_of(&self, id: NodeId) -> Option<Color> {
        self.arena.get(id as usize).map(|n| {
            if n.black {
                Color::Black
            } else {
                Color::Red
            }
        })
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

    /// Check ordering, links, the color rules, and equal black-height.
    pub fn validate(&self) -> Result<(), String> {
        links::assert_search_tree(&self.arena, self.root)?;
        if let Some(root) = self.root {
            if !self.is_black(root) {
                return Err("root is not black".to_string());
            }
            self.check_black_height(Some(root))?;
        }
        let walked = self.to_sorted_vec().len();
        if walked != self.len {
            return Err(format!("len is {} but the walk found {walked}", self.len));
        }
        Ok(())
    }

    fn check_black_height(&self, node: Option<NodeId>) -> Result<usize, String> {
        let Some(n) = node else {
            return Ok(0);
        };
        let l = self.arena[n as usize].l;
        let r = self.arena[n as usize].r;
        if !self.is_black(n) {
            if l.map(|i| !self.is_black(i)).unwrap_or(false)
                || r.map(|i| !self.is_black(i)).unwrap_or(false)
            {
                return Err(format!("red node {} has a red child", self.arena[n as usize].k));
            }
        }
        let lh = self.check_black_height(l)?;
        let rh = self.check_black_height(r)?;
        if lh != rh {
            return Err(format!(
                "black-height mismatch under {}: {lh} vs {rh}",
                self.arena[n as usize].k
            ));
        }
        Ok(lh + usize::from(self.is_black(n)))
    }

    pub fn print(&self) -> String {
        links::print_subtree(&self.arena, self.root, "", &|i| {
            let n = &self.arena[i as usize];
            let color = if n.black { "B" } else { "R" };
            format!("Node[{i}] [{color}] {{ {} }}", n.k)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoloring_and_rotation_keep_invariants() {
        let mut tree = RbTree::new();
        for k in [10, 20, 30, 15, 25, 5, 1] {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        assert_eq!(tree.to_sorted_vec(), vec![1, 5, 10, 15, 20, 25, 30]);
        assert_eq!(tree.color_of(tree.root().unwrap()), Some(Color::Black));
    }

    #[test]
    fn ascending_ladder_stays_valid() {
        let mut tree = RbTree::new();
        for k in 0..100 {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        assert_eq!(tree.len(), 100);
        // a valid red-black tree of 100 nodes is at most 2*log2(101) deep
        assert!(tree.height() <= 13);
    }

    #[test]
    fn delete_keeps_black_height() {
        let mut tree = RbTree::new();
        for k in 0..50 {
            tree.insert(k).expect_ok("fresh key");
        }
        for k in (0..50).step_by(2) {
            tree.delete(&k).expect_ok("key present");
            tree.validate().unwrap();
        }
        assert_eq!(tree.len(), 25);
        let expected: Vec<i32> = (0..50).filter(|k| k % 2 == 1).collect();
        assert_eq!(tree.to_sorted_vec(), expected);
    }
}
