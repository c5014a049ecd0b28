//! B-Tree engine.
//!
//! An insert descends by first-greater-than scan, lands in a leaf, and
//! splits overfull nodes on the way back up: the middle key is promoted
//! into the parent and removed from both halves. A root split mints a new
//! root with one key, which is the only way the tree grows taller.

use std::fmt::Display;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::multiway::{self, MultiNode, MultiwayEntry};

#[derive(Clone, Debug)]
pub struct BTree<K> {
    arena: Vec<MultiNode<K>>,
    root: Option<NodeId>,
    order: usize,
    len: usize,
}

impl<K: Ord + Clone + Display> BTree<K> {
    /// `order` is the maximum child count; it must be at least 3.
    pub fn new(order: usize) -> Result<Self, EngineError> {
        if order < 3 {
            return Err(EngineError::InvalidInput(format!(
                "order must be at least 3, got {order}"
            )));
        }
        Ok(Self {
            arena: Vec::new(),
            root: None,
            order,
            len: 0,
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn max_keys(&self) -> usize {
        self.order - 1
    }

    pub fn min_keys(&self) -> usize {
        (self.order + 1) / 2 - 1
    }

    fn alloc(&mut self, leaf: bool) -> NodeId {
        let id = self.arena.len() as NodeId;
        self.arena.push(MultiNode::new(leaf));
        id
    }

    pub fn insert(&mut self, key: K) -> Report<()> {
        let mut trace = Trace::new();
        let Some(root) = self.root else {
            let id = self.alloc(true);
            self.arena[id as usize].keys.push(key.clone());
            self.root = Some(id);
            self.len = 1;
            trace.add(
                StepKind::Insert,
                format!("creating the root leaf [{key}]"),
                vec![id],
            );
            return Report::ok((), trace);
        };

        // descend to the leaf that should hold the key
        let mut curr = root;
        loop {
            let node = &self.arena[curr as usize];
            let run = multiway::fmt_keys(&node.keys);
            match node.keys.binary_search(&key) {
                Ok(_) => {
                    trace.add(
                        StepKind::Compare,
                        format!("scanning {run}: {key} is already present"),
                        vec![curr],
                    );
                    return Report::err(EngineError::DuplicateKey, trace);
                }
                Err(slot) => {
                    if node.leaf {
                        trace.add(
                            StepKind::Compare,
                            format!("scanning leaf {run}: {key} belongs at position {slot}"),
                            vec![curr],
                        );
                        break;
                    }
                    trace.add(
                        StepKind::Compare,
                        format!("scanning {run} for {key}: descending to child {slot}"),
                        vec![curr],
                    );
                    curr = node.children[slot];
                }
            }
        }

        let pos = self.arena[curr as usize]
            .keys
            .binary_search(&key)
            .unwrap_err();
        self.arena[curr as usize].keys.insert(pos, key.clone());
        self.len += 1;
        trace.add(
            StepKind::Insert,
            format!(
                "inserting {key} into leaf {}",
                multiway::fmt_keys(&self.arena[curr as usize].keys)
            ),
            vec![curr],
        );

        let mut n = curr;
        while self.arena[n as usize].keys.len() > self.max_keys() {
            match self.split(n, &mut trace) {
                Some(parent) => n = parent,
                None => break,
            }
        }
        Report::ok((), trace)
    }

    /// Split an overfull node around its middle key. Returns the parent
    /// for the cascade, or `None` when a new root was created.
    fn split(&mut self, n: NodeId, trace: &mut Trace) -> Option<NodeId> {
        let mid = self.arena[n as usize].keys.len() / 2;
        let promoted = self.arena[n as usize].keys[mid].clone();
        let leaf = self.arena[n as usize].leaf;

        let right = self.alloc(leaf);
        let right_keys = self.arena[n as usize].keys.split_off(mid + 1);
        self.arena[n as usize].keys.pop();
        self.arena[right as usize].keys = right_keys;
        if !leaf {
            let right_children = self.arena[n as usize].children.split_off(mid + 1);
            for &c in &right_children {
                self.arena[c as usize].p = Some(right);
            }
            self.arena[right as usize].children = right_children;
        }
        trace.add(
            StepKind::Split,
            format!(
                "splitting into {} and {}",
                multiway::fmt_keys(&self.arena[n as usize].keys),
                multiway::fmt_keys(&self.arena[right as usize].keys)
            ),
            vec![n, right],
        );

        match self.arena[n as usize].p {
            None => {
                let new_root = self.alloc(false);
                self.arena[new_root as usize].keys.push(promoted.clone());
                self.arena[new_root as usize].children = vec![n, right];
                self.arena[n as usize].p = Some(new_root);
                self.arena[right as usize].p = Some(new_root);
                self.root = Some(new_root);
                trace.add(
                    StepKind::Promote,
                    format!("promoting {promoted} into a new root"),
                    vec![new_root],
                );
                None
            }
            Some(p) => {
                let pos = self.arena[p as usize]
                    .children
                    .iter()
                    .position(|&c| c == n)
                    .expect("child is linked to its parent");
                self.arena[p as usize].keys.insert(pos, promoted.clone());
                self.arena[p as usize].children.insert(pos + 1, right);
                self.arena[right as usize].p = Some(p);
                trace.add(
                    StepKind::Promote,
                    format!(
                        "promoting {promoted} into {}",
                        multiway::fmt_keys(&self.arena[p as usize].keys)
                    ),
                    vec![p, right],
                );
                Some(p)
            }
        }
    }

    /// Search may stop early at an internal node that holds the key.
    pub fn search(&self, key: &K) -> Report<SearchOutcome> {
        let mut trace = Trace::new();
        let mut path = Vec::new();
        let mut curr = self.root;
        while let Some(i) = curr {
            path.push(i);
            let node = &self.arena[i as usize];
            let run = multiway::fmt_keys(&node.keys);
            match node.keys.binary_search(key) {
                Ok(_) => {
                    trace.add(StepKind::Found, format!("found {key} in {run}"), vec![i]);
                    return Report::ok(SearchOutcome::hit(path), trace);
                }
                Err(slot) => {
                    if node.leaf {
                        trace.add(
                            StepKind::Compare,
                            format!("scanning leaf {run}: {key} is absent"),
                            vec![i],
                        );
                        break;
                    }
                    trace.add(
                        StepKind::Compare,
                        format!("scanning {run} for {key}: descending to child {slot}"),
                        vec![i],
                    );
                    curr = Some(node.children[slot]);
                }
            }
        }
        trace.add(
            StepKind::NotFound,
            format!("{key} is not in the tree"),
            path.clone(),
        );
        Report::ok(SearchOutcome::miss(path), trace)
    }

    /// Deletion is not supported; rebuild the tree without the key.
    pub fn delete(&mut self, key: &K) -> Report<()> {
        let mut trace = Trace::new();
        trace.add(
            StepKind::Info,
            format!("this engine cannot delete {key}; deletion is unsupported"),
            vec![],
        );
        Report::err(
            EngineError::Unsupported("B-Tree deletion".to_string()),
            trace,
        )
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live multiway nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn height(&self) -> usize {
        multiway::tree_height(&self.arena, self.root)
    }

    pub fn to_sorted_vec(&self) -> Vec<K> {
        multiway::in_order_keys(&self.arena, self.root)
    }

    pub fn level_entries(&self) -> Vec<MultiwayEntry<K>> {
        multiway::level_entries(&self.arena, self.root)
    }

    pub fn validate(&self) -> Result<(), String> {
        multiway::assert_multiway(&self.arena, self.root, self.order, false)?;
        for (i, node) in self.arena.iter().enumerate() {
            if node.next.is_some() {
                return Err(format!("node {i} threaded into a leaf chain"));
            }
        }
        let keys = self.to_sorted_vec();
        if keys.len() != self.len {
            return Err(format!(
                "len is {} but the walk found {}",
                self.len,
                keys.len()
            ));
        }
        for w in keys.windows(2) {
            if w[0] >= w[1] {
                return Err("in-order walk is not ascending".to_string());
            }
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        multiway::print_node(&self.arena, self.root, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_below_three_is_rejected() {
        assert!(matches!(
            BTree::<i64>::new(2),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn root_split_grows_the_tree() {
        let mut tree = BTree::new(3).unwrap();
        for k in [10, 20, 30] {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        // third key overflows the root leaf; 20 is promoted
        assert_eq!(tree.height(), 2);
        let root_keys = &tree.level_entries()[0].keys;
        assert_eq!(root_keys, &vec![20]);
        assert_eq!(tree.to_sorted_vec(), vec![10, 20, 30]);
    }

    #[test]
    fn search_can_stop_at_an_internal_node() {
        let mut tree = BTree::new(3).unwrap();
        for k in [10, 20, 30, 40, 50] {
            tree.insert(k).expect_ok("fresh key");
        }
        let report = tree.search(&tree.level_entries()[0].keys[0].clone());
        let outcome = report.expect_ok("separator key is present");
        assert!(outcome.found);
        assert_eq!(outcome.path.len(), 1);
    }

    #[test]
    fn duplicate_key_leaves_tree_untouched() {
        let mut tree = BTree::new(4).unwrap();
        for k in [1, 2, 3] {
            tree.insert(k).expect_ok("fresh key");
        }
        let before = tree.level_entries();
        assert_eq!(
            tree.insert(2).error(),
            Some(&EngineError::DuplicateKey)
        );
        assert_eq!(tree.level_entries(), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn delete_reports_unsupported() {
        let mut tree = BTree::new(3).unwrap();
        tree.insert(1).expect_ok("fresh key");
        assert!(matches!(
            tree.delete(&1).error(),
            Some(EngineError::Unsupported(_))
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn hundred_key_ladder_keeps_bounds() {
        let mut tree = BTree::new(5).unwrap();
        for k in 0..100 {
            tree.insert(k).expect_ok("fresh key");
            tree.validate().unwrap();
        }
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.to_sorted_vec(), (0..100).collect::<Vec<_>>());
    }
}
