//! B+-Tree engine.
//!
//! Every key lives in a leaf; internal nodes hold separator copies only.
//! A leaf split copies the first key of the right half upward and keeps
//! both halves intact, then re-threads the forward leaf chain. Internal
//! splits behave like the plain B-Tree. Searches always run to a leaf,
//! even when a separator matches on the way down.

use std::fmt::Display;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

use crate::multiway::{self, MultiNode, MultiwayEntry};

#[derive(Clone, Debug)]
pub struct BPlusTree<K> {
    arena: Vec<MultiNode<K>>,
    root: Option<NodeId>,
    order: usize,
    len: usize,
}

impl<K: Ord + Clone + Display> BPlusTree<K> {
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

    /// Pick the child for `key`; an equal separator sends the descent
    /// right, where the authoritative copy lives.
    fn child_for(keys: &[K], key: &K) -> usize {
        match keys.binary_search(key) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
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

        // membership is decided at the leaf, never at a separator
        let mut curr = root;
        while !self.arena[curr as usize].leaf {
            let node = &self.arena[curr as usize];
            let slot = Self::child_for(&node.keys, &key);
            trace.add(
                StepKind::Compare,
                format!(
                    "scanning {} for {key}: descending to child {slot}",
                    multiway::fmt_keys(&node.keys)
                ),
                vec![curr],
            );
            curr = node.children[slot];
        }

        let run = multiway::fmt_keys(&self.arena[curr as usize].keys);
        let pos = match self.arena[curr as usize].keys.binary_search(&key) {
            Ok(_) => {
                trace.add(
                    StepKind::Compare,
                    format!("scanning leaf {run}: {key} is already present"),
                    vec![curr],
                );
                return Report::err(EngineError::DuplicateKey, trace);
            }
            Err(pos) => pos,
        };
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

    /// Split an overfull node. Leaves keep every key and copy the right
    /// half's first key upward; internal nodes promote-and-remove.
    fn split(&mut self, n: NodeId, trace: &mut Trace) -> Option<NodeId> {
        let mid = self.arena[n as usize].keys.len() / 2;
        let promoted = self.arena[n as usize].keys[mid].clone();
        let leaf = self.arena[n as usize].leaf;

        let right = self.alloc(leaf);
        if leaf {
            let right_keys = self.arena[n as usize].keys.split_off(mid);
            self.arena[right as usize].keys = right_keys;
            let old_next = self.arena[n as usize].next;
            self.arena[n as usize].next = Some(right);
            self.arena[right as usize].next = old_next;
            trace.add(
                StepKind::Split,
                format!(
                    "splitting leaf into {} and {}; the right half keeps {promoted}",
                    multiway::fmt_keys(&self.arena[n as usize].keys),
                    multiway::fmt_keys(&self.arena[right as usize].keys)
                ),
                vec![n, right],
            );
            trace.add(
                StepKind::Link,
                "re-threading the leaf chain through the new leaf".to_string(),
                vec![n, right],
            );
        } else {
            let right_keys = self.arena[n as usize].keys.split_off(mid + 1);
            self.arena[n as usize].keys.pop();
            self.arena[right as usize].keys = right_keys;
            let right_children = self.arena[n as usize].children.split_off(mid + 1);
            for &c in &right_children {
                self.arena[c as usize].p = Some(right);
            }
            self.arena[right as usize].children = right_children;
            trace.add(
                StepKind::Split,
                format!(
                    "splitting into {} and {}",
                    multiway::fmt_keys(&self.arena[n as usize].keys),
                    multiway::fmt_keys(&self.arena[right as usize].keys)
                ),
                vec![n, right],
            );
        }

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
                    format!("copying {promoted} into a new root"),
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
                        "copying {promoted} into {}",
                        multiway::fmt_keys(&self.arena[p as usize].keys)
                    ),
                    vec![p, right],
                );
                Some(p)
            }
        }
    }

    /// Search always runs to a leaf; separators are routing copies.
    pub fn search(&self, key: &K) -> Report<SearchOutcome> {
        let mut trace = Trace::new();
        let mut path = Vec::new();
        let Some(root) = self.root else {
            trace.add(StepKind::NotFound, format!("{key} is not in the tree"), vec![]);
            return Report::ok(SearchOutcome::miss(path), trace);
        };

        let mut curr = root;
        while !self.arena[curr as usize].leaf {
            path.push(curr);
            let node = &self.arena[curr as usize];
            let slot = Self::child_for(&node.keys, key);
            trace.add(
                StepKind::Compare,
                format!(
                    "scanning {} for {key}: descending to child {slot}",
                    multiway::fmt_keys(&node.keys)
                ),
                vec![curr],
            );
            curr = node.children[slot];
        }
        path.push(curr);

        let run = multiway::fmt_keys(&self.arena[curr as usize].keys);
        if self.arena[curr as usize].keys.binary_search(key).is_ok() {
            trace.add(StepKind::Found, format!("found {key} in leaf {run}"), vec![curr]);
            Report::ok(SearchOutcome::hit(path), trace)
        } else {
            trace.add(
                StepKind::NotFound,
                format!("leaf {run} does not hold {key}"),
                vec![curr],
            );
            Report::ok(SearchOutcome::miss(path), trace)
        }
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
            EngineError::Unsupported("B+-Tree deletion".to_string()),
            trace,
        )
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// Number of keys stored (leaf entries only).
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

    /// All keys in order, read off the leaf chain.
    pub fn to_sorted_vec(&self) -> Vec<K> {
        let mut out = Vec::new();
        let mut curr = multiway::leftmost_leaf(&self.arena, self.root);
        while let Some(i) = curr {
            out.extend(self.arena[i as usize].keys.iter().cloned());
            curr = self.arena[i as usize].next;
        }
        out
    }

    /// Key runs per leaf, in chain order; hosts draw these as the linked
    /// bottom row.
    pub fn leaves(&self) -> Vec<Vec<K>> {
        let mut out = Vec::new();
        let mut curr = multiway::leftmost_leaf(&self.arena, self.root);
        while let Some(i) = curr {
            out.push(self.arena[i as usize].keys.clone());
            curr = self.arena[i as usize].next;
        }
        out
    }

    pub fn level_entries(&self) -> Vec<MultiwayEntry<K>> {
        multiway::level_entries(&self.arena, self.root)
    }

    pub fn validate(&self) -> Result<(), String> {
        multiway::assert_multiway(&self.arena, self.root, self.order, true)?;

        // the chain must visit every key once, ascending
        let chained = self.to_sorted_vec();
        if chained.len() != self.len {
            return Err(format!(
                "len is {} but the leaf chain holds {}",
                self.len,
                chained.len()
            ));
        }
        for w in chained.windows(2) {
            if w[0] >= w[1] {
                return Err("leaf chain is not ascending".to_string());
            }
        }
        // chain hops equal the number of leaves
        let leaf_count = self.arena.iter().filter(|n| n.leaf).count();
        if self.root.is_some() && self.leaves().len() != leaf_count {
            return Err(format!(
                "{} leaves but the chain visits {}",
                leaf_count,
                self.leaves().len()
            ));
        }
        Ok(())
    }

    pub fn print(&self) -> String {
        multiway::print_node(&self.arena, self.root, "")
    }
}
