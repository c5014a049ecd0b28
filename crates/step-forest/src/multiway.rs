//! Shared node shape and walkers for the multiway (B family) engines.
//!
//! A multiway node owns a sorted run of keys and, when internal, one more
//! child than it has keys. The `next` link threads B+ leaves into a chain;
//! it stays `None` everywhere else.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use stepwise_core::NodeId;

#[derive(Clone, Debug)]
pub struct MultiNode<K> {
    pub p: Option<NodeId>,
    pub keys: Vec<K>,
    pub children: Vec<NodeId>,
    pub leaf: bool,
    pub next: Option<NodeId>,
}

impl<K> MultiNode<K> {
    pub fn new(leaf: bool) -> Self {
        Self {
            p: None,
            keys: Vec::new(),
            children: Vec::new(),
            leaf,
            next: None,
        }
    }
}

/// One multiway node of a level-order dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiwayEntry<K> {
    pub id: NodeId,
    pub keys: Vec<K>,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub leaf: bool,
}

/// Render a key run for step descriptions: `[10, 20, 30]`.
pub(crate) fn fmt_keys<K: Display>(keys: &[K]) -> String {
    let inner: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

/// Height in levels along the leftmost spine; an empty tree is 0.
pub(crate) fn tree_height<K>(arena: &[MultiNode<K>], root: Option<NodeId>) -> usize {
    let mut height = 0;
    let mut curr = root;
    while let Some(i) = curr {
        height += 1;
        curr = arena[i as usize].children.first().copied();
    }
    height
}

/// First leaf in key order; the B+ chain starts here.
pub(crate) fn leftmost_leaf<K>(arena: &[MultiNode<K>], root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while !arena[curr as usize].leaf {
        curr = *arena[curr as usize]
            .children
            .first()
            .expect("internal node has children");
    }
    Some(curr)
}

/// In-order key collection, children interleaved with keys. Only
/// meaningful for the plain B-Tree, where each key lives in one node.
pub(crate) fn in_order_keys<K: Clone>(arena: &[MultiNode<K>], node: Option<NodeId>) -> Vec<K> {
    let mut out = Vec::new();
    collect(arena, node, &mut out);
    return out;

    fn collect<K: Clone>(arena: &[MultiNode<K>], node: Option<NodeId>, out: &mut Vec<K>) {
        let Some(n) = node else {
            return;
        };
        let node = &arena[n as usize];
        if node.leaf {
            out.extend(node.keys.iter().cloned());
            return;
        }
        for (i, key) in node.keys.iter().enumerate() {
            collect(arena, node.children.get(i).copied(), out);
            out.push(key.clone());
        }
        collect(arena, node.children.last().copied(), out);
    }
}

/// Breadth-first dump for host rendering.
pub(crate) fn level_entries<K: Clone>(
    arena: &[MultiNode<K>],
    root: Option<NodeId>,
) -> Vec<MultiwayEntry<K>> {
    let mut out = Vec::new();
    let mut frontier = match root {
        Some(r) => vec![(r, 0usize)],
        None => return out,
    };
    while !frontier.is_empty() {
        let mut nxt = Vec::new();
        for (id, depth) in frontier {
            let n = &arena[id as usize];
            out.push(MultiwayEntry {
                id,
                keys: n.keys.clone(),
                depth,
                parent: n.p,
                leaf: n.leaf,
            });
            for &c in &n.children {
                nxt.push((c, depth + 1));
            }
        }
        frontier = nxt;
    }
    out
}

/// Structural validator shared by both engines. `plus` relaxes the lower
/// separator bound to "inclusive", since a B+ separator is a copy of the
/// first key of the subtree to its right.
pub(crate) fn assert_multiway<K: Ord + Display>(
    arena: &[MultiNode<K>],
    root: Option<NodeId>,
    order: usize,
    plus: bool,
) -> Result<(), String> {
    let Some(root_id) = root else {
        return Ok(());
    };
    if arena[root_id as usize].p.is_some() {
        return Err("root has a parent".to_string());
    }
    let max_keys = order - 1;
    let min_keys = (order + 1) / 2 - 1;
    let mut leaf_depth = None;
    walk(
        arena, root_id, 0, None, None, root_id, max_keys, min_keys, plus, &mut leaf_depth,
    )
}

#[allow(clippy::too_many_arguments)]
fn walk<K: Ord + Display>(
    arena: &[MultiNode<K>],
    n: NodeId,
    depth: usize,
    lo: Option<&K>,
    hi: Option<&K>,
    root: NodeId,
    max_keys: usize,
    min_keys: usize,
    plus: bool,
    leaf_depth: &mut Option<usize>,
) -> Result<(), String> {
    let node = &arena[n as usize];
    if node.keys.is_empty() {
        return Err(format!("node {n} holds no keys"));
    }
    if node.keys.len() > max_keys {
        return Err(format!(
            "node {} holds {} keys, over the maximum {max_keys}",
            fmt_keys(&node.keys),
            node.keys.len()
        ));
    }
    if n != root && node.keys.len() < min_keys {
        return Err(format!(
            "node {} holds {} keys, under the minimum {min_keys}",
            fmt_keys(&node.keys),
            node.keys.len()
        ));
    }
    for w in node.keys.windows(2) {
        if w[0] >= w[1] {
            return Err(format!("keys out of order in {}", fmt_keys(&node.keys)));
        }
    }
    if let Some(lo) = lo {
        let first = &node.keys[0];
        let in_range = if plus { lo <= first } else { lo < first };
        if !in_range {
            return Err(format!("{first} escapes its lower separator {lo}"));
        }
    }
    if let Some(hi) = hi {
        let last = node.keys.last().expect("node holds keys");
        if last >= hi {
            return Err(format!("{last} escapes its upper separator {hi}"));
        }
    }

    if node.leaf {
        if !node.children.is_empty() {
            return Err(format!("leaf {} has children", fmt_keys(&node.keys)));
        }
        match *leaf_depth {
            None => *leaf_depth = Some(depth),
            Some(d) if d != depth => {
                return Err(format!("leaves at depths {d} and {depth}"));
            }
            _ => {}
        }
        return Ok(());
    }

    if node.children.len() != node.keys.len() + 1 {
        return Err(format!(
            "internal node {} has {} children for {} keys",
            fmt_keys(&node.keys),
            node.children.len(),
            node.keys.len()
        ));
    }
    if node.next.is_some() {
        return Err("internal node threaded into the leaf chain".to_string());
    }
    for (i, &c) in node.children.iter().enumerate() {
        if arena[c as usize].p != Some(n) {
            return Err(format!("broken parent link under {}", fmt_keys(&node.keys)));
        }
        let lo_i = if i == 0 { lo } else { Some(&node.keys[i - 1]) };
        let hi_i = if i == node.keys.len() {
            hi
        } else {
            Some(&node.keys[i])
        };
        walk(
            arena, c, depth + 1, lo_i, hi_i, root, max_keys, min_keys, plus, leaf_depth,
        )?;
    }
    Ok(())
}

/// Debug printer shared by both engines.
pub(crate) fn print_node<K: Display>(
    arena: &[MultiNode<K>],
    node: Option<NodeId>,
    tab: &str,
) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let marker = if n.leaf { "leaf " } else { "" };
            let mut out = format!("Node[{i}] {marker}{}", fmt_keys(&n.keys));
            let deeper = format!("{tab}  ");
            for &c in &n.children {
                out.push_str(&format!("\n{tab}  {}", print_node(arena, Some(c), &deeper)));
            }
            out
        }
    }
}
