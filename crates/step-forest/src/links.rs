//! Arena link traits and walkers shared by the binary-tree engines.
//!
//! Every binary engine stores its nodes in a `Vec` arena and keeps
//! parent/child relations as `Option<NodeId>` indices instead of owning
//! pointers. The traits here let the ordering walkers, the rotation
//! primitives, and the search descent work over any of those node types.

use std::cmp::Ordering;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use stepwise_core::{NodeId, StepKind, Trace};

/// Binary links into the arena (`p` / `l` / `r`).
pub trait TreeLinks {
    fn p(&self) -> Option<NodeId>;
    fn l(&self) -> Option<NodeId>;
    fn r(&self) -> Option<NodeId>;
    fn set_p(&mut self, v: Option<NodeId>);
    fn set_l(&mut self, v: Option<NodeId>);
    fn set_r(&mut self, v: Option<NodeId>);
}

/// Keyed node on top of the links.
pub trait KeyLinks<K>: TreeLinks {
    fn key(&self) -> &K;
    fn set_key(&mut self, key: K);
}

/// One node of a level-order dump, enough for a host to draw the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry<K> {
    pub id: NodeId,
    pub key: K,
    pub depth: usize,
    pub parent: Option<NodeId>,
}

// ── ordering walkers ──────────────────────────────────────────────────────

/// Leftmost (smallest) node of the subtree under `root`.
pub fn first<N: TreeLinks>(arena: &[N], root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(l) = arena[curr as usize].l() {
        curr = l;
    }
    Some(curr)
}

/// Rightmost (largest) node of the subtree under `root`.
pub fn last<N: TreeLinks>(arena: &[N], root: Option<NodeId>) -> Option<NodeId> {
    let mut curr = root?;
    while let Some(r) = arena[curr as usize].r() {
        curr = r;
    }
    Some(curr)
}

/// In-order successor of `node`, or `None` at the maximum.
pub fn next<N: TreeLinks>(arena: &[N], node: NodeId) -> Option<NodeId> {
    if let Some(r) = arena[node as usize].r() {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = arena[curr as usize].p();
    while let Some(pi) = p {
        if arena[pi as usize].r() == Some(curr) {
            curr = pi;
            p = arena[pi as usize].p();
        } else {
            return Some(pi);
        }
    }
    None
}

/// Keys of the subtree under `root` in ascending order.
pub fn in_order_keys<K, N>(arena: &[N], root: Option<NodeId>) -> Vec<K>
where
    K: Clone,
    N: KeyLinks<K>,
{
    let mut out = Vec::new();
    let mut curr = first(arena, root);
    while let Some(i) = curr {
        out.push(arena[i as usize].key().clone());
        curr = next(arena, i);
    }
    out
}

/// Height of the subtree under `node` in nodes; an empty subtree is 0.
pub fn subtree_height<N: TreeLinks>(arena: &[N], node: Option<NodeId>) -> usize {
    match node {
        None => 0,
        Some(i) => {
            let l = subtree_height(arena, arena[i as usize].l());
            let r = subtree_height(arena, arena[i as usize].r());
            1 + l.max(r)
        }
    }
}

/// Breadth-first dump of the live tree for host rendering.
pub fn level_entries<K, N>(arena: &[N], root: Option<NodeId>) -> Vec<LevelEntry<K>>
where
    K: Clone,
    N: KeyLinks<K>,
{
    let mut out = Vec::new();
    let mut frontier = match root {
        Some(r) => vec![(r, 0usize)],
        None => return out,
    };
    while !frontier.is_empty() {
        let mut nxt = Vec::new();
        for (id, depth) in frontier {
            let n = &arena[id as usize];
            out.push(LevelEntry {
                id,
                key: n.key().clone(),
                depth,
                parent: n.p(),
            });
            if let Some(l) = n.l() {
                nxt.push((l, depth + 1));
            }
            if let Some(r) = n.r() {
                nxt.push((r, depth + 1));
            }
        }
        frontier = nxt;
    }
    out
}

// ── rotations ─────────────────────────────────────────────────────────────

/// Left rotation: promote the right child over `n`.
///
/// ```text
///   n               r
///    \             /
///     r    →      n
///    /             \
///   rl              rl
/// ```
///
/// Returns the subtree's new top. The caller re-checks the tree root when
/// the returned node has no parent.
pub fn rotate_left<N: TreeLinks>(arena: &mut [N], n: NodeId) -> NodeId {
    let p = arena[n as usize].p();
    let r = arena[n as usize].r().expect("left rotation needs a right child");
    let rl = arena[r as usize].l();

    arena[r as usize].set_l(Some(n));
    arena[r as usize].set_p(p);
    arena[n as usize].set_p(Some(r));
    arena[n as usize].set_r(rl);
    if let Some(rl) = rl {
        arena[rl as usize].set_p(Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            arena[p as usize].set_l(Some(r));
        } else {
            arena[p as usize].set_r(Some(r));
        }
    }
    r
}

/// Right rotation: promote the left child over `n`. Mirror of
/// [`rotate_left`].
pub fn rotate_right<N: TreeLinks>(arena: &mut [N], n: NodeId) -> NodeId {
    let p = arena[n as usize].p();
    let l = arena[n as usize].l().expect("right rotation needs a left child");
    let lr = arena[l as usize].r();

    arena[l as usize].set_r(Some(n));
    arena[l as usize].set_p(p);
    arena[n as usize].set_p(Some(l));
    arena[n as usize].set_l(lr);
    if let Some(lr) = lr {
        arena[lr as usize].set_p(Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            arena[p as usize].set_l(Some(l));
        } else {
            arena[p as usize].set_r(Some(l));
        }
    }
    l
}

// ── structural edits ──────────────────────────────────────────────────────

/// Unlink a node with at most one child, attaching that child in its place.
///
/// Returns `(new_root, parent)` where `parent` is the node it hung from,
/// which is where delete rebalancing resumes.
pub fn splice_out<N: TreeLinks>(
    arena: &mut [N],
    root: Option<NodeId>,
    n: NodeId,
) -> (Option<NodeId>, Option<NodeId>) {
    let p = arena[n as usize].p();
    let child = arena[n as usize].l().or(arena[n as usize].r());
    if let Some(c) = child {
        arena[c as usize].set_p(p);
    }
    let new_root = match p {
        Some(p) => {
            if arena[p as usize].l() == Some(n) {
                arena[p as usize].set_l(child);
            } else {
                arena[p as usize].set_r(child);
            }
            root
        }
        None => child,
    };
    arena[n as usize].set_p(None);
    arena[n as usize].set_l(None);
    arena[n as usize].set_r(None);
    (new_root, p)
}

// ── search descent ────────────────────────────────────────────────────────

/// Where a binary-search descent ended up.
pub(crate) enum Descent {
    /// The key sits at `node`; the path ends with it.
    Hit { node: NodeId, path: Vec<NodeId> },
    /// The key is absent; `parent`/`go_left` name the attach point an
    /// insert would use. `parent` is `None` on an empty tree.
    Miss {
        parent: Option<NodeId>,
        go_left: bool,
        path: Vec<NodeId>,
    },
}

/// Walk the search path for `key`, recording one `Compare` step per node.
pub(crate) fn descend<K, N>(
    arena: &[N],
    root: Option<NodeId>,
    key: &K,
    trace: &mut Trace,
) -> Descent
where
    K: Ord + Display,
    N: KeyLinks<K>,
{
    let mut path = Vec::new();
    let mut parent = None;
    let mut go_left = false;
    let mut curr = root;
    while let Some(i) = curr {
        path.push(i);
        let node_key = arena[i as usize].key();
        match key.cmp(node_key) {
            Ordering::Equal => {
                trace.add(
                    StepKind::Compare,
                    format!("comparing {key} with {node_key}: match"),
                    vec![i],
                );
                return Descent::Hit { node: i, path };
            }
            Ordering::Less => {
                trace.add(
                    StepKind::Compare,
                    format!("comparing {key} with {node_key}: going left"),
                    vec![i],
                );
                parent = Some(i);
                go_left = true;
                curr = arena[i as usize].l();
            }
            Ordering::Greater => {
                trace.add(
                    StepKind::Compare,
                    format!("comparing {key} with {node_key}: going right"),
                    vec![i],
                );
                parent = Some(i);
                go_left = false;
                curr = arena[i as usize].r();
            }
        }
    }
    Descent::Miss {
        parent,
        go_left,
        path,
    }
}

// ── validation helpers ────────────────────────────────────────────────────

/// Check parent-link integrity and in-order key ordering from `root`.
pub fn assert_search_tree<K, N>(arena: &[N], root: Option<NodeId>) -> Result<(), String>
where
    K: Ord,
    N: KeyLinks<K>,
{
    let Some(root) = root else {
        return Ok(());
    };
    if arena[root as usize].p().is_some() {
        return Err("root has a parent".to_string());
    }

    fn check_links<K, N: KeyLinks<K>>(arena: &[N], node: NodeId) -> Result<(), String> {
        if let Some(l) = arena[node as usize].l() {
            if arena[l as usize].p() != Some(node) {
                return Err("broken parent link on left child".to_string());
            }
            check_links(arena, l)?;
        }
        if let Some(r) = arena[node as usize].r() {
            if arena[r as usize].p() != Some(node) {
                return Err("broken parent link on right child".to_string());
            }
            check_links(arena, r)?;
        }
        Ok(())
    }
    check_links(arena, root)?;

    let mut prev: Option<NodeId> = None;
    let mut curr = first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if arena[prev as usize].key() >= arena[i as usize].key() {
                return Err("key order violated".to_string());
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }
    Ok(())
}

/// Debug printer for binary subtrees. `label` renders one node.
pub fn print_subtree<N, F>(arena: &[N], node: Option<NodeId>, tab: &str, label: &F) -> String
where
    N: TreeLinks,
    F: Fn(NodeId) -> String,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let deeper = format!("{tab}  ");
            let left = print_subtree(arena, arena[i as usize].l(), &deeper, label);
            let right = print_subtree(arena, arena[i as usize].r(), &deeper, label);
            format!("{}\n{tab}L={left}\n{tab}R={right}", label(i))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct N {
        p: Option<NodeId>,
        l: Option<NodeId>,
        r: Option<NodeId>,
        k: i64,
    }

    impl TreeLinks for N {
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

    impl KeyLinks<i64> for N {
        fn key(&self) -> &i64 {
            &self.k
        }
        fn set_key(&mut self, key: i64) {
            self.k = key;
        }
    }

    fn node(k: i64) -> N {
        N {
            p: None,
            l: None,
            r: None,
            k,
        }
    }

    /// Arena of `1 ← 2 → 3` with node 0 (key 2) as root.
    fn small_tree() -> (Vec<N>, NodeId) {
        let mut arena = vec![node(2), node(1), node(3)];
        arena[0].l = Some(1);
        arena[0].r = Some(2);
        arena[1].p = Some(0);
        arena[2].p = Some(0);
        (arena, 0)
    }

    #[test]
    fn in_order_walks_ascending() {
        let (arena, root) = small_tree();
        assert_eq!(in_order_keys(&arena, Some(root)), vec![1, 2, 3]);
        assert_eq!(first(&arena, Some(root)), Some(1));
        assert_eq!(last(&arena, Some(root)), Some(2));
    }

    #[test]
    fn rotations_are_inverse() {
        let (mut arena, root) = small_tree();
        let top = rotate_left(&mut arena, root);
        assert_eq!(top, 2);
        assert_eq!(arena[2].l(), Some(0));
        assert!(assert_search_tree(&arena, Some(top)).is_ok());

        let back = rotate_right(&mut arena, top);
        assert_eq!(back, root);
        assert!(assert_search_tree(&arena, Some(back)).is_ok());
        assert_eq!(in_order_keys(&arena, Some(back)), vec![1, 2, 3]);
    }

    #[test]
    fn splice_out_reattaches_single_child() {
        let (mut arena, root) = small_tree();
        // remove the left leaf (key 1)
        let (new_root, parent) = splice_out(&mut arena, Some(root), 1);
        assert_eq!(new_root, Some(root));
        assert_eq!(parent, Some(root));
        assert_eq!(in_order_keys(&arena, new_root), vec![2, 3]);
    }
}
