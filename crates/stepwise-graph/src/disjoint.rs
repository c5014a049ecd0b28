//! Disjoint-set forest with union by rank and path compression.
//!
//! Both optimizations are always on; the near-constant amortized bound
//! needs them together. The traced `find` narrates each parent hop and
//! then each repointing of the compressed path, which is the part hosts
//! animate.

use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    size: Vec<usize>,
    sets: usize,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            size: vec![1; n],
            sets: n,
        }
    }

    /// Add one singleton and return its id.
    pub fn make_set(&mut self) -> Report<usize> {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.size.push(1);
        self.sets += 1;
        let mut trace = Trace::new();
        trace.add(
            StepKind::Insert,
            format!("creating the singleton set {{{id}}}"),
            vec![id as NodeId],
        );
        Report::ok(id, trace)
    }

    fn check_bounds(&self, id: usize) -> Result<(), EngineError> {
        if id < self.parent.len() {
            Ok(())
        } else {
            Err(EngineError::InvalidInput(format!(
                "element {id} does not exist"
            )))
        }
    }

    /// Root of `id`'s set, without compression or steps.
    pub(crate) fn root_of(&self, mut id: usize) -> usize {
        while self.parent[id] != id {
            id = self.parent[id];
        }
        id
    }

    /// Repoint everything on `id`'s path directly at the root; returns
    /// the root and the repointed elements.
    fn compress(&mut self, id: usize) -> (usize, Vec<usize>) {
        let root = self.root_of(id);
        let mut repointed = Vec::new();
        let mut curr = id;
        while self.parent[curr] != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            repointed.push(curr);
            curr = next;
        }
        (root, repointed)
    }

    /// Find with full path compression.
    pub fn find(&mut self, id: usize) -> Report<usize> {
        let mut trace = Trace::new();
        if let Err(e) = self.check_bounds(id) {
            return Report::err(e, trace);
        }

        let mut curr = id;
        while self.parent[curr] != curr {
            let next = self.parent[curr];
            trace.add(
                StepKind::Visit,
                format!("following {curr} to its parent {next}"),
                vec![curr as NodeId, next as NodeId],
            );
            curr = next;
        }
        trace.add(
            StepKind::Found,
            format!("{id} belongs to the set rooted at {curr}"),
            vec![curr as NodeId],
        );

        let (root, repointed) = self.compress(id);
        for n in repointed {
            trace.add(
                StepKind::Link,
                format!("repointing {n} directly to root {root}"),
                vec![n as NodeId, root as NodeId],
            );
        }
        Report::ok(root, trace)
    }

    /// Union by rank; returns whether a merge happened.
    pub fn union(&mut self, a: usize, b: usize) -> Report<bool> {
        let mut trace = Trace::new();
        if let Err(e) = self.check_bounds(a).and_then(|_| self.check_bounds(b)) {
            return Report::err(e, trace);
        }

        let ra = self.compress(a).0;
        let rb = self.compress(b).0;
        trace.add(
            StepKind::Compare,
            format!("roots are {ra} and {rb}"),
            vec![ra as NodeId, rb as NodeId],
        );
        if ra == rb {
            trace.add(
                StepKind::Info,
                format!("{a} and {b} are already in the same set"),
                vec![ra as NodeId],
            );
            return Report::ok(false, trace);
        }

        // lower rank goes underneath; on a tie the left root wins and
        // its rank grows
        let (top, bottom) = if self.rank[ra] >= self.rank[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[bottom] = top;
        self.size[top] += self.size[bottom];
        if self.rank[top] == self.rank[bottom] {
            self.rank[top] += 1;
        }
        self.sets -= 1;
        trace.add(
            StepKind::Link,
            format!(
                "attaching root {bottom} under root {top} (set size {})",
                self.size[top]
            ),
            vec![bottom as NodeId, top as NodeId],
        );
        Report::ok(true, trace)
    }

    /// Merge without a trace, for engines that embed this forest.
    pub(crate) fn merge(&mut self, a: usize, b: usize) -> bool {
        let ra = self.compress(a).0;
        let rb = self.compress(b).0;
        if ra == rb {
            return false;
        }
        let (top, bottom) = if self.rank[ra] >= self.rank[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[bottom] = top;
        self.size[top] += self.size[bottom];
        if self.rank[top] == self.rank[bottom] {
            self.rank[top] += 1;
        }
        self.sets -= 1;
        true
    }

    /// True if both elements share a root. Compresses on the way.
    pub fn connected(&mut self, a: usize, b: usize) -> Result<bool, EngineError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        Ok(self.compress(a).0 == self.compress(b).0)
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Size of the set containing `id`.
    pub fn size_of(&mut self, id: usize) -> Result<usize, EngineError> {
        self.check_bounds(id)?;
        let root = self.compress(id).0;
        Ok(self.size[root])
    }

    /// Parent table snapshot, for hosts drawing the forest.
    pub fn parents(&self) -> Vec<usize> {
        self.parent.clone()
    }

    pub fn validate(&self) -> Result<(), String> {
        let n = self.parent.len();
        let mut roots = 0;
        let mut total = 0;
        for i in 0..n {
            if self.parent[i] >= n {
                return Err(format!("parent of {i} is out of range"));
            }
            if self.parent[i] == i {
                roots += 1;
                total += self.size[i];
            }
        }
        if roots != self.sets {
            return Err(format!("{roots} roots but {} sets recorded", self.sets));
        }
        if total != n {
            return Err(format!("root sizes sum to {total}, expected {n}"));
        }
        // every chain must terminate
        for i in 0..n {
            let mut hops = 0;
            let mut curr = i;
            while self.parent[curr] != curr {
                curr = self.parent[curr];
                hops += 1;
                if hops > n {
                    return Err(format!("cycle in the parent chain of {i}"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_by_rank_ties_go_left() {
        let mut ds = DisjointSet::new(4);
        assert!(ds.union(0, 1).expect_ok("valid ids"));
        // equal ranks: 0 stays the root and its rank grows
        assert_eq!(ds.find(1).expect_ok("valid id"), 0);
        assert!(ds.union(2, 3).expect_ok("valid ids"));
        assert!(ds.union(1, 3).expect_ok("valid ids"));
        assert_eq!(ds.set_count(), 1);
        assert_eq!(ds.size_of(3).unwrap(), 4);
        ds.validate().unwrap();
    }

    #[test]
    fn find_compresses_the_whole_path() {
        let mut ds = DisjointSet::new(5);
        // build a deliberate chain 4 -> 3 -> 2 -> 1 -> 0
        for i in (0..4).rev() {
            ds.parent[i + 1] = i;
        }
        ds.sets = 1;
        ds.size[0] = 5;

        let report = ds.find(4);
        assert_eq!(report.expect_ok("valid id"), 0);
        // every non-root ends up pointing straight at the root
        assert_eq!(ds.parents(), vec![0, 0, 0, 0, 0]);
        ds.validate().unwrap();
    }

    #[test]
    fn union_of_united_sets_reports_false() {
        let mut ds = DisjointSet::new(2);
        assert!(ds.union(0, 1).expect_ok("valid ids"));
        let report = ds.union(0, 1);
        assert!(!report.expect_ok("valid ids"));
        assert_eq!(ds.set_count(), 1);
    }

    #[test]
    fn out_of_range_ids_are_rejected() {
        let mut ds = DisjointSet::new(2);
        assert!(matches!(
            ds.find(7).error(),
            Some(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            ds.union(0, 7).error(),
            Some(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn make_set_grows_the_forest() {
        let mut ds = DisjointSet::new(0);
        let a = ds.make_set().expect_ok("append runs");
        let b = ds.make_set().expect_ok("append runs");
        assert_eq!((a, b), (0, 1));
        assert_eq!(ds.set_count(), 2);
        assert!(!ds.connected(a, b).unwrap());
    }
}
