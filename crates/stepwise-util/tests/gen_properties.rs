use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;

use stepwise_util::SeededGen;

proptest! {
    #[test]
    fn distinct_keys_are_distinct(seed in any::<[u8; 32]>(), len in 0usize..64) {
        let gen = SeededGen::new(Some(seed));
        let keys = gen.distinct_keys(len, -1_000, 1_000);
        prop_assert_eq!(keys.len(), len);
        let unique: HashSet<i64> = keys.iter().copied().collect();
        prop_assert_eq!(unique.len(), len);
    }

    #[test]
    fn edge_lists_are_connected_simple_graphs(
        seed in any::<[u8; 32]>(),
        n in 2usize..12,
        extras in 0usize..10,
    ) {
        let gen = SeededGen::new(Some(seed));
        let edges = gen.connected_edge_list(n, extras, 50);
        prop_assert!(edges.len() >= n - 1);
        prop_assert!(edges.len() <= n - 1 + extras);

        let mut adjacency = vec![Vec::new(); n];
        for (i, &(a, b, w)) in edges.iter().enumerate() {
            prop_assert!(a != b);
            prop_assert!((a as usize) < n && (b as usize) < n);
            prop_assert!((0..=50).contains(&w));
            let dup = edges[..i]
                .iter()
                .any(|&(x, y, _)| (x == a && y == b) || (x == b && y == a));
            prop_assert!(!dup);
            adjacency[a as usize].push(b as usize);
            adjacency[b as usize].push(a as usize);
        }

        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }
}
