use stepwise_graph::{EngineError, Graph, StepKind};

/// Seven nodes, twelve weighted edges, minimum spanning weight 34.
/// Weights 5, 7, 8 and 9 each appear on two edges, so tie ordering
/// matters in both MST algorithms.
fn reference_graph() -> Graph {
    let mut g = Graph::new();
    for id in 1..=7 {
        g.add_node(id).unwrap();
    }
    let edges = [
        (1, 2, 7),
        (1, 4, 5),
        (2, 3, 8),
        (2, 4, 9),
        (2, 5, 7),
        (3, 5, 5),
        (4, 5, 15),
        (4, 6, 6),
        (5, 6, 8),
        (5, 7, 9),
        (6, 7, 11),
        (3, 7, 4),
    ];
    for (a, b, w) in edges {
        g.add_edge(a, b, w).unwrap();
    }
    g
}

#[test]
fn reference_graph_mst_matrix() {
    let g = reference_graph();
    assert_eq!(g.node_count(), 7);
    assert_eq!(g.edge_count(), 12);
    g.validate().unwrap();

    let k = g.kruskal().expect_ok("connected graph");
    assert_eq!(k.edges.len(), 6);
    assert_eq!(k.total, 34);

    for start in 1..=7 {
        let p = g.prim(start).expect_ok("connected graph");
        assert_eq!(p.edges.len(), 6);
        assert_eq!(p.total, k.total, "start {start} disagrees with kruskal");
    }
}

#[test]
fn reference_graph_shortest_paths_matrix() {
    let g = reference_graph();
    // 1-4-6 = 11 beats 1-2-5-6 = 22
    let sp = g.dijkstra(1, 6).expect_ok("target reachable");
    assert_eq!(sp.path, vec![1, 4, 6]);
    assert_eq!(sp.total, 11);

    // 1-2-3-7 = 19 beats 1-4-6-7 = 22 and 1-2-5-7 = 23
    let sp = g.dijkstra(1, 7).expect_ok("target reachable");
    assert_eq!(sp.total, 19);
    assert_eq!(sp.path, vec![1, 2, 3, 7]);
}

#[test]
fn traversals_cover_the_reference_graph_matrix() {
    let g = reference_graph();
    let bfs = g.bfs(1, None).expect_ok("start exists");
    assert_eq!(bfs.order.len(), 7);
    assert_eq!(bfs.order[0], 1);
    // level 1 is exactly 1's neighborhood, ascending
    assert_eq!(&bfs.order[1..3], &[2, 4]);

    let dfs = g.dfs(1, None).expect_ok("start exists");
    assert_eq!(dfs.order.len(), 7);
    assert_eq!(dfs.order[..2], [1, 2]);

    let mut sorted = bfs.order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (1..=7).collect::<Vec<_>>());
}

#[test]
fn identical_runs_produce_identical_traces_matrix() {
    let g = reference_graph();
    let a = g.bfs(1, Some(7));
    let b = g.bfs(1, Some(7));
    assert_eq!(a.steps, b.steps);

    let a = g.kruskal();
    let b = g.kruskal();
    assert_eq!(a.steps, b.steps);

    let a = g.dijkstra(1, 7);
    let b = g.dijkstra(1, 7);
    assert_eq!(a.steps, b.steps);
}

#[test]
fn select_and_reject_steps_tell_the_mst_story_matrix() {
    let g = reference_graph();
    let report = g.kruskal();
    let selected = report
        .steps
        .iter()
        .filter(|s| s.kind == StepKind::SelectEdge)
        .count();
    assert_eq!(selected, 6);
    report.expect_ok("connected graph");
}

#[test]
fn error_surface_matrix() {
    let mut g = reference_graph();
    g.add_node(99).unwrap();

    assert_eq!(g.bfs(1, Some(99)).error(), Some(&EngineError::Disconnected));
    assert_eq!(g.dijkstra(99, 1).error(), Some(&EngineError::Disconnected));
    assert_eq!(g.kruskal().error(), Some(&EngineError::Disconnected));
    assert!(matches!(
        g.bfs(1000, None).error(),
        Some(EngineError::InvalidInput(_))
    ));
}
