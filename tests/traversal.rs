use digraph_kit::algs::{Bfs, Dfs};
use digraph_kit::graph::{Digraph, DigraphBuilder, MutableDigraph, StaticDigraph, VertexId};

fn v(i: u32) -> VertexId {
    VertexId::new(i)
}

fn build(n: usize, arcs: &[(u32, u32)]) -> StaticDigraph {
    let mut b = DigraphBuilder::new(n);
    for &(s, t) in arcs {
        b.add_arc(v(s), v(t));
    }
    b.build().unwrap()
}

/// 0→1, 0→2, 1→3, 2→3, 3→4.
fn diamond_chain() -> StaticDigraph {
    build(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)])
}

#[test]
fn bfs_depths_are_unweighted_distances() {
    let g = diamond_chain();
    let mut bfs = Bfs::new(&g)
        .record_pred_vertices()
        .record_pred_arcs()
        .record_depths();
    bfs.add_source(v(0));
    bfs.run();

    for (vertex, depth) in [(0, 0), (1, 1), (2, 1), (3, 2), (4, 3)] {
        assert!(bfs.reached(v(vertex)));
        assert_eq!(bfs.depth(v(vertex)), depth, "depth of {vertex}");
    }
    assert!([v(1), v(2)].contains(&bfs.pred_vertex(v(3))));
    assert_eq!(bfs.pred_vertex(v(0)), v(0));
    assert_eq!(bfs.pred_arc(v(0)), None);
    let arc_into_4 = bfs.pred_arc(v(4)).unwrap();
    assert_eq!(g.target(arc_into_4), v(4));
}

#[test]
fn bfs_visits_in_fifo_order() {
    let g = diamond_chain();
    let mut bfs = Bfs::from_source(&g, v(0));
    let order: Vec<_> = (&mut bfs).collect();
    assert_eq!(order, vec![v(0), v(1), v(2), v(3), v(4)]);
}

#[test]
fn multi_source_bfs_settles_by_nearest_source() {
    // 0→1→2→3 and a second source at 3's far side.
    let g = build(5, &[(0, 1), (1, 2), (2, 3), (4, 2)]);
    let mut bfs = Bfs::new(&g).record_depths();
    bfs.add_source(v(0));
    bfs.add_source(v(4));
    let order: Vec<_> = (&mut bfs).collect();
    assert_eq!(order, vec![v(0), v(4), v(1), v(2), v(3)]);
    assert_eq!(bfs.depth(v(2)), 1);
    assert_eq!(bfs.depth(v(3)), 2);
}

#[test]
fn bfs_stepping_matches_iteration() {
    let g = diamond_chain();
    let mut bfs = Bfs::from_source(&g, v(0));
    assert!(!bfs.finished());
    assert_eq!(bfs.current(), v(0));
    assert_eq!(bfs.advance(), v(0));
    assert_eq!(bfs.current(), v(1));
    bfs.run();
    assert!(bfs.finished());
}

#[test]
fn bfs_reset_reproduces_a_fresh_run() {
    let g = diamond_chain();
    let mut bfs = Bfs::new(&g).record_depths();
    bfs.add_source(v(0));
    bfs.run();
    let first: Vec<_> = g.vertices().map(|u| bfs.depth(u)).collect();

    bfs.reset();
    assert!(bfs.finished());
    bfs.add_source(v(0));
    bfs.run();
    let second: Vec<_> = g.vertices().map(|u| bfs.depth(u)).collect();
    assert_eq!(first, second);
}

/// The bidirected test graph: edges 0-1, 0-2, 0-5, 1-2, 1-3, 2-3, 2-5,
/// 3-4, 4-5 in both directions, vertices 6 and 7 isolated.
fn bidirected() -> StaticDigraph {
    let edges = [
        (0, 1),
        (0, 2),
        (0, 5),
        (1, 2),
        (1, 3),
        (2, 3),
        (2, 5),
        (3, 4),
        (4, 5),
    ];
    let mut b = DigraphBuilder::new(8);
    for &(x, y) in &edges {
        b.add_arc(v(x), v(y));
        b.add_arc(v(y), v(x));
    }
    b.build().unwrap()
}

#[test]
fn dfs_settles_last_pushed_neighbor_first() {
    let g = bidirected();
    let mut dfs = Dfs::from_source(&g, v(0));
    let order: Vec<_> = (&mut dfs).collect();
    assert_eq!(order, vec![v(0), v(5), v(4), v(3), v(2), v(1)]);
    assert!(!dfs.reached(v(6)));
    assert!(!dfs.reached(v(7)));
}

#[test]
fn dfs_stepping_walks_the_same_order() {
    let g = bidirected();
    let mut dfs = Dfs::from_source(&g, v(0));
    for expected in [0u32, 5, 4, 3, 2, 1] {
        assert!(!dfs.finished());
        assert_eq!(dfs.current(), v(expected));
        dfs.advance();
    }
    assert!(dfs.finished());
}

#[test]
fn dfs_depths_follow_discovery_parents() {
    let g = diamond_chain();
    let mut dfs = Dfs::new(&g).record_pred_vertices().record_depths();
    dfs.add_source(v(0));
    dfs.run();
    assert_eq!(dfs.depth(v(0)), 0);
    assert_eq!(dfs.depth(v(1)), 1);
    assert_eq!(dfs.depth(v(2)), 1);
    // 3 is discovered while settling 2 (the last-pushed neighbour of 0).
    assert_eq!(dfs.pred_vertex(v(3)), v(2));
    assert_eq!(dfs.depth(v(3)), 2);
    assert_eq!(dfs.depth(v(4)), 3);
}

#[test]
fn dfs_on_empty_out_degree_graph_finishes_immediately() {
    let g = build(2, &[]);
    let mut dfs = Dfs::from_source(&g, v(0));
    assert!(!dfs.finished());
    assert_eq!(dfs.current(), v(0));
    dfs.advance();
    assert!(dfs.finished());
    assert!(!dfs.reached(v(1)));
    dfs.reset();
    assert!(dfs.finished());
}

#[test]
fn engines_run_over_the_mutable_container() {
    // Same diamond-with-tail shape, built by mutation. Insertion order is
    // reversed so the newest-first adjacency matches the CSR enumeration.
    let mut g = MutableDigraph::new();
    let e = g.create_vertex();
    let d = g.create_vertex();
    let c = g.create_vertex();
    let b = g.create_vertex();
    let a = g.create_vertex();
    g.create_arc(d, e);
    g.create_arc(c, d);
    g.create_arc(b, d);
    g.create_arc(a, c);
    g.create_arc(a, b);

    let mut bfs = Bfs::new(&g).record_depths();
    bfs.add_source(a);
    let order: Vec<_> = (&mut bfs).collect();
    assert_eq!(order, vec![a, b, c, d, e]);
    assert_eq!(bfs.depth(e), 3);

    let mut dfs = Dfs::from_source(&g, a);
    let order: Vec<_> = (&mut dfs).collect();
    assert_eq!(order, vec![a, c, d, e, b]);
}
