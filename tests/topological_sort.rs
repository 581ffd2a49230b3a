use digraph_kit::algs::{toposort, TopologicalSort};
use digraph_kit::error::DigraphError;
use digraph_kit::graph::{ArcSource, Digraph, DigraphBuilder, StaticDigraph, VertexId};

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

/// 0→2, 1→2, 2→3, 2→4, 3→5, 4→5.
fn dag() -> StaticDigraph {
    build(6, &[(0, 2), (1, 2), (2, 3), (2, 4), (3, 5), (4, 5)])
}

#[test]
fn order_respects_every_arc() {
    let g = dag();
    let order = toposort(&g).unwrap();
    assert_eq!(order.len(), 6);
    let position: Vec<usize> = {
        let mut pos = vec![0; 6];
        for (i, &u) in order.iter().enumerate() {
            pos[u.get() as usize] = i;
        }
        pos
    };
    for a in g.arcs() {
        assert!(
            position[g.source(a).get() as usize] < position[g.target(a).get() as usize],
            "arc {:?} out of order",
            a
        );
    }
}

#[test]
fn counting_pass_yields_the_expected_order() {
    let g = dag();
    assert_eq!(
        toposort(&g).unwrap(),
        vec![v(0), v(1), v(2), v(3), v(4), v(5)]
    );
}

#[test]
fn in_degree_seeding_matches_the_counting_pass() {
    let g = dag();
    let counted: Vec<_> = TopologicalSort::new(&g).collect();
    let direct: Vec<_> = TopologicalSort::from_in_degrees(&g).collect();
    assert_eq!(counted, direct);
}

#[test]
fn depths_grow_along_release_chains() {
    let g = dag();
    let mut topo = TopologicalSort::new(&g)
        .record_pred_vertices()
        .record_pred_arcs()
        .record_depths();
    topo.run();
    assert_eq!(topo.depth(v(0)), 0);
    assert_eq!(topo.depth(v(1)), 0);
    assert_eq!(topo.depth(v(2)), 1);
    assert_eq!(topo.depth(v(3)), 2);
    assert_eq!(topo.depth(v(4)), 2);
    assert_eq!(topo.depth(v(5)), 3);
    // 2 is released by its last predecessor, 1.
    assert_eq!(topo.pred_vertex(v(2)), v(1));
    assert_eq!(topo.pred_arc(v(0)), None);
    let releasing = topo.pred_arc(v(5)).unwrap();
    assert_eq!(g.target(releasing), v(5));
}

#[test]
fn cycle_members_stay_unreached() {
    // 0→1→2→0 plus an independent vertex 3.
    let g = build(4, &[(0, 1), (1, 2), (2, 0)]);
    let mut topo = TopologicalSort::new(&g);
    topo.run();
    assert!(topo.finished());
    assert_eq!(topo.nb_reached(), 1);
    assert!(topo.reached(v(3)));
    for cycle_member in [0, 1, 2] {
        assert!(!topo.reached(v(cycle_member)));
    }
    assert_eq!(toposort(&g).unwrap_err(), DigraphError::CycleDetected);
}

#[test]
fn stepping_interface_drains_in_order() {
    let g = dag();
    let mut topo = TopologicalSort::new(&g);
    let mut order = Vec::new();
    while !topo.finished() {
        order.push(topo.current());
        topo.advance();
    }
    assert_eq!(order, toposort(&g).unwrap());
}

#[test]
fn reset_reseeds_the_counters() {
    let g = dag();
    let mut topo = TopologicalSort::new(&g);
    topo.run();
    let first = topo.nb_reached();
    topo.reset();
    topo.run();
    assert_eq!(topo.nb_reached(), first);
}

#[test]
fn empty_graph_sorts_to_nothing() {
    let g = build(0, &[]);
    assert_eq!(toposort(&g).unwrap(), Vec::<VertexId>::new());
}
