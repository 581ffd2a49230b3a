use std::collections::HashSet;

use digraph_kit::graph::{
    ArcSource, BackwardIncidence, Digraph, ForwardIncidence, MapFactory, MutableDigraph, VertexId,
};

fn triangle() -> (MutableDigraph, [VertexId; 3]) {
    let mut g = MutableDigraph::new();
    let u = g.create_vertex();
    let v = g.create_vertex();
    let w = g.create_vertex();
    (g, [u, v, w])
}

#[test]
fn arcs_enumerate_over_live_vertices() {
    let (mut g, [u, v, w]) = triangle();
    let uv = g.create_arc(u, v);
    let vw = g.create_arc(v, w);
    let wu = g.create_arc(w, u);
    let all: HashSet<_> = g.arcs().collect();
    assert_eq!(all, HashSet::from([uv, vw, wu]));
    assert_eq!(g.arc_entries().count(), 3);
    g.debug_assert_invariants();
}

#[test]
fn endpoint_pair_multiset_survives_churn() {
    let (mut g, [u, v, w]) = triangle();
    let uv1 = g.create_arc(u, v);
    let _uv2 = g.create_arc(u, v);
    let vw = g.create_arc(v, w);
    let _wu = g.create_arc(w, u);
    g.debug_assert_invariants();

    g.remove_arc(uv1);
    g.debug_assert_invariants();
    g.change_arc_target(vw, u);
    g.debug_assert_invariants();

    let pairs: HashSet<_> = g.arc_entries().map(|(_, s, t)| (s, t)).collect();
    assert_eq!(pairs, HashSet::from([(u, v), (v, u), (w, u)]));
}

#[test]
fn remove_vertex_drops_every_incident_arc() {
    let (mut g, [u, v, w]) = triangle();
    g.create_arc(u, v);
    g.create_arc(v, w);
    g.create_arc(w, v);
    g.create_arc(v, v);
    assert_eq!(g.nb_arcs(), 4);

    g.remove_vertex(v);
    g.debug_assert_invariants();
    assert_eq!(g.nb_vertices(), 2);
    assert_eq!(g.nb_arcs(), 0);
    assert!(!g.is_valid_vertex(v));
    assert!(g.out_arcs(u).next().is_none());
    assert!(g.in_arcs(w).next().is_none());
}

#[test]
fn freed_arc_slots_are_all_reused() {
    let (mut g, [u, v, w]) = triangle();
    let a1 = g.create_arc(u, v);
    let a2 = g.create_arc(v, w);
    let a3 = g.create_arc(w, v);
    let a4 = g.create_arc(u, w);
    let freed = HashSet::from([a1, a2, a3, a4]);

    // Removing v frees its three incident arcs; removing u→w frees the rest.
    g.remove_vertex(v);
    g.remove_arc(a4);
    assert_eq!(g.nb_arcs(), 0);
    g.debug_assert_invariants();

    let reused: HashSet<_> = (0..4).map(|_| g.create_arc(u, w)).collect();
    assert_eq!(reused, freed);
    g.debug_assert_invariants();
}

#[test]
fn freed_vertex_slots_are_reused() {
    let (mut g, [u, v, _w]) = triangle();
    g.remove_vertex(v);
    let v2 = g.create_vertex();
    assert_eq!(v2, v);
    assert_eq!(g.nb_vertices(), 3);
    assert!(g.out_arcs(v2).next().is_none());
    assert!(g.in_arcs(v2).next().is_none());
    let _ = u;
    g.debug_assert_invariants();
}

#[test]
fn change_arc_source_moves_to_new_out_list() {
    let (mut g, [u, v, w]) = triangle();
    let a1 = g.create_arc(u, v);
    let a2 = g.create_arc(w, v);
    g.change_arc_source(a1, w);
    g.debug_assert_invariants();

    assert_eq!(g.source(a1), w);
    assert_eq!(g.target(a1), v);
    assert!(g.out_arcs(u).next().is_none());
    // Rewired arcs land at the head of the new host list.
    assert_eq!(g.out_arcs(w).collect::<Vec<_>>(), vec![a1, a2]);
    // A no-op rewire leaves the list untouched.
    g.change_arc_source(a1, w);
    assert_eq!(g.out_arcs(w).collect::<Vec<_>>(), vec![a1, a2]);
}

#[test]
fn change_arc_target_moves_to_new_in_list() {
    let (mut g, [u, v, w]) = triangle();
    let a1 = g.create_arc(u, v);
    let a2 = g.create_arc(u, w);
    g.change_arc_target(a1, w);
    g.debug_assert_invariants();

    assert_eq!(g.target(a1), w);
    assert!(g.in_arcs(v).next().is_none());
    assert_eq!(g.in_arcs(w).collect::<Vec<_>>(), vec![a1, a2]);
}

#[test]
fn factories_cover_the_whole_arena() {
    let (mut g, [u, v, _w]) = triangle();
    let a1 = g.create_arc(u, v);
    g.remove_arc(a1);
    // Maps must still have slots for dead identifiers.
    let vm = g.create_vertex_map(0u32);
    let am = g.create_arc_map(0u32);
    assert_eq!(vm.len(), 3);
    assert_eq!(am.len(), 1);
    assert_eq!(g.create_vertex_bitmap().len(), 3);
}

#[test]
fn isolated_vertex_has_empty_views() {
    let mut g = MutableDigraph::new();
    let u = g.create_vertex();
    assert_eq!(g.out_neighbors(u).count(), 0);
    assert_eq!(g.in_neighbors(u).count(), 0);
    assert_eq!(g.arcs().count(), 0);
}
