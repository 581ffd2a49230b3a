//! Fully mutable digraph over an arena of intrusively linked records.
//!
//! Vertex and arc records live in two growable arrays and never move; all
//! list structure is index-based. Each vertex heads two intrusive
//! doubly-linked arc lists (its out-arcs and its in-arcs) and sits on a
//! global doubly-linked list of live vertices. Removed slots are recycled
//! through singly-linked free-lists threaded through the same records: a
//! free vertex reuses `next_vertex`, a free arc reuses `next_in` (unused
//! precisely when the arc is not on any in-list).
//!
//! All mutations are O(1) except `remove_vertex`, which is O(deg).
//! Enumeration follows list order, which is newest-first because insertion
//! pushes at the head. Neighbour views are lazy index walks borrowing the
//! graph, so the borrow checker rules out mutation while a walk is live.
//!
//! Arc handles are invalidated by `remove_arc` and by `remove_vertex` of
//! either endpoint; a later insertion may reuse the same identifier, and
//! holders that did not observe the removal must not assume otherwise.

use crate::map::{BitMap, DenseKey, DenseMap};

use super::ids::{ArcId, VertexId};
use super::traits::{ArcSource, BackwardIncidence, Digraph, ForwardIncidence, MapFactory};

const NONE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct VertexNode {
    first_out: u32,
    first_in: u32,
    prev_vertex: u32,
    next_vertex: u32,
}

#[derive(Clone, Copy, Debug)]
struct ArcNode {
    source: u32,
    target: u32,
    prev_in: u32,
    next_in: u32,
    prev_out: u32,
    next_out: u32,
}

/// Mutable digraph with O(1) insertion, removal, and endpoint rewiring.
#[derive(Clone, Debug)]
pub struct MutableDigraph {
    vertices: Vec<VertexNode>,
    arcs: Vec<ArcNode>,
    vertex_alive: BitMap<VertexId>,
    arc_alive: BitMap<ArcId>,
    first_vertex: u32,
    first_free_vertex: u32,
    first_free_arc: u32,
    nb_vertices: usize,
    nb_arcs: usize,
}

impl Default for MutableDigraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableDigraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            arcs: Vec::new(),
            vertex_alive: BitMap::new(0),
            arc_alive: BitMap::new(0),
            first_vertex: NONE,
            first_free_vertex: NONE,
            first_free_arc: NONE,
            nb_vertices: 0,
            nb_arcs: 0,
        }
    }

    /// Insert a new isolated vertex at the head of the live list.
    pub fn create_vertex(&mut self) -> VertexId {
        let node = VertexNode {
            first_out: NONE,
            first_in: NONE,
            prev_vertex: NONE,
            next_vertex: self.first_vertex,
        };
        let id = if self.first_free_vertex == NONE {
            let id = self.vertices.len() as u32;
            self.vertices.push(node);
            self.vertex_alive.push(true);
            id
        } else {
            let id = self.first_free_vertex;
            self.first_free_vertex = self.vertices[id as usize].next_vertex;
            self.vertices[id as usize] = node;
            self.vertex_alive.set(VertexId::new(id), true);
            id
        };
        if self.first_vertex != NONE {
            self.vertices[self.first_vertex as usize].prev_vertex = id;
        }
        self.first_vertex = id;
        self.nb_vertices += 1;
        VertexId::new(id)
    }

    /// Insert the arc `from → to` at the head of both incidence lists.
    pub fn create_arc(&mut self, from: VertexId, to: VertexId) -> ArcId {
        debug_assert!(self.is_valid_vertex(from));
        debug_assert!(self.is_valid_vertex(to));
        let old_first_out = self.vertices[from.index()].first_out;
        let old_first_in = self.vertices[to.index()].first_in;
        let node = ArcNode {
            source: from.get(),
            target: to.get(),
            prev_in: NONE,
            next_in: old_first_in,
            prev_out: NONE,
            next_out: old_first_out,
        };
        let id = if self.first_free_arc == NONE {
            let id = self.arcs.len() as u32;
            self.arcs.push(node);
            self.arc_alive.push(true);
            id
        } else {
            let id = self.first_free_arc;
            self.first_free_arc = self.arcs[id as usize].next_in;
            self.arcs[id as usize] = node;
            self.arc_alive.set(ArcId::new(id), true);
            id
        };
        if old_first_in != NONE {
            self.arcs[old_first_in as usize].prev_in = id;
        }
        self.vertices[to.index()].first_in = id;
        if old_first_out != NONE {
            self.arcs[old_first_out as usize].prev_out = id;
        }
        self.vertices[from.index()].first_out = id;
        self.nb_arcs += 1;
        ArcId::new(id)
    }

    fn unlink_from_source_out(&mut self, a: u32) {
        let node = self.arcs[a as usize];
        if node.next_out != NONE {
            self.arcs[node.next_out as usize].prev_out = node.prev_out;
        }
        if node.prev_out != NONE {
            self.arcs[node.prev_out as usize].next_out = node.next_out;
        } else {
            self.vertices[node.source as usize].first_out = node.next_out;
        }
    }

    fn unlink_from_target_in(&mut self, a: u32) {
        let node = self.arcs[a as usize];
        if node.next_in != NONE {
            self.arcs[node.next_in as usize].prev_in = node.prev_in;
        }
        if node.prev_in != NONE {
            self.arcs[node.prev_in as usize].next_in = node.next_in;
        } else {
            self.vertices[node.target as usize].first_in = node.next_in;
        }
    }

    /// Remove arc `a`, invalidating its handle.
    pub fn remove_arc(&mut self, a: ArcId) {
        debug_assert!(self.is_valid_arc(a));
        let raw = a.get();
        self.unlink_from_source_out(raw);
        self.unlink_from_target_in(raw);
        self.arcs[a.index()].next_in = self.first_free_arc;
        self.first_free_arc = raw;
        self.arc_alive.set(a, false);
        self.nb_arcs -= 1;
    }

    fn remove_incident_arcs(&mut self, v: VertexId) {
        // In-arcs stay chained by `next_in`, which becomes the free link.
        let first_in = self.vertices[v.index()].first_in;
        let mut last_in = NONE;
        let mut cur = first_in;
        while cur != NONE {
            self.unlink_from_source_out(cur);
            self.arc_alive.set(ArcId::new(cur), false);
            self.nb_arcs -= 1;
            last_in = cur;
            cur = self.arcs[cur as usize].next_in;
        }
        // Out-arcs were chained by `next_out`; once each is unlinked from
        // its target's in-list, `next_in` is free to carry the chain.
        let first_out = self.vertices[v.index()].first_out;
        let mut last_out = NONE;
        let mut cur = first_out;
        while cur != NONE {
            let next = self.arcs[cur as usize].next_out;
            self.unlink_from_target_in(cur);
            self.arcs[cur as usize].next_in = next;
            self.arc_alive.set(ArcId::new(cur), false);
            self.nb_arcs -= 1;
            last_out = cur;
            cur = next;
        }
        if last_in != NONE {
            self.arcs[last_in as usize].next_in = self.first_free_arc;
            self.first_free_arc = first_in;
        }
        if last_out != NONE {
            self.arcs[last_out as usize].next_in = self.first_free_arc;
            self.first_free_arc = first_out;
        }
    }

    /// Remove vertex `v` and every incident arc. O(deg(v)); every incident
    /// arc handle is invalidated.
    pub fn remove_vertex(&mut self, v: VertexId) {
        debug_assert!(self.is_valid_vertex(v));
        self.remove_incident_arcs(v);
        let node = self.vertices[v.index()];
        if node.next_vertex != NONE {
            self.vertices[node.next_vertex as usize].prev_vertex = node.prev_vertex;
        }
        if node.prev_vertex != NONE {
            self.vertices[node.prev_vertex as usize].next_vertex = node.next_vertex;
        } else {
            self.first_vertex = node.next_vertex;
        }
        self.vertices[v.index()].next_vertex = self.first_free_vertex;
        self.first_free_vertex = v.get();
        self.vertex_alive.set(v, false);
        self.nb_vertices -= 1;
    }

    /// Rewire arc `a` to leave `s`; it moves to the head of `s`'s out-list.
    pub fn change_arc_source(&mut self, a: ArcId, s: VertexId) {
        debug_assert!(self.is_valid_arc(a));
        debug_assert!(self.is_valid_vertex(s));
        if self.arcs[a.index()].source == s.get() {
            return;
        }
        self.unlink_from_source_out(a.get());
        let old_first = self.vertices[s.index()].first_out;
        {
            let node = &mut self.arcs[a.index()];
            node.source = s.get();
            node.prev_out = NONE;
            node.next_out = old_first;
        }
        if old_first != NONE {
            self.arcs[old_first as usize].prev_out = a.get();
        }
        self.vertices[s.index()].first_out = a.get();
    }

    /// Rewire arc `a` to enter `t`; it moves to the head of `t`'s in-list.
    pub fn change_arc_target(&mut self, a: ArcId, t: VertexId) {
        debug_assert!(self.is_valid_arc(a));
        debug_assert!(self.is_valid_vertex(t));
        if self.arcs[a.index()].target == t.get() {
            return;
        }
        self.unlink_from_target_in(a.get());
        let old_first = self.vertices[t.index()].first_in;
        {
            let node = &mut self.arcs[a.index()];
            node.target = t.get();
            node.prev_in = NONE;
            node.next_in = old_first;
        }
        if old_first != NONE {
            self.arcs[old_first as usize].prev_in = a.get();
        }
        self.vertices[t.index()].first_in = a.get();
    }

    /// Heads of the arcs leaving `v`.
    pub fn out_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_arcs(v).map(|a| self.target(a))
    }

    /// Tails of the arcs entering `v`.
    pub fn in_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_arcs(v).map(|a| self.source(a))
    }

    /// `(arc, source, target)` triples in enumeration order.
    pub fn arc_entries(&self) -> impl Iterator<Item = (ArcId, VertexId, VertexId)> + '_ {
        self.arcs().map(|a| (a, self.source(a), self.target(a)))
    }

    /// Check that the valid bitmap, the out-list walks, and the in-list
    /// walks all describe the same arc multiset, and that the live-vertex
    /// list matches the vertex bitmap. A no-op unless debug assertions or
    /// the `strict-invariants` feature are enabled.
    pub fn debug_assert_invariants(&self) {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        self.assert_invariants_impl();
    }

    #[cfg(any(debug_assertions, feature = "strict-invariants"))]
    fn assert_invariants_impl(&self) {
        use crate::_debug_invariants::{count_pairs, counts_equal, inv_assert, inv_assert_eq};

        let live: Vec<VertexId> = self.vertices().collect();
        inv_assert_eq!(live.len(), self.nb_vertices, "live-vertex list length");
        for &v in &live {
            inv_assert!(self.vertex_alive.get(v), "dead vertex on the live list");
        }
        inv_assert_eq!(
            self.vertex_alive.count_ones(),
            self.nb_vertices,
            "vertex bitmap cardinality"
        );

        let by_filter = count_pairs(
            self.arc_alive
                .ones()
                .map(|a| (self.arcs[a.index()].source, self.arcs[a.index()].target)),
        );
        let by_out = count_pairs(live.iter().flat_map(|&v| {
            self.out_arcs(v).map(move |a| {
                let node = &self.arcs[a.index()];
                inv_assert_eq!(node.source, v.get(), "out-list hosts a foreign arc");
                (node.source, node.target)
            })
        }));
        let by_in = count_pairs(live.iter().flat_map(|&v| {
            self.in_arcs(v).map(move |a| {
                let node = &self.arcs[a.index()];
                inv_assert_eq!(node.target, v.get(), "in-list hosts a foreign arc");
                (node.source, node.target)
            })
        }));
        counts_equal(&by_filter, &by_out, "valid bitmap", "out-list walk");
        counts_equal(&by_filter, &by_in, "valid bitmap", "in-list walk");
        inv_assert_eq!(
            self.arc_alive.count_ones(),
            self.nb_arcs,
            "arc bitmap cardinality"
        );

        let mut free = self.first_free_arc;
        while free != NONE {
            inv_assert!(
                !self.arc_alive.get(ArcId::new(free)),
                "live arc on the free list"
            );
            free = self.arcs[free as usize].next_in;
        }
    }
}

// --- lazy enumeration views -------------------------------------------------

/// Walk of the live-vertex list.
pub struct LiveVertices<'a> {
    nodes: &'a [VertexNode],
    cur: u32,
}

impl Iterator for LiveVertices<'_> {
    type Item = VertexId;
    fn next(&mut self) -> Option<VertexId> {
        if self.cur == NONE {
            return None;
        }
        let v = self.cur;
        self.cur = self.nodes[v as usize].next_vertex;
        Some(VertexId::new(v))
    }
}

/// Walk of one vertex's out-list.
pub struct OutArcs<'a> {
    nodes: &'a [ArcNode],
    cur: u32,
}

impl Iterator for OutArcs<'_> {
    type Item = ArcId;
    fn next(&mut self) -> Option<ArcId> {
        if self.cur == NONE {
            return None;
        }
        let a = self.cur;
        self.cur = self.nodes[a as usize].next_out;
        Some(ArcId::new(a))
    }
}

/// Walk of one vertex's in-list.
pub struct InArcs<'a> {
    nodes: &'a [ArcNode],
    cur: u32,
}

impl Iterator for InArcs<'_> {
    type Item = ArcId;
    fn next(&mut self) -> Option<ArcId> {
        if self.cur == NONE {
            return None;
        }
        let a = self.cur;
        self.cur = self.nodes[a as usize].next_in;
        Some(ArcId::new(a))
    }
}

/// Walk of every arc: live vertices in list order, each one's out-list.
pub struct AllArcs<'a> {
    graph: &'a MutableDigraph,
    vertex: u32,
    arc: u32,
}

impl Iterator for AllArcs<'_> {
    type Item = ArcId;
    fn next(&mut self) -> Option<ArcId> {
        while self.arc == NONE {
            if self.vertex == NONE {
                return None;
            }
            let node = &self.graph.vertices[self.vertex as usize];
            self.arc = node.first_out;
            self.vertex = node.next_vertex;
        }
        let a = self.arc;
        self.arc = self.graph.arcs[a as usize].next_out;
        Some(ArcId::new(a))
    }
}

// --- trait impls ------------------------------------------------------------

impl Digraph for MutableDigraph {
    type VertexIter<'a>
        = LiveVertices<'a>
    where
        Self: 'a;
    type ArcIter<'a>
        = AllArcs<'a>
    where
        Self: 'a;

    #[inline]
    fn nb_vertices(&self) -> usize {
        self.nb_vertices
    }
    #[inline]
    fn nb_arcs(&self) -> usize {
        self.nb_arcs
    }
    fn vertices(&self) -> LiveVertices<'_> {
        LiveVertices {
            nodes: &self.vertices,
            cur: self.first_vertex,
        }
    }
    fn arcs(&self) -> AllArcs<'_> {
        AllArcs {
            graph: self,
            vertex: self.first_vertex,
            arc: NONE,
        }
    }
    #[inline]
    fn is_valid_vertex(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len() && self.vertex_alive.get(v)
    }
    #[inline]
    fn is_valid_arc(&self, a: ArcId) -> bool {
        a.index() < self.arcs.len() && self.arc_alive.get(a)
    }
    #[inline]
    fn target(&self, a: ArcId) -> VertexId {
        debug_assert!(self.is_valid_arc(a));
        VertexId::new(self.arcs[a.index()].target)
    }
}

impl ForwardIncidence for MutableDigraph {
    type OutArcIter<'a>
        = OutArcs<'a>
    where
        Self: 'a;

    fn out_arcs(&self, v: VertexId) -> OutArcs<'_> {
        debug_assert!(self.is_valid_vertex(v));
        OutArcs {
            nodes: &self.arcs,
            cur: self.vertices[v.index()].first_out,
        }
    }
}

impl BackwardIncidence for MutableDigraph {
    type InArcIter<'a>
        = InArcs<'a>
    where
        Self: 'a;

    fn in_arcs(&self, v: VertexId) -> InArcs<'_> {
        debug_assert!(self.is_valid_vertex(v));
        InArcs {
            nodes: &self.arcs,
            cur: self.vertices[v.index()].first_in,
        }
    }
}

impl ArcSource for MutableDigraph {
    #[inline]
    fn source(&self, a: ArcId) -> VertexId {
        debug_assert!(self.is_valid_arc(a));
        VertexId::new(self.arcs[a.index()].source)
    }
}

impl MapFactory for MutableDigraph {
    // Maps span the whole arena so handles to dead slots still index safely.
    fn create_vertex_map<T: Clone>(&self, init: T) -> DenseMap<VertexId, T> {
        DenseMap::new(self.vertices.len(), init)
    }
    fn create_arc_map<T: Clone>(&self, init: T) -> DenseMap<ArcId, T> {
        DenseMap::new(self.arcs.len(), init)
    }
    fn create_vertex_bitmap(&self) -> BitMap<VertexId> {
        BitMap::new(self.vertices.len())
    }
    fn create_arc_bitmap(&self) -> BitMap<ArcId> {
        BitMap::new(self.arcs.len())
    }
}
