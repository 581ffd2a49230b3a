//! Shortest-path engine: Dijkstra generalised over an ordered semiring.
//!
//! The engine borrows a graph with forward incidence, an arc-keyed cost
//! map, and takes the algebra as a zero-sized type parameter so `plus`,
//! `less`, and `zero` inline into the relaxation loop. Its heap's position
//! map, produced by the graph's factory, doubles as the vertex status map:
//! unseen, in-heap, or settled.
//!
//! Settling is greedy and relies on the algebra's monotonicity: once a
//! vertex is popped no later relaxation can improve it, because any path
//! through a later-settled vertex extends a value that is already no
//! better. With a non-monotone algebra this engine is the wrong tool.
//!
//! Vertices settle in non-decreasing priority under the algebra's order;
//! iterating the engine yields `(vertex, value)` pairs in that order.

use std::ops::Index;

use crate::graph::{ArcId, ArcSource, Digraph, ForwardIncidence, MapFactory, VertexId};
use crate::heap::{DAryHeap, HeapSlot};
use crate::map::DenseMap;

use super::semiring::{Semiring, SemiringOrder};
use super::trace::VertexTrace;

/// Shortest-path traversal engine over a semiring `S`.
pub struct Dijkstra<'g, G, L, S: Semiring, PV = (), PA = (), DM = ()> {
    graph: &'g G,
    lengths: &'g L,
    heap: DAryHeap<2, VertexId, S::Value, SemiringOrder<S>>,
    pred_vertices: PV,
    pred_arcs: PA,
    distances: DM,
}

impl<'g, G, L, S> Dijkstra<'g, G, L, S>
where
    G: ForwardIncidence + MapFactory,
    L: Index<ArcId, Output = S::Value>,
    S: Semiring,
{
    /// Engine over `graph` and the arc costs in `lengths`, with no sources
    /// and no optional stores.
    pub fn new(graph: &'g G, lengths: &'g L) -> Self {
        Self {
            graph,
            lengths,
            heap: DAryHeap::with_positions(graph.create_vertex_map(HeapSlot::Unseen)),
            pred_vertices: (),
            pred_arcs: (),
            distances: (),
        }
    }

    /// Engine seeded with a single source at `S::zero()`.
    pub fn from_source(graph: &'g G, lengths: &'g L, s: VertexId) -> Self {
        let mut engine = Self::new(graph, lengths);
        engine.add_source(s);
        engine
    }
}

impl<'g, G, L, S, PV, PA, DM> Dijkstra<'g, G, L, S, PV, PA, DM>
where
    G: ForwardIncidence + MapFactory,
    L: Index<ArcId, Output = S::Value>,
    S: Semiring,
    PV: VertexTrace<VertexId>,
    PA: VertexTrace<Option<ArcId>>,
    DM: VertexTrace<S::Value>,
{
    /// Store the predecessor arc of every reached vertex.
    pub fn record_pred_arcs(
        self,
    ) -> Dijkstra<'g, G, L, S, PV, DenseMap<VertexId, Option<ArcId>>, DM> {
        let store = self.graph.create_vertex_map(None);
        Dijkstra {
            graph: self.graph,
            lengths: self.lengths,
            heap: self.heap,
            pred_vertices: self.pred_vertices,
            pred_arcs: store,
            distances: self.distances,
        }
    }

    /// Store the predecessor vertex explicitly. Only needed when the graph
    /// cannot answer `source(a)` in O(1); otherwise `pred_vertex` derives
    /// it from the stored arc.
    pub fn record_pred_vertices(
        self,
    ) -> Dijkstra<'g, G, L, S, DenseMap<VertexId, VertexId>, PA, DM> {
        let store = self.graph.create_vertex_map(VertexId::new(0));
        Dijkstra {
            graph: self.graph,
            lengths: self.lengths,
            heap: self.heap,
            pred_vertices: store,
            pred_arcs: self.pred_arcs,
            distances: self.distances,
        }
    }

    /// Store the final value of every settled vertex.
    pub fn record_distances(self) -> Dijkstra<'g, G, L, S, PV, PA, DenseMap<VertexId, S::Value>> {
        let store = self.graph.create_vertex_map(S::zero());
        Dijkstra {
            graph: self.graph,
            lengths: self.lengths,
            heap: self.heap,
            pred_vertices: self.pred_vertices,
            pred_arcs: self.pred_arcs,
            distances: store,
        }
    }

    /// Clear the heap and mark every vertex unseen, without reallocating.
    pub fn reset(&mut self) -> &mut Self {
        self.heap.reset();
        self
    }

    /// Seed the traversal at `s` with value `S::zero()`.
    pub fn add_source(&mut self, s: VertexId) -> &mut Self {
        self.add_source_with(s, S::zero())
    }

    /// Seed the traversal at `s` with an explicit initial value.
    /// Requires `s` not currently in the heap.
    pub fn add_source_with(&mut self, s: VertexId, value: S::Value) -> &mut Self {
        debug_assert!(self.graph.is_valid_vertex(s));
        debug_assert!(
            !matches!(self.heap.slot(s), HeapSlot::In(_)),
            "add_source() on an in-heap vertex"
        );
        self.heap.push(s, value);
        self.pred_arcs.record(s, None);
        self.pred_vertices.record(s, s);
        self
    }

    /// Whether the heap is exhausted.
    #[inline]
    pub fn finished(&self) -> bool {
        self.heap.is_empty()
    }

    /// Next vertex to settle and its final value. Requires `!finished()`.
    pub fn current(&self) -> (VertexId, S::Value) {
        debug_assert!(!self.finished(), "current() on a finished engine");
        let (v, value) = self.heap.top();
        (v, *value)
    }

    /// Settle the top vertex and relax its out-arcs. Returns the settled
    /// vertex and its final value.
    pub fn advance(&mut self) -> (VertexId, S::Value) {
        debug_assert!(!self.finished(), "advance() on a finished engine");
        let (t, t_value) = self.heap.pop();
        self.distances.record(t, t_value);
        for a in self.graph.out_arcs(t) {
            let w = self.graph.target(a);
            match self.heap.slot(w) {
                HeapSlot::In(_) => {
                    let relaxed = S::plus(t_value, self.lengths[a]);
                    if S::less(relaxed, *self.heap.priority(w)) {
                        self.heap.promote(w, relaxed);
                        self.pred_arcs.record(w, Some(a));
                        self.pred_vertices.record(w, t);
                    }
                }
                HeapSlot::Unseen => {
                    self.heap.push(w, S::plus(t_value, self.lengths[a]));
                    self.pred_arcs.record(w, Some(a));
                    self.pred_vertices.record(w, t);
                }
                HeapSlot::Settled => {}
            }
        }
        (t, t_value)
    }

    /// Drain the heap.
    pub fn run(&mut self) {
        while !self.finished() {
            self.advance();
        }
    }

    /// Whether `u` has been discovered.
    #[inline]
    pub fn reached(&self, u: VertexId) -> bool {
        !matches!(self.heap.slot(u), HeapSlot::Unseen)
    }

    /// Whether `u`'s value is final.
    #[inline]
    pub fn settled(&self, u: VertexId) -> bool {
        matches!(self.heap.slot(u), HeapSlot::Settled)
    }

    /// Tentative value of a reached but unsettled vertex.
    pub fn current_dist(&self, u: VertexId) -> S::Value {
        debug_assert!(!self.settled(u), "current_dist() on a settled vertex");
        *self.heap.priority(u)
    }
}

impl<'g, G, L, S, PV, PA, DM> Iterator for Dijkstra<'g, G, L, S, PV, PA, DM>
where
    G: ForwardIncidence + MapFactory,
    L: Index<ArcId, Output = S::Value>,
    S: Semiring,
    PV: VertexTrace<VertexId>,
    PA: VertexTrace<Option<ArcId>>,
    DM: VertexTrace<S::Value>,
{
    type Item = (VertexId, S::Value);

    fn next(&mut self) -> Option<(VertexId, S::Value)> {
        if self.finished() {
            None
        } else {
            Some(self.advance())
        }
    }
}

impl<'g, G, L, S, PV, PA> Dijkstra<'g, G, L, S, PV, PA, DenseMap<VertexId, S::Value>>
where
    S: Semiring,
{
    /// Final value of a settled vertex.
    pub fn dist(&self, u: VertexId) -> S::Value {
        debug_assert!(
            matches!(self.heap.slot(u), HeapSlot::Settled),
            "dist() on an unsettled vertex"
        );
        self.distances[u]
    }
}

impl<'g, G, L, S, PV, DM> Dijkstra<'g, G, L, S, PV, DenseMap<VertexId, Option<ArcId>>, DM>
where
    S: Semiring,
{
    /// Arc through which `u` was last improved, `None` for a source.
    pub fn pred_arc(&self, u: VertexId) -> Option<ArcId> {
        debug_assert!(
            !matches!(self.heap.slot(u), HeapSlot::Unseen),
            "pred_arc() on an unreached vertex"
        );
        self.pred_arcs[u]
    }
}

impl<'g, G, L, S, DM> Dijkstra<'g, G, L, S, (), DenseMap<VertexId, Option<ArcId>>, DM>
where
    G: ForwardIncidence + MapFactory + ArcSource,
    S: Semiring,
{
    /// Predecessor vertex, derived from the stored arc through the graph's
    /// O(1) `source`; a source vertex is its own predecessor.
    pub fn pred_vertex(&self, u: VertexId) -> VertexId {
        match self.pred_arc(u) {
            Some(a) => self.graph.source(a),
            None => u,
        }
    }

    /// Arcs of the best path to `t`, lazily, from `t` back to the source
    /// that reached it. Requires `t` settled.
    pub fn path_to(&self, t: VertexId) -> impl Iterator<Item = ArcId> + '_ {
        debug_assert!(
            matches!(self.heap.slot(t), HeapSlot::Settled),
            "path_to() on an unsettled vertex"
        );
        let mut cur = t;
        std::iter::from_fn(move || {
            let a = self.pred_arcs[cur]?;
            cur = self.graph.source(a);
            Some(a)
        })
    }
}

impl<'g, G, L, S, DM>
    Dijkstra<'g, G, L, S, DenseMap<VertexId, VertexId>, DenseMap<VertexId, Option<ArcId>>, DM>
where
    S: Semiring,
{
    /// Predecessor vertex from the explicit store; a source vertex is its
    /// own predecessor.
    pub fn pred_vertex(&self, u: VertexId) -> VertexId {
        debug_assert!(
            !matches!(self.heap.slot(u), HeapSlot::Unseen),
            "pred_vertex() on an unreached vertex"
        );
        self.pred_vertices[u]
    }

    /// Arcs of the best path to `t`, lazily, from `t` back to the source
    /// that reached it. Requires `t` settled.
    pub fn path_to(&self, t: VertexId) -> impl Iterator<Item = ArcId> + '_ {
        debug_assert!(
            matches!(self.heap.slot(t), HeapSlot::Settled),
            "path_to() on an unsettled vertex"
        );
        let mut cur = t;
        std::iter::from_fn(move || {
            let a = self.pred_arcs[cur]?;
            cur = self.pred_vertices[cur];
            Some(a)
        })
    }
}
