//! Breadth-first search over any graph with forward incidence.
//!
//! The engine owns a queue preallocated to the vertex count and driven by a
//! front cursor, plus a reached bitmap from the graph's factory. Traversal
//! is strictly FIFO across sources, so with several sources vertices settle
//! in non-decreasing order of unweighted distance from the nearest one.
//!
//! Optional per-vertex stores (predecessor vertex, predecessor arc, depth)
//! are enabled by the `record_*` methods, which move the engine to a type
//! carrying a real map; select them before seeding sources. The engine is
//! an [`Iterator`] over the vertices it settles.

use crate::graph::{ArcId, Digraph, ForwardIncidence, MapFactory, VertexId};
use crate::map::{BitMap, DenseMap};

use super::trace::VertexTrace;

/// Queue-based traversal engine.
pub struct Bfs<'g, G, PV = (), PA = (), DP = ()> {
    graph: &'g G,
    queue: Vec<VertexId>,
    head: usize,
    reached: BitMap<VertexId>,
    pred_vertices: PV,
    pred_arcs: PA,
    depths: DP,
}

impl<'g, G: ForwardIncidence + MapFactory> Bfs<'g, G> {
    /// Engine over `graph` with no sources and no optional stores.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            queue: Vec::with_capacity(graph.nb_vertices()),
            head: 0,
            reached: graph.create_vertex_bitmap(),
            pred_vertices: (),
            pred_arcs: (),
            depths: (),
        }
    }

    /// Engine seeded with a single source.
    pub fn from_source(graph: &'g G, s: VertexId) -> Self {
        let mut engine = Self::new(graph);
        engine.add_source(s);
        engine
    }
}

impl<'g, G, PV, PA, DP> Bfs<'g, G, PV, PA, DP>
where
    G: ForwardIncidence + MapFactory,
    PV: VertexTrace<VertexId>,
    PA: VertexTrace<Option<ArcId>>,
    DP: VertexTrace<u32>,
{
    /// Store the predecessor vertex of every reached vertex.
    pub fn record_pred_vertices(self) -> Bfs<'g, G, DenseMap<VertexId, VertexId>, PA, DP> {
        let store = self.graph.create_vertex_map(VertexId::new(0));
        Bfs {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            pred_vertices: store,
            pred_arcs: self.pred_arcs,
            depths: self.depths,
        }
    }

    /// Store the predecessor arc of every reached vertex.
    pub fn record_pred_arcs(self) -> Bfs<'g, G, PV, DenseMap<VertexId, Option<ArcId>>, DP> {
        let store = self.graph.create_vertex_map(None);
        Bfs {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            pred_vertices: self.pred_vertices,
            pred_arcs: store,
            depths: self.depths,
        }
    }

    /// Store the unweighted distance of every reached vertex.
    pub fn record_depths(self) -> Bfs<'g, G, PV, PA, DenseMap<VertexId, u32>> {
        let store = self.graph.create_vertex_map(0u32);
        Bfs {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            pred_vertices: self.pred_vertices,
            pred_arcs: self.pred_arcs,
            depths: store,
        }
    }

    /// Clear transient state without reallocating; stores keep stale
    /// values until their vertices are rediscovered.
    pub fn reset(&mut self) -> &mut Self {
        self.queue.clear();
        self.head = 0;
        self.reached.fill(false);
        self
    }

    /// Seed the traversal at `s`. Requires `s` not yet reached.
    pub fn add_source(&mut self, s: VertexId) -> &mut Self {
        debug_assert!(self.graph.is_valid_vertex(s));
        debug_assert!(!self.reached.get(s), "add_source() on a reached vertex");
        self.reached.set(s, true);
        self.queue.push(s);
        self.pred_vertices.record(s, s);
        self.pred_arcs.record(s, None);
        self.depths.record(s, 0);
        self
    }

    /// Whether the queue is exhausted.
    #[inline]
    pub fn finished(&self) -> bool {
        self.head == self.queue.len()
    }

    /// Next vertex to be settled. Requires `!finished()`.
    #[inline]
    pub fn current(&self) -> VertexId {
        debug_assert!(!self.finished(), "current() on a finished engine");
        self.queue[self.head]
    }

    /// Settle the current vertex: enqueue its unreached out-neighbours and
    /// update the enabled stores. Returns the settled vertex.
    pub fn advance(&mut self) -> VertexId {
        debug_assert!(!self.finished(), "advance() on a finished engine");
        let u = self.queue[self.head];
        self.head += 1;
        let next_depth = if DP::ENABLED {
            self.depths.recall(u) + 1
        } else {
            0
        };
        for a in self.graph.out_arcs(u) {
            let w = self.graph.target(a);
            if self.reached.get(w) {
                continue;
            }
            self.reached.set(w, true);
            self.queue.push(w);
            self.pred_vertices.record(w, u);
            self.pred_arcs.record(w, Some(a));
            self.depths.record(w, next_depth);
        }
        u
    }

    /// Drain the queue.
    pub fn run(&mut self) {
        while !self.finished() {
            self.advance();
        }
    }

    /// Whether `u` has been discovered.
    #[inline]
    pub fn reached(&self, u: VertexId) -> bool {
        self.reached.get(u)
    }
}

impl<'g, G, PV, PA, DP> Iterator for Bfs<'g, G, PV, PA, DP>
where
    G: ForwardIncidence + MapFactory,
    PV: VertexTrace<VertexId>,
    PA: VertexTrace<Option<ArcId>>,
    DP: VertexTrace<u32>,
{
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        if self.finished() {
            None
        } else {
            Some(self.advance())
        }
    }
}

impl<'g, G, PA, DP> Bfs<'g, G, DenseMap<VertexId, VertexId>, PA, DP> {
    /// Predecessor vertex of a reached vertex; a source is its own
    /// predecessor.
    pub fn pred_vertex(&self, u: VertexId) -> VertexId {
        debug_assert!(self.reached.get(u), "pred_vertex() on an unreached vertex");
        self.pred_vertices[u]
    }
}

impl<'g, G, PV, DP> Bfs<'g, G, PV, DenseMap<VertexId, Option<ArcId>>, DP> {
    /// Arc through which `u` was reached, `None` for a source.
    pub fn pred_arc(&self, u: VertexId) -> Option<ArcId> {
        debug_assert!(self.reached.get(u), "pred_arc() on an unreached vertex");
        self.pred_arcs[u]
    }
}

impl<'g, G, PV, PA> Bfs<'g, G, PV, PA, DenseMap<VertexId, u32>> {
    /// Unweighted distance from the nearest source to `u`.
    pub fn depth(&self, u: VertexId) -> u32 {
        debug_assert!(self.reached.get(u), "depth() on an unreached vertex");
        self.depths[u]
    }
}
