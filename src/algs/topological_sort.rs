//! Topological traversal by in-degree reduction.
//!
//! A remaining-in-degree counter is seeded either by one counting pass
//! over `arcs()` or, when the graph answers in-degrees in O(1), straight
//! from that capability ([`TopologicalSort::from_in_degrees`]). Vertices
//! whose counter is zero are enqueued; settling a vertex decrements the
//! counter of each out-neighbour and enqueues those that hit zero.
//!
//! A cycle is not an error here: the queue simply drains before every
//! vertex is reached, which callers observe through
//! [`reached`](TopologicalSort::reached) or a count. The [`toposort`]
//! convenience turns that outcome into [`DigraphError::CycleDetected`].

use crate::error::DigraphError;
use crate::graph::{ArcId, Digraph, ForwardIncidence, InDegree, MapFactory, VertexId};
use crate::map::{BitMap, DenseMap};

use super::trace::VertexTrace;

/// Kahn-style traversal engine.
pub struct TopologicalSort<'g, G, PV = (), PA = (), DP = ()> {
    graph: &'g G,
    queue: Vec<VertexId>,
    head: usize,
    reached: BitMap<VertexId>,
    remaining_in_degree: DenseMap<VertexId, u32>,
    pred_vertices: PV,
    pred_arcs: PA,
    depths: DP,
}

impl<'g, G: ForwardIncidence + MapFactory> TopologicalSort<'g, G> {
    /// Engine over `graph`; in-degrees come from one pass over the arcs.
    pub fn new(graph: &'g G) -> Self {
        let mut engine = Self {
            graph,
            queue: Vec::with_capacity(graph.nb_vertices()),
            head: 0,
            reached: graph.create_vertex_bitmap(),
            remaining_in_degree: graph.create_vertex_map(0u32),
            pred_vertices: (),
            pred_arcs: (),
            depths: (),
        };
        engine.seed_from_arc_pass();
        engine
    }
}

impl<'g, G: ForwardIncidence + MapFactory + InDegree> TopologicalSort<'g, G> {
    /// Engine over `graph`, seeding the counter from the graph's O(1)
    /// in-degrees instead of an arc pass.
    pub fn from_in_degrees(graph: &'g G) -> Self {
        let mut engine = Self {
            graph,
            queue: Vec::with_capacity(graph.nb_vertices()),
            head: 0,
            reached: graph.create_vertex_bitmap(),
            remaining_in_degree: graph.create_vertex_map(0u32),
            pred_vertices: (),
            pred_arcs: (),
            depths: (),
        };
        for v in graph.vertices() {
            engine.remaining_in_degree[v] = graph.in_degree(v) as u32;
        }
        engine.seed_zero_counters();
        engine
    }
}

impl<'g, G, PV, PA, DP> TopologicalSort<'g, G, PV, PA, DP>
where
    G: ForwardIncidence + MapFactory,
    PV: VertexTrace<VertexId>,
    PA: VertexTrace<Option<ArcId>>,
    DP: VertexTrace<u32>,
{
    /// Store the predecessor vertex of every non-seed vertex; a seed is
    /// its own predecessor. Select stores before stepping the engine.
    pub fn record_pred_vertices(
        self,
    ) -> TopologicalSort<'g, G, DenseMap<VertexId, VertexId>, PA, DP> {
        let mut store = self.graph.create_vertex_map(VertexId::new(0));
        for &seed in &self.queue {
            store[seed] = seed;
        }
        TopologicalSort {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            remaining_in_degree: self.remaining_in_degree,
            pred_vertices: store,
            pred_arcs: self.pred_arcs,
            depths: self.depths,
        }
    }

    /// Store the last in-arc that released each non-seed vertex.
    pub fn record_pred_arcs(
        self,
    ) -> TopologicalSort<'g, G, PV, DenseMap<VertexId, Option<ArcId>>, DP> {
        let store = self.graph.create_vertex_map(None);
        TopologicalSort {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            remaining_in_degree: self.remaining_in_degree,
            pred_vertices: self.pred_vertices,
            pred_arcs: store,
            depths: self.depths,
        }
    }

    /// Store each vertex's traversal depth.
    pub fn record_depths(self) -> TopologicalSort<'g, G, PV, PA, DenseMap<VertexId, u32>> {
        let store = self.graph.create_vertex_map(0u32);
        TopologicalSort {
            graph: self.graph,
            queue: self.queue,
            head: self.head,
            reached: self.reached,
            remaining_in_degree: self.remaining_in_degree,
            pred_vertices: self.pred_vertices,
            pred_arcs: self.pred_arcs,
            depths: store,
        }
    }

    fn seed_from_arc_pass(&mut self) {
        for a in self.graph.arcs() {
            let w = self.graph.target(a);
            self.remaining_in_degree[w] += 1;
        }
        self.seed_zero_counters();
    }

    fn seed_zero_counters(&mut self) {
        for v in self.graph.vertices() {
            if self.remaining_in_degree[v] == 0 {
                self.reached.set(v, true);
                self.queue.push(v);
                self.pred_vertices.record(v, v);
                self.pred_arcs.record(v, None);
                self.depths.record(v, 0);
            }
        }
    }

    /// Clear transient state and reseed from a fresh counting pass,
    /// without reallocating.
    pub fn reset(&mut self) -> &mut Self {
        self.queue.clear();
        self.head = 0;
        self.reached.fill(false);
        self.remaining_in_degree.fill(0);
        self.seed_from_arc_pass();
        self
    }

    /// Whether the queue is exhausted. A drained queue with unreached
    /// vertices left means those vertices lie on a cycle.
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

    /// Settle the current vertex and release any out-neighbour whose
    /// remaining in-degree drops to zero. Returns the settled vertex.
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
            self.remaining_in_degree[w] -= 1;
            if self.remaining_in_degree[w] > 0 {
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

    /// Whether `u` has been enqueued.
    #[inline]
    pub fn reached(&self, u: VertexId) -> bool {
        self.reached.get(u)
    }

    /// Number of vertices enqueued so far; strictly below `nb_vertices`
    /// after a full run exactly when the graph has a cycle.
    #[inline]
    pub fn nb_reached(&self) -> usize {
        self.queue.len()
    }
}

impl<'g, G, PV, PA, DP> Iterator for TopologicalSort<'g, G, PV, PA, DP>
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

impl<'g, G, PA, DP> TopologicalSort<'g, G, DenseMap<VertexId, VertexId>, PA, DP> {
    /// Predecessor vertex of a reached vertex; a seed is its own
    /// predecessor.
    pub fn pred_vertex(&self, u: VertexId) -> VertexId {
        debug_assert!(self.reached.get(u), "pred_vertex() on an unreached vertex");
        self.pred_vertices[u]
    }
}

impl<'g, G, PV, DP> TopologicalSort<'g, G, PV, DenseMap<VertexId, Option<ArcId>>, DP> {
    /// In-arc that released `u`, `None` for a seed.
    pub fn pred_arc(&self, u: VertexId) -> Option<ArcId> {
        debug_assert!(self.reached.get(u), "pred_arc() on an unreached vertex");
        self.pred_arcs[u]
    }
}

impl<'g, G, PV, PA> TopologicalSort<'g, G, PV, PA, DenseMap<VertexId, u32>> {
    /// Traversal depth of `u`.
    pub fn depth(&self, u: VertexId) -> u32 {
        debug_assert!(self.reached.get(u), "depth() on an unreached vertex");
        self.depths[u]
    }
}

/// Full topological order of `graph`.
///
/// # Errors
/// [`DigraphError::CycleDetected`] when the traversal drains before
/// reaching every vertex.
///
/// # Example
/// ```rust
/// use digraph_kit::algs::topological_sort::toposort;
/// use digraph_kit::graph::{DigraphBuilder, VertexId};
/// let v = |i| VertexId::new(i);
/// let mut b = DigraphBuilder::new(3);
/// b.add_arc(v(2), v(1)).add_arc(v(1), v(0));
/// let g = b.build_forward()?;
/// assert_eq!(toposort(&g)?, vec![v(2), v(1), v(0)]);
/// # Ok::<(), digraph_kit::error::DigraphError>(())
/// ```
pub fn toposort<G>(graph: &G) -> Result<Vec<VertexId>, DigraphError>
where
    G: ForwardIncidence + MapFactory,
{
    let engine = TopologicalSort::new(graph);
    let order: Vec<VertexId> = engine.collect();
    if order.len() == graph.nb_vertices() {
        Ok(order)
    } else {
        Err(DigraphError::CycleDetected)
    }
}
