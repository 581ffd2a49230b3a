//! # digraph-kit
//!
//! digraph-kit is a directed-graph algorithms core: a family of digraph
//! containers behind a uniform capability-based trait surface, the
//! traversal engines built on top of it, and the data structures they
//! need. It is designed for callers that construct a graph once (or
//! mutate it between traversals) and then run many cheap,
//! allocation-free traversals over it.
//!
//! ## Features
//! - Static CSR containers ([`graph::StaticForwardDigraph`],
//!   [`graph::StaticDigraph`]) and a fully mutable arena container
//!   ([`graph::MutableDigraph`]) with O(1) insertion, removal, and
//!   endpoint rewiring
//! - A capability lattice of traits (forward/backward incidence, O(1)
//!   arc sources, O(1) in-degrees, state-map factories) that engines take
//!   as compile-time bounds
//! - BFS, DFS, and Kahn topological traversal with optional predecessor
//!   and depth stores that compile away when unused
//! - A shortest-path engine parameterised by an ordered semiring, serving
//!   shortest, widest, and most-reliable path problems with one loop
//! - An addressable d-ary heap with decrease-key, and dense keyed
//!   map/bit-map primitives
//!
//! ## Usage
//! ```rust
//! use digraph_kit::prelude::*;
//!
//! let v = |i| VertexId::new(i);
//! let mut b = DigraphBuilder::new(4);
//! b.add_arc(v(0), v(1)).add_arc(v(0), v(2)).add_arc(v(1), v(3)).add_arc(v(2), v(3));
//! let g = b.build()?;
//!
//! let costs = g.create_arc_map(1u32);
//! let mut dijkstra = Dijkstra::<_, _, ShortestPathSemiring<u32>>::from_source(&g, &costs, v(0))
//!     .record_distances();
//! dijkstra.run();
//! assert_eq!(dijkstra.dist(v(3)), 2);
//! # Ok::<(), digraph_kit::error::DigraphError>(())
//! ```
//!
//! ## Contracts
//! Engines borrow their graph immutably; mutating a graph while an engine
//! borrows it is rejected by the borrow checker. Out-of-range keys,
//! stepping a finished engine, and similar misuse are programming errors
//! checked by debug assertions (kept in release builds with the
//! `strict-invariants` feature). Unreachable targets and topological
//! cycles are not errors: they are ordinary outcomes observable through
//! the engines' queries.

mod _debug_invariants;

pub mod algs;
pub mod error;
pub mod graph;
pub mod heap;
pub mod map;

/// A convenient prelude to import the most-used traits and types.
pub mod prelude {
    pub use crate::algs::{
        toposort, Bfs, Dfs, Dijkstra, MostReliableSemiring, Semiring, ShortestPathSemiring,
        TopologicalSort, WidestPathSemiring,
    };
    pub use crate::error::DigraphError;
    pub use crate::graph::{
        ArcId, ArcSource, BackwardIncidence, Digraph, DigraphBuilder, ForwardIncidence, InDegree,
        MapFactory, MutableDigraph, StaticDigraph, StaticForwardDigraph, VertexId,
    };
    pub use crate::heap::{DAryHeap, HeapSlot};
    pub use crate::map::{BitMap, DenseKey, DenseMap};
}
