//! Traversal engines over the capability traits.
//!
//! Every engine borrows its graph (and cost map) immutably for its whole
//! lifetime, owns the state maps it builds from the graph's factory, and
//! steps through the same triad: `add_source` seeds, `advance` settles one
//! vertex, `run` drains, `reset` clears without reallocating. Engines are
//! plain single-threaded state machines; two engines over the same graph
//! are independent.

pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod semiring;
pub mod topological_sort;
pub mod trace;

pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use semiring::{
    MostReliableSemiring, Semiring, SemiringOrder, ShortestPathSemiring, WidestPathSemiring,
};
pub use topological_sort::{toposort, TopologicalSort};
pub use trace::VertexTrace;
