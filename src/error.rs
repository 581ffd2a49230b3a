//! `DigraphError`: unified error type for digraph-kit public APIs.
//!
//! Fallible construction (static containers, the arc-pair builder) and the
//! [`toposort`](crate::algs::topological_sort::toposort) convenience report
//! through this type. Traversal engines themselves never return errors:
//! contract violations are debug assertions, and domain outcomes such as an
//! unreachable vertex are observable through queries.

use thiserror::Error;

/// Unified error type for digraph-kit operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DigraphError {
    /// An arc endpoint does not name a vertex of the graph under construction.
    #[error("arc endpoint {vertex} is out of range for a digraph with {nb_vertices} vertices")]
    VertexOutOfRange { vertex: u32, nb_vertices: usize },
    /// The parallel `sources`/`targets` sequences have different lengths.
    #[error("sources and targets must have equal lengths ({sources} vs {targets})")]
    ArityMismatch { sources: usize, targets: usize },
    /// CSR construction requires arc sources in non-decreasing order.
    #[error("arc sources must be non-decreasing (violated at position {position})")]
    UnsortedSources { position: usize },
    /// The traversal drained before reaching every vertex; the remainder lies on a cycle.
    #[error("cycle detected among unvisited vertices")]
    CycleDetected,
    /// A raw index does not fit the dense 32-bit identifier range.
    #[error("index {0} exceeds the dense identifier range")]
    IdOverflow(usize),
}
