//! The capability lattice: trait surface shared by every digraph container.
//!
//! A container always knows its vertex and arc sets and the target of each
//! arc ([`Digraph`]). Everything else is an optional capability expressed as
//! an additional trait: out-arc enumeration ([`ForwardIncidence`]), in-arc
//! enumeration ([`BackwardIncidence`]), O(1) arc sources ([`ArcSource`]),
//! O(1) in-degrees ([`InDegree`]), and state-map factories ([`MapFactory`]).
//! Which capabilities a graph has is a property of its type; engines take
//! them as trait bounds and dispatch at construction, never per iteration.

use crate::map::{BitMap, DenseMap};

use super::ids::{ArcId, VertexId};

/// Minimal digraph surface: vertex/arc enumeration plus arc targets.
///
/// Enumeration order is well defined per container and stable as long as
/// the graph is not mutated.
pub trait Digraph {
    type VertexIter<'a>: Iterator<Item = VertexId>
    where
        Self: 'a;
    type ArcIter<'a>: Iterator<Item = ArcId>
    where
        Self: 'a;

    /// Number of (live) vertices.
    fn nb_vertices(&self) -> usize;
    /// Number of (live) arcs.
    fn nb_arcs(&self) -> usize;
    /// All vertices, in the container's enumeration order.
    fn vertices(&self) -> Self::VertexIter<'_>;
    /// All arcs, in the container's enumeration order.
    fn arcs(&self) -> Self::ArcIter<'_>;
    /// Whether `v` names a vertex of this graph.
    fn is_valid_vertex(&self, v: VertexId) -> bool;
    /// Whether `a` names an arc of this graph.
    fn is_valid_arc(&self, a: ArcId) -> bool;
    /// Head of arc `a`.
    fn target(&self, a: ArcId) -> VertexId;
}

/// Enumerates the arcs leaving a vertex.
pub trait ForwardIncidence: Digraph {
    type OutArcIter<'a>: Iterator<Item = ArcId>
    where
        Self: 'a;

    /// Arcs `a` with `source(a) == v`, in stable order.
    fn out_arcs(&self, v: VertexId) -> Self::OutArcIter<'_>;
}

/// Enumerates the arcs entering a vertex.
pub trait BackwardIncidence: Digraph {
    type InArcIter<'a>: Iterator<Item = ArcId>
    where
        Self: 'a;

    /// Arcs `a` with `target(a) == v`, in stable order.
    fn in_arcs(&self, v: VertexId) -> Self::InArcIter<'_>;
}

/// O(1) access to arc sources.
pub trait ArcSource: Digraph {
    /// Tail of arc `a`.
    fn source(&self, a: ArcId) -> VertexId;
}

/// O(1) (or precomputed) in-degrees.
pub trait InDegree: Digraph {
    /// Number of arcs entering `v`.
    fn in_degree(&self, v: VertexId) -> usize;
}

/// Factories for engine state keyed by this graph's identifiers.
///
/// Maps produced here share the graph's indexing, including slots for
/// currently dead identifiers in the mutable container, so an engine never
/// indexes past the domain a handle came from.
pub trait MapFactory: Digraph {
    /// Dense vertex-keyed map, every entry `init`.
    fn create_vertex_map<T: Clone>(&self, init: T) -> DenseMap<VertexId, T>;
    /// Dense arc-keyed map, every entry `init`.
    fn create_arc_map<T: Clone>(&self, init: T) -> DenseMap<ArcId, T>;
    /// Vertex-keyed bit map, all clear.
    fn create_vertex_bitmap(&self) -> BitMap<VertexId>;
    /// Arc-keyed bit map, all clear.
    fn create_arc_bitmap(&self) -> BitMap<ArcId>;
}
