//! Digraph containers and the capability traits they expose.

pub mod builder;
pub mod ids;
pub mod mutable_digraph;
pub mod static_digraph;
pub mod static_forward;
pub mod traits;

pub use builder::DigraphBuilder;
pub use ids::{ArcId, IdRange, VertexId};
pub use mutable_digraph::MutableDigraph;
pub use static_digraph::StaticDigraph;
pub use static_forward::StaticForwardDigraph;
pub use traits::{ArcSource, BackwardIncidence, Digraph, ForwardIncidence, InDegree, MapFactory};
