//! `DigraphBuilder`: collect arc pairs in any order, emit a static digraph.
//!
//! The CSR constructors require sources in non-decreasing order; the
//! builder absorbs `(u, v)` pairs as they come, stably sorts them by
//! source, and hands the parallel sequences over. Because the sort is
//! stable, arcs with the same source keep their insertion order, and the
//! identifier of each arc equals its position in the sorted sequence.

use crate::error::DigraphError;

use super::ids::VertexId;
use super::static_digraph::StaticDigraph;
use super::static_forward::StaticForwardDigraph;

/// Accumulates arc pairs for a static digraph of `nb_vertices` vertices.
#[derive(Clone, Debug)]
pub struct DigraphBuilder {
    nb_vertices: usize,
    pairs: Vec<(VertexId, VertexId)>,
}

impl DigraphBuilder {
    /// Builder over the vertex domain `[0, nb_vertices)`.
    pub fn new(nb_vertices: usize) -> Self {
        Self {
            nb_vertices,
            pairs: Vec::new(),
        }
    }

    /// Record the arc `u → v`. Endpoints are validated when building.
    pub fn add_arc(&mut self, u: VertexId, v: VertexId) -> &mut Self {
        self.pairs.push((u, v));
        self
    }

    /// Number of arcs recorded so far.
    pub fn nb_arcs(&self) -> usize {
        self.pairs.len()
    }

    fn into_sorted_parallel(mut self) -> (usize, Vec<VertexId>, Vec<VertexId>) {
        self.pairs.sort_by_key(|&(u, _)| u);
        let (sources, targets) = self.pairs.into_iter().unzip();
        (self.nb_vertices, sources, targets)
    }

    /// Emit a [`StaticForwardDigraph`].
    ///
    /// # Errors
    /// [`DigraphError::VertexOutOfRange`] when a recorded endpoint does not
    /// fit the vertex domain.
    pub fn build_forward(self) -> Result<StaticForwardDigraph, DigraphError> {
        let (n, sources, targets) = self.into_sorted_parallel();
        StaticForwardDigraph::try_new(n, &sources, targets)
    }

    /// Emit a [`StaticDigraph`].
    ///
    /// # Errors
    /// [`DigraphError::VertexOutOfRange`] when a recorded endpoint does not
    /// fit the vertex domain.
    pub fn build(self) -> Result<StaticDigraph, DigraphError> {
        let (n, sources, targets) = self.into_sorted_parallel();
        StaticDigraph::try_new(n, sources, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::traits::{ArcSource, Digraph, ForwardIncidence};

    fn v(i: u32) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn sorts_by_source_keeping_insertion_order() {
        let mut b = DigraphBuilder::new(4);
        b.add_arc(v(2), v(3))
            .add_arc(v(0), v(2))
            .add_arc(v(0), v(1))
            .add_arc(v(1), v(3));
        let g = b.build().unwrap();
        let entries: Vec<_> = g.arcs().map(|a| (g.source(a), g.target(a))).collect();
        assert_eq!(
            entries,
            vec![
                (v(0), v(2)),
                (v(0), v(1)),
                (v(1), v(3)),
                (v(2), v(3)),
            ]
        );
        assert_eq!(g.out_arcs(v(0)).count(), 2);
    }

    #[test]
    fn rejects_endpoints_outside_domain() {
        let mut b = DigraphBuilder::new(2);
        b.add_arc(v(0), v(9));
        assert_eq!(
            b.build_forward().unwrap_err(),
            DigraphError::VertexOutOfRange {
                vertex: 9,
                nb_vertices: 2
            }
        );
    }
}
