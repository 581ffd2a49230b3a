//! Immutable forward-only digraph in compressed sparse row layout.
//!
//! Stores one offset array of `n + 1` entries and one target array of `m`
//! entries. Arc `a` belongs to the unique row `v` with
//! `out_begin[v] <= a < out_begin[v + 1]`, so arc identifiers coincide with
//! positions in the source-sorted input order. There is no reverse
//! adjacency and no O(1) `source`; callers that need either should use
//! [`StaticDigraph`](crate::graph::StaticDigraph).

use crate::error::DigraphError;
use crate::map::{BitMap, DenseKey, DenseMap};

use super::ids::{ArcId, IdRange, VertexId};
use super::traits::{Digraph, ForwardIncidence, MapFactory};

/// Immutable CSR digraph with forward incidence only.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StaticForwardDigraph {
    /// `n + 1` offsets into `arc_target`; `out_begin[n] == nb_arcs`.
    out_begin: DenseMap<VertexId, ArcId>,
    arc_target: DenseMap<ArcId, VertexId>,
}

pub(crate) fn check_arc_input(
    nb_vertices: usize,
    sources: &[VertexId],
    targets: &[VertexId],
) -> Result<(), DigraphError> {
    if sources.len() != targets.len() {
        return Err(DigraphError::ArityMismatch {
            sources: sources.len(),
            targets: targets.len(),
        });
    }
    for &v in sources.iter().chain(targets) {
        if v.index() >= nb_vertices {
            return Err(DigraphError::VertexOutOfRange {
                vertex: v.get(),
                nb_vertices,
            });
        }
    }
    if let Some(position) = sources.windows(2).position(|w| w[0] > w[1]) {
        return Err(DigraphError::UnsortedSources {
            position: position + 1,
        });
    }
    Ok(())
}

pub(crate) fn out_offsets(nb_vertices: usize, sources: &[VertexId]) -> DenseMap<VertexId, ArcId> {
    let mut counts = vec![0u32; nb_vertices + 1];
    for s in sources {
        counts[s.index() + 1] += 1;
    }
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
    DenseMap::from_vec(counts.into_iter().map(ArcId::new).collect())
}

impl StaticForwardDigraph {
    /// Build from parallel `sources`/`targets` sequences.
    ///
    /// `sources` must be non-decreasing; arc `i` is `sources[i] → targets[i]`.
    ///
    /// # Errors
    /// [`DigraphError::ArityMismatch`] when the sequences differ in length,
    /// [`DigraphError::VertexOutOfRange`] for an endpoint `>= nb_vertices`,
    /// [`DigraphError::UnsortedSources`] when `sources` is not sorted.
    ///
    /// # Example
    /// ```rust
    /// use digraph_kit::graph::{Digraph, ForwardIncidence, StaticForwardDigraph, VertexId};
    /// let v = |i| VertexId::new(i);
    /// let g = StaticForwardDigraph::try_new(3, &[v(0), v(0), v(1)], vec![v(1), v(2), v(2)])?;
    /// assert_eq!(g.nb_arcs(), 3);
    /// assert_eq!(g.out_arcs(v(0)).count(), 2);
    /// # Ok::<(), digraph_kit::error::DigraphError>(())
    /// ```
    pub fn try_new(
        nb_vertices: usize,
        sources: &[VertexId],
        targets: Vec<VertexId>,
    ) -> Result<Self, DigraphError> {
        check_arc_input(nb_vertices, sources, &targets)?;
        Ok(Self {
            out_begin: out_offsets(nb_vertices, sources),
            arc_target: DenseMap::from_vec(targets),
        })
    }

    /// Tail of arc `a`, recovered by binary search over the offsets in
    /// O(log n). Use [`StaticDigraph`](crate::graph::StaticDigraph) when
    /// sources are needed in O(1).
    pub fn source(&self, a: ArcId) -> VertexId {
        debug_assert!(self.is_valid_arc(a));
        let ends = &self.out_begin.as_slice()[1..];
        let row = ends.partition_point(|end| end.get() <= a.get());
        VertexId::from_index(row)
    }

    /// Heads of the arcs leaving `v`, in arc order.
    pub fn out_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let (lo, hi) = self.out_range(v);
        self.arc_target.as_slice()[lo..hi].iter().copied()
    }

    /// Number of arcs leaving `v`.
    pub fn out_degree(&self, v: VertexId) -> usize {
        let (lo, hi) = self.out_range(v);
        hi - lo
    }

    #[inline]
    fn out_range(&self, v: VertexId) -> (usize, usize) {
        debug_assert!(self.is_valid_vertex(v));
        let lo = self.out_begin[v].index();
        let hi = self.out_begin[VertexId::from_index(v.index() + 1)].index();
        (lo, hi)
    }

    /// Check CSR structure: offsets non-decreasing, bounded by the arc
    /// count, and every target in range. A no-op unless debug assertions
    /// or the `strict-invariants` feature are enabled.
    pub fn debug_assert_invariants(&self) {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        self.assert_invariants_impl();
    }

    #[cfg(any(debug_assertions, feature = "strict-invariants"))]
    fn assert_invariants_impl(&self) {
        use crate::_debug_invariants::{inv_assert, inv_assert_eq};
        let offsets = self.out_begin.as_slice();
        inv_assert_eq!(offsets[0].index(), 0, "first offset must be zero");
        inv_assert!(
            offsets.windows(2).all(|w| w[0] <= w[1]),
            "offsets must be non-decreasing"
        );
        inv_assert_eq!(
            offsets[offsets.len() - 1].index(),
            self.nb_arcs(),
            "last offset must close the arc range"
        );
        inv_assert!(
            self.arc_target.values().all(|t| t.index() < self.nb_vertices()),
            "arc target out of range"
        );
    }
}

impl Digraph for StaticForwardDigraph {
    type VertexIter<'a>
        = IdRange<VertexId>
    where
        Self: 'a;
    type ArcIter<'a>
        = IdRange<ArcId>
    where
        Self: 'a;

    #[inline]
    fn nb_vertices(&self) -> usize {
        self.out_begin.len().saturating_sub(1)
    }
    #[inline]
    fn nb_arcs(&self) -> usize {
        self.arc_target.len()
    }
    fn vertices(&self) -> IdRange<VertexId> {
        IdRange::new(0, self.nb_vertices())
    }
    fn arcs(&self) -> IdRange<ArcId> {
        IdRange::new(0, self.nb_arcs())
    }
    #[inline]
    fn is_valid_vertex(&self, v: VertexId) -> bool {
        v.index() < self.nb_vertices()
    }
    #[inline]
    fn is_valid_arc(&self, a: ArcId) -> bool {
        a.index() < self.nb_arcs()
    }
    #[inline]
    fn target(&self, a: ArcId) -> VertexId {
        debug_assert!(self.is_valid_arc(a));
        self.arc_target[a]
    }
}

impl ForwardIncidence for StaticForwardDigraph {
    type OutArcIter<'a>
        = IdRange<ArcId>
    where
        Self: 'a;

    fn out_arcs(&self, v: VertexId) -> IdRange<ArcId> {
        let (lo, hi) = self.out_range(v);
        IdRange::new(lo, hi)
    }
}

impl MapFactory for StaticForwardDigraph {
    fn create_vertex_map<T: Clone>(&self, init: T) -> DenseMap<VertexId, T> {
        DenseMap::new(self.nb_vertices(), init)
    }
    fn create_arc_map<T: Clone>(&self, init: T) -> DenseMap<ArcId, T> {
        DenseMap::new(self.nb_arcs(), init)
    }
    fn create_vertex_bitmap(&self) -> BitMap<VertexId> {
        BitMap::new(self.nb_vertices())
    }
    fn create_arc_bitmap(&self) -> BitMap<ArcId> {
        BitMap::new(self.nb_arcs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VertexId {
        VertexId::new(i)
    }

    fn diamond() -> StaticForwardDigraph {
        // 0→1, 0→2, 1→3, 2→3, with vertex 4 isolated.
        StaticForwardDigraph::try_new(
            5,
            &[v(0), v(0), v(1), v(2)],
            vec![v(1), v(2), v(3), v(3)],
        )
        .unwrap()
    }

    #[test]
    fn csr_layout() {
        let g = diamond();
        g.debug_assert_invariants();
        assert_eq!(g.nb_vertices(), 5);
        assert_eq!(g.nb_arcs(), 4);
        let n0: Vec<_> = g.out_neighbors(v(0)).collect();
        assert_eq!(n0, vec![v(1), v(2)]);
        assert_eq!(g.out_degree(v(3)), 0);
        assert_eq!(g.out_degree(v(4)), 0);
    }

    #[test]
    fn source_by_binary_search() {
        let g = diamond();
        let sources: Vec<_> = g.arcs().map(|a| g.source(a)).collect();
        assert_eq!(sources, vec![v(0), v(0), v(1), v(2)]);
    }

    #[test]
    fn rejects_unsorted_sources() {
        let err = StaticForwardDigraph::try_new(3, &[v(1), v(0)], vec![v(2), v(2)]).unwrap_err();
        assert_eq!(err, DigraphError::UnsortedSources { position: 1 });
    }

    #[test]
    fn rejects_out_of_range_targets() {
        let err = StaticForwardDigraph::try_new(2, &[v(0)], vec![v(5)]).unwrap_err();
        assert_eq!(
            err,
            DigraphError::VertexOutOfRange {
                vertex: 5,
                nb_vertices: 2
            }
        );
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = StaticForwardDigraph::try_new(2, &[v(0)], vec![]).unwrap_err();
        assert_eq!(
            err,
            DigraphError::ArityMismatch {
                sources: 1,
                targets: 0
            }
        );
    }
}
