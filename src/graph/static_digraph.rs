//! Immutable bidirectional digraph: CSR out-adjacency plus a mirrored
//! reverse CSR and an explicit source array.
//!
//! Compared with [`StaticForwardDigraph`](crate::graph::StaticForwardDigraph)
//! this container also answers `source(a)` and `in_degree(v)` in O(1) and
//! enumerates `in_arcs(v)`, at the price of two extra arrays built by a
//! counting pass over the targets.

use crate::error::DigraphError;
use crate::map::{BitMap, DenseKey, DenseMap};

use super::ids::{ArcId, IdRange, VertexId};
use super::static_forward::{check_arc_input, out_offsets};
use super::traits::{ArcSource, BackwardIncidence, Digraph, ForwardIncidence, InDegree, MapFactory};

/// Immutable CSR digraph with forward and backward incidence.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StaticDigraph {
    /// `n + 1` offsets into `arc_target`; `out_begin[n] == nb_arcs`.
    out_begin: DenseMap<VertexId, ArcId>,
    arc_target: DenseMap<ArcId, VertexId>,
    arc_source: DenseMap<ArcId, VertexId>,
    /// `n + 1` offsets into `in_arc_ids`.
    in_begin: DenseMap<VertexId, ArcId>,
    /// Arc identifiers grouped by target; the reverse adjacency.
    in_arc_ids: DenseMap<ArcId, ArcId>,
}

impl StaticDigraph {
    /// Build from parallel `sources`/`targets` sequences; `sources` must be
    /// non-decreasing and arc `i` is `sources[i] → targets[i]`.
    ///
    /// # Errors
    /// Same contract as
    /// [`StaticForwardDigraph::try_new`](crate::graph::StaticForwardDigraph::try_new).
    pub fn try_new(
        nb_vertices: usize,
        sources: Vec<VertexId>,
        targets: Vec<VertexId>,
    ) -> Result<Self, DigraphError> {
        check_arc_input(nb_vertices, &sources, &targets)?;

        let out_begin = out_offsets(nb_vertices, &sources);

        let mut in_counts = vec![0u32; nb_vertices + 1];
        for t in &targets {
            in_counts[t.index() + 1] += 1;
        }
        for i in 1..in_counts.len() {
            in_counts[i] += in_counts[i - 1];
        }
        let mut cursor: Vec<u32> = in_counts[..nb_vertices].to_vec();
        let mut in_arc_ids = vec![ArcId::new(0); targets.len()];
        for (i, t) in targets.iter().enumerate() {
            in_arc_ids[cursor[t.index()] as usize] = ArcId::from_index(i);
            cursor[t.index()] += 1;
        }

        Ok(Self {
            out_begin,
            arc_target: DenseMap::from_vec(targets),
            arc_source: DenseMap::from_vec(sources),
            in_begin: DenseMap::from_vec(in_counts.into_iter().map(ArcId::new).collect()),
            in_arc_ids: DenseMap::from_vec(in_arc_ids),
        })
    }

    /// Heads of the arcs leaving `v`, in arc order.
    pub fn out_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let (lo, hi) = self.out_range(v);
        self.arc_target.as_slice()[lo..hi].iter().copied()
    }

    /// Tails of the arcs entering `v`.
    pub fn in_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_arcs(v).map(|a| self.arc_source[a])
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

    #[inline]
    fn in_range(&self, v: VertexId) -> (usize, usize) {
        debug_assert!(self.is_valid_vertex(v));
        let lo = self.in_begin[v].index();
        let hi = self.in_begin[VertexId::from_index(v.index() + 1)].index();
        (lo, hi)
    }

    /// Check both CSR structures and their agreement on every arc. A no-op
    /// unless debug assertions or the `strict-invariants` feature are
    /// enabled.
    pub fn debug_assert_invariants(&self) {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        self.assert_invariants_impl();
    }

    #[cfg(any(debug_assertions, feature = "strict-invariants"))]
    fn assert_invariants_impl(&self) {
        use crate::_debug_invariants::{inv_assert, inv_assert_eq};
        for offsets in [self.out_begin.as_slice(), self.in_begin.as_slice()] {
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
        }
        for v in self.vertices() {
            let (lo, hi) = self.in_range(v);
            for &a in &self.in_arc_ids.as_slice()[lo..hi] {
                inv_assert_eq!(self.arc_target[a], v, "reverse adjacency points elsewhere");
            }
        }
        for a in self.arcs() {
            let (lo, hi) = self.out_range(self.arc_source[a]);
            inv_assert!(
                lo <= a.index() && a.index() < hi,
                "source array disagrees with the out-CSR row of arc {a:?}"
            );
        }
    }
}

impl Digraph for StaticDigraph {
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

impl ForwardIncidence for StaticDigraph {
    type OutArcIter<'a>
        = IdRange<ArcId>
    where
        Self: 'a;

    fn out_arcs(&self, v: VertexId) -> IdRange<ArcId> {
        let (lo, hi) = self.out_range(v);
        IdRange::new(lo, hi)
    }
}

impl BackwardIncidence for StaticDigraph {
    type InArcIter<'a>
        = std::iter::Copied<std::slice::Iter<'a, ArcId>>
    where
        Self: 'a;

    fn in_arcs(&self, v: VertexId) -> Self::InArcIter<'_> {
        let (lo, hi) = self.in_range(v);
        self.in_arc_ids.as_slice()[lo..hi].iter().copied()
    }
}

impl ArcSource for StaticDigraph {
    #[inline]
    fn source(&self, a: ArcId) -> VertexId {
        debug_assert!(self.is_valid_arc(a));
        self.arc_source[a]
    }
}

impl InDegree for StaticDigraph {
    #[inline]
    fn in_degree(&self, v: VertexId) -> usize {
        let (lo, hi) = self.in_range(v);
        hi - lo
    }
}

impl MapFactory for StaticDigraph {
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

    fn diamond() -> StaticDigraph {
        // 0→1, 0→2, 1→3, 2→3, with vertex 4 isolated.
        StaticDigraph::try_new(
            5,
            vec![v(0), v(0), v(1), v(2)],
            vec![v(1), v(2), v(3), v(3)],
        )
        .unwrap()
    }

    #[test]
    fn mirrors_agree() {
        let g = diamond();
        g.debug_assert_invariants();
        let ins: Vec<_> = g.in_neighbors(v(3)).collect();
        assert_eq!(ins, vec![v(1), v(2)]);
        assert_eq!(g.in_degree(v(0)), 0);
        assert_eq!(g.in_degree(v(3)), 2);
        assert_eq!(g.in_degree(v(4)), 0);
    }

    #[test]
    fn source_is_constant_time_lookup() {
        let g = diamond();
        let sources: Vec<_> = g.arcs().map(|a| g.source(a)).collect();
        assert_eq!(sources, vec![v(0), v(0), v(1), v(2)]);
    }

    #[test]
    fn in_arcs_are_grouped_by_target() {
        let g = diamond();
        let arcs: Vec<_> = g.in_arcs(v(3)).collect();
        assert_eq!(arcs, vec![ArcId::new(2), ArcId::new(3)]);
        assert!(g.in_arcs(v(4)).next().is_none());
    }
}
