//! `VertexId` / `ArcId`: strong, zero-cost handles for digraph entities.
//!
//! Every vertex and arc is addressed by an opaque 32-bit identifier. In the
//! static containers identifiers are dense indices in `[0, n)`; in
//! [`MutableDigraph`](crate::graph::MutableDigraph) they are stable handles
//! that may be reused after a removal. The two domains are kept as distinct
//! newtypes so a vertex handle can never index an arc map.

use std::fmt;

use crate::error::DigraphError;
use crate::map::DenseKey;

macro_rules! dense_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw identifier.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw identifier value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl DenseKey for $name {
            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
            #[inline]
            fn from_index(i: usize) -> Self {
                debug_assert!(i <= u32::MAX as usize);
                Self(i as u32)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = DigraphError;
            #[inline]
            fn try_from(raw: usize) -> Result<Self, DigraphError> {
                u32::try_from(raw)
                    .map($name)
                    .map_err(|_| DigraphError::IdOverflow(raw))
            }
        }

        impl From<$name> for u32 {
            #[inline]
            fn from(id: $name) -> u32 {
                id.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

dense_id! {
    /// Handle of a vertex.
    VertexId
}

dense_id! {
    /// Handle of an arc (a directed edge).
    ArcId
}

/// Half-open identifier range `[lo, hi)`, the enumeration form of the
/// static containers.
#[derive(Clone, Debug)]
pub struct IdRange<K> {
    cur: usize,
    end: usize,
    _key: std::marker::PhantomData<K>,
}

impl<K: DenseKey> IdRange<K> {
    pub(crate) fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo <= hi);
        Self {
            cur: lo,
            end: hi,
            _key: std::marker::PhantomData,
        }
    }
}

impl<K: DenseKey> Iterator for IdRange<K> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        if self.cur < self.end {
            let k = K::from_index(self.cur);
            self.cur += 1;
            Some(k)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.cur;
        (n, Some(n))
    }
}

impl<K: DenseKey> ExactSizeIterator for IdRange<K> {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        let v = VertexId::new(42);
        assert_eq!(v.get(), 42);
        assert_eq!(u32::from(v), 42);
    }

    #[test]
    fn try_from_usize() {
        let v = VertexId::try_from(7usize).unwrap();
        assert_eq!(v.get(), 7);
        assert_eq!(
            ArcId::try_from(usize::MAX).unwrap_err(),
            DigraphError::IdOverflow(usize::MAX)
        );
    }

    #[test]
    fn debug_and_display() {
        let a = ArcId::new(9);
        assert_eq!(format!("{a:?}"), "ArcId(9)");
        assert_eq!(format!("{a}"), "9");
    }

    #[test]
    fn ordering_and_hash() {
        use std::collections::HashSet;
        let a = VertexId::new(1);
        let b = VertexId::new(2);
        assert!(a < b);
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(VertexId::new(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn dense_key_roundtrip() {
        let v = VertexId::from_index(5);
        assert_eq!(v.index(), 5);
    }

    #[test]
    fn id_range_is_exact() {
        let r: IdRange<VertexId> = IdRange::new(2, 5);
        assert_eq!(r.len(), 3);
        let ids: Vec<u32> = r.map(VertexId::get).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }
}
