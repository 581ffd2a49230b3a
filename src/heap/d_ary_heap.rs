//! Addressable d-ary heap with decrease-key.
//!
//! The heap keeps a position map from keys to heap slots so that
//! [`promote`](DAryHeap::promote) can restore order from an entry's current
//! slot in O(log_d n). Popping a key marks it [`HeapSlot::Settled`] in the
//! position map rather than forgetting it, so an engine that shares the map
//! can read a key's traversal status without a second lookup structure.
//!
//! # Invariants
//! - For every slot `i` with parent `p`, `!less(entry[i], entry[p])`.
//! - For every in-heap entry `(k, _)` at slot `i`, `positions[k] == In(i)`.
//!
//! Both are checked by [`debug_assert_invariants`](DAryHeap::debug_assert_invariants)
//! in debug builds and under the `strict-invariants` feature.

use std::marker::PhantomData;

use crate::map::{DenseKey, DenseMap};

/// Strict weak order over priorities, resolved at compile time.
pub trait Compare<P> {
    /// Whether `a` strictly precedes `b` (closer to the top of the heap).
    fn less(a: &P, b: &P) -> bool;
}

/// Natural `<` ordering; the default comparator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<P: PartialOrd> Compare<P> for NaturalOrder {
    #[inline]
    fn less(a: &P, b: &P) -> bool {
        a < b
    }
}

/// Where a key currently lives with respect to the heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HeapSlot {
    /// Never pushed (or cleared by a reset).
    #[default]
    Unseen,
    /// In the heap, at the given slot of the entry array.
    In(usize),
    /// Pushed and popped; its priority was final when it left.
    Settled,
}

/// Min-priority queue with branching factor `D` and an addressable
/// position map.
#[derive(Clone, Debug)]
pub struct DAryHeap<const D: usize, K, P, C = NaturalOrder> {
    entries: Vec<(K, P)>,
    positions: DenseMap<K, HeapSlot>,
    _cmp: PhantomData<C>,
}

impl<const D: usize, K: DenseKey, P, C: Compare<P>> DAryHeap<D, K, P, C> {
    /// Empty heap over a key domain of `nb_keys`.
    pub fn new(nb_keys: usize) -> Self {
        Self::with_positions(DenseMap::new(nb_keys, HeapSlot::Unseen))
    }

    /// Empty heap adopting an externally created position map.
    ///
    /// Every entry of `positions` must be [`HeapSlot::Unseen`].
    pub fn with_positions(positions: DenseMap<K, HeapSlot>) -> Self {
        debug_assert!(positions.values().all(|s| matches!(s, HeapSlot::Unseen)));
        Self {
            entries: Vec::new(),
            positions,
            _cmp: PhantomData,
        }
    }

    /// Number of in-heap entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap holds no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current slot of `k`: unseen, in-heap, or settled.
    #[inline]
    pub fn slot(&self, k: K) -> HeapSlot {
        self.positions.get(k).copied().unwrap_or(HeapSlot::Unseen)
    }

    /// The position map, for engines that share it as their status map.
    #[inline]
    pub fn positions(&self) -> &DenseMap<K, HeapSlot> {
        &self.positions
    }

    /// Minimum entry under the comparator. Requires a non-empty heap.
    #[inline]
    pub fn top(&self) -> (K, &P) {
        debug_assert!(!self.is_empty(), "top() on an empty heap");
        let (k, p) = &self.entries[0];
        (*k, p)
    }

    /// Priority of an in-heap key. Calling this for a key that is not in
    /// the heap is a contract violation.
    pub fn priority(&self, k: K) -> &P {
        match self.slot(k) {
            HeapSlot::In(i) => &self.entries[i].1,
            s => panic!("priority() on a key with slot {s:?}"),
        }
    }

    /// Insert `(k, p)`. Requires `k` not currently in the heap (a settled
    /// key may be re-inserted); the position map grows on demand for keys
    /// beyond its current domain.
    pub fn push(&mut self, k: K, p: P) {
        if k.index() >= self.positions.len() {
            self.positions.resize(k.index() + 1, HeapSlot::Unseen);
        }
        debug_assert!(
            !matches!(self.positions[k], HeapSlot::In(_)),
            "push() on a key that is already in the heap"
        );
        let slot = self.entries.len();
        self.entries.push((k, p));
        self.positions[k] = HeapSlot::In(slot);
        self.sift_up(slot);
    }

    /// Remove and return the minimum entry, marking its key settled.
    pub fn pop(&mut self) -> (K, P) {
        debug_assert!(!self.is_empty(), "pop() on an empty heap");
        let entry = self.entries.swap_remove(0);
        self.positions[entry.0] = HeapSlot::Settled;
        if !self.entries.is_empty() {
            self.positions[self.entries[0].0] = HeapSlot::In(0);
            self.sift_down(0);
        }
        entry
    }

    /// Decrease-key: give the in-heap key `k` the strictly better
    /// priority `p` and sift it towards the top.
    pub fn promote(&mut self, k: K, p: P) {
        let HeapSlot::In(i) = self.slot(k) else {
            panic!("promote() on a key that is not in the heap");
        };
        debug_assert!(
            C::less(&p, &self.entries[i].1),
            "promote() requires a strictly better priority"
        );
        self.entries[i].1 = p;
        self.sift_up(i);
    }

    /// Drop every entry without touching the position map. The owner of
    /// the map is responsible for clearing it; see [`reset`](Self::reset).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry and mark the whole key domain unseen, reusing
    /// both allocations.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.positions.fill(HeapSlot::Unseen);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / D;
            if C::less(&self.entries[i].1, &self.entries[parent].1) {
                self.swap_slots(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let first = i * D + 1;
            if first >= self.entries.len() {
                break;
            }
            let end = (first + D).min(self.entries.len());
            let mut best = first;
            for c in first + 1..end {
                if C::less(&self.entries[c].1, &self.entries[best].1) {
                    best = c;
                }
            }
            if C::less(&self.entries[best].1, &self.entries[i].1) {
                self.swap_slots(i, best);
                i = best;
            } else {
                break;
            }
        }
    }

    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions[self.entries[a].0] = HeapSlot::In(a);
        self.positions[self.entries[b].0] = HeapSlot::In(b);
    }

    /// Check heap order and position consistency. A no-op unless debug
    /// assertions or the `strict-invariants` feature are enabled.
    pub fn debug_assert_invariants(&self) {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        self.assert_invariants_impl();
    }

    #[cfg(any(debug_assertions, feature = "strict-invariants"))]
    fn assert_invariants_impl(&self) {
        use crate::_debug_invariants::{inv_assert, inv_assert_eq};
        for (i, (k, p)) in self.entries.iter().enumerate() {
            inv_assert_eq!(
                self.positions[*k],
                HeapSlot::In(i),
                "position map out of sync at slot {i}"
            );
            if i > 0 {
                let parent = (i - 1) / D;
                inv_assert!(
                    !C::less(p, &self.entries[parent].1),
                    "heap order violated between slot {i} and its parent"
                );
            }
        }
        let in_heap = self
            .positions
            .values()
            .filter(|s| matches!(s, HeapSlot::In(_)))
            .count();
        inv_assert_eq!(in_heap, self.entries.len(), "stray in-heap positions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> DAryHeap<2, usize, i32> {
        let mut heap = DAryHeap::new(6);
        for (i, &p) in [0, 7, 3, 5, 6, 11].iter().enumerate() {
            heap.push(i, p);
        }
        heap
    }

    #[test]
    fn push_then_pop_in_priority_order() {
        let mut heap = filled();
        heap.debug_assert_invariants();
        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.pop());
        }
        assert_eq!(drained, vec![(0, 0), (2, 3), (3, 5), (4, 6), (1, 7), (5, 11)]);
    }

    #[test]
    fn slot_transitions() {
        let mut heap = filled();
        assert!(matches!(heap.slot(3), HeapSlot::In(_)));
        let (k, _) = heap.pop();
        assert_eq!(heap.slot(k), HeapSlot::Settled);
        let mut beyond: DAryHeap<2, usize, i32> = DAryHeap::new(1);
        beyond.push(9, 4);
        assert!(matches!(beyond.slot(9), HeapSlot::In(0)));
    }

    #[test]
    fn promote_reorders() {
        let mut heap = filled();
        heap.promote(3, 2);
        heap.debug_assert_invariants();
        assert_eq!(heap.pop(), (0, 0));
        assert_eq!(heap.pop(), (3, 2));
        heap.promote(5, 1);
        assert_eq!(heap.pop(), (5, 1));
        assert_eq!(heap.pop(), (2, 3));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn promote_to_worse_priority_asserts() {
        let mut heap = filled();
        heap.promote(3, 8);
    }

    #[test]
    fn clear_keeps_positions_reset_wipes_them() {
        let mut heap = filled();
        heap.clear();
        assert!(heap.is_empty());
        assert!(matches!(heap.slot(2), HeapSlot::In(_)));
        heap.reset();
        assert_eq!(heap.slot(2), HeapSlot::Unseen);
        heap.push(2, -1);
        assert_eq!(heap.top(), (2, &-1));
    }
}
