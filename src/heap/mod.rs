//! Priority-queue support for the traversal engines.

pub mod d_ary_heap;

pub use d_ary_heap::{Compare, DAryHeap, HeapSlot, NaturalOrder};
