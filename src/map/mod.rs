//! Dense keyed storage: the total-map and bit-map primitives every engine
//! builds its state from.

pub mod bit_map;
pub mod dense_map;

pub use bit_map::BitMap;
pub use dense_map::{DenseKey, DenseMap};
