//! Red-black tree based ordered containers.
//!
//! Two layers: [`OrderedTree`] keeps binary search order and provides the
//! structural primitives (leaf insertion, exact search, in-order
//! predecessor, rotations), and [`RedBlackTree`] adds the color discipline
//! on top, rebalancing after every insertion and removal so that search,
//! insert and remove stay O(log n). [`RedBlackMap`] is a thin associative
//! wrapper over the balanced tree.
//!
//! Nodes live in an arena indexed by opaque [`NodeIndex`] handles; slot 0
//! is a shared element-less sentinel standing in for every absent child.
//! Single-threaded by design: callers needing shared access serialize
//! externally.

extern crate alloc;

mod iter;
mod map;
mod node;
mod ordered;
mod redblack;

pub use iter::InOrderIter;
pub use map::RedBlackMap;
pub use node::NodeIndex;
pub use ordered::OrderedTree;
pub use redblack::RedBlackTree;
