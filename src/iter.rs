use alloc::vec::Vec;

use crate::node::NodeIndex;
use crate::ordered::OrderedTree;

/// Lazy in-order traversal of a tree, yielding references in ascending
/// order. The pending left spines are kept on an explicit stack instead of
/// the call stack.
///
/// The iterator borrows the tree, so the tree cannot be mutated while a
/// traversal is live; every traversal therefore observes a consistent
/// snapshot.
pub struct InOrderIter<'a, T: Ord> {
    pub(crate) tree: &'a OrderedTree<T>,
    pub(crate) curr: NodeIndex,
    pub(crate) stack: Vec<NodeIndex>,
}

impl<'a, T: Ord> Iterator for InOrderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.curr.is_nil() {
            self.stack.push(self.curr);
            self.curr = self.tree.node(self.curr).left;
        }

        let node = self.stack.pop()?;
        self.curr = self.tree.node(node).right;

        self.tree.get(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}
