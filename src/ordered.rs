use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

use crate::iter::InOrderIter;
use crate::node::{Node, NodeIndex};

/// A binary search tree over an arena of nodes.
///
/// Slot 0 of the arena is the sentinel: it represents every absent child and
/// is never part of the element count. Freed slots are recycled before the
/// arena grows; they form a singly linked list threaded through the `parent`
/// field, with the head kept on the tree.
///
/// Any element in the tree is greater than or equal to everything in its
/// left subtree and less than or equal to everything in its right subtree.
/// Equal elements descend left, so among duplicates the most recently
/// inserted one comes first in traversal order.
///
/// This layer knows nothing about balancing: `insert` links a leaf and
/// nothing else. The rotation primitives it exposes preserve traversal
/// order, which is what lets a balancing layer repair shape on top without
/// ever breaking the search property.
#[derive(Debug)]
pub struct OrderedTree<T: Ord> {
    pub(crate) storage: Vec<Node<T>>,
    pub(crate) root: NodeIndex,
    length: usize,
    free_head: NodeIndex,
}

impl<T: Ord> OrderedTree<T> {
    pub fn new() -> Self {
        Self {
            storage: alloc::vec![Node::sentinel()],
            root: NodeIndex::NIL,
            length: 0,
            free_head: NodeIndex::NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Pre-sizes the arena for at least `additional` more insertions.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    /// Drops every element, keeping the sentinel slot.
    pub fn clear(&mut self) {
        self.storage.truncate(1);
        self.storage[0] = Node::sentinel();
        self.root = NodeIndex::NIL;
        self.length = 0;
        self.free_head = NodeIndex::NIL;
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &Node<T> {
        &self.storage[idx.0]
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut Node<T> {
        &mut self.storage[idx.0]
    }

    /// Value held by `idx`, or `None` for the sentinel, freed slots and
    /// out-of-range handles.
    pub fn get(&self, idx: NodeIndex) -> Option<&T> {
        self.storage.get(idx.0)?.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut T> {
        self.storage.get_mut(idx.0)?.value.as_mut()
    }

    fn key(&self, idx: NodeIndex) -> &T {
        debug_assert!(!idx.is_nil());
        match self.storage[idx.0].value.as_ref() {
            Some(key) => key,
            // the sentinel and freed slots are never on a search path
            None => unreachable!(),
        }
    }

    /// Inserts `value` as a leaf and returns its handle, so a balancing
    /// layer can start repair at the insertion point. No rebalancing here.
    pub fn insert(&mut self, value: T) -> NodeIndex {
        let mut current = self.root;
        let mut parent = NodeIndex::NIL;

        while !current.is_nil() {
            parent = current;
            current = match value.cmp(self.key(current)) {
                Ordering::Greater => self.node(current).right,
                // equal values descend left
                _ => self.node(current).left,
            };
        }

        let idx = self.allocate(value, parent);

        if parent.is_nil() {
            self.root = idx;
        } else if *self.key(idx) > *self.key(parent) {
            self.node_mut(parent).right = idx;
        } else {
            self.node_mut(parent).left = idx;
        }

        self.length += 1;
        idx
    }

    /// Handle of the first node compared equal to `value`, or `None`.
    pub fn find(&self, value: &T) -> Option<NodeIndex> {
        let mut current = self.root;

        while !current.is_nil() {
            match value.cmp(self.key(current)) {
                Ordering::Less => current = self.node(current).left,
                Ordering::Equal => return Some(current),
                Ordering::Greater => current = self.node(current).right,
            }
        }

        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// In-order predecessor of `idx`, looked up only inside its left
    /// subtree: the maximum of that subtree, or `None` when there is no
    /// left child. The walk-up-through-parents case is deliberately not
    /// implemented; deletion never needs it, because a node without a left
    /// child has its right child promoted directly.
    pub fn predecessor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        let mut current = self.node(idx).left;
        if current.is_nil() {
            return None;
        }

        while !self.node(current).right.is_nil() {
            current = self.node(current).right;
        }

        Some(current)
    }

    /// Smallest element, or `None` on an empty tree.
    pub fn first(&self) -> Option<&T> {
        let mut current = self.root;
        if current.is_nil() {
            return None;
        }

        while !self.node(current).left.is_nil() {
            current = self.node(current).left;
        }

        self.get(current)
    }

    /// Largest element, or `None` on an empty tree.
    pub fn last(&self) -> Option<&T> {
        let mut current = self.root;
        if current.is_nil() {
            return None;
        }

        while !self.node(current).right.is_nil() {
            current = self.node(current).right;
        }

        self.get(current)
    }

    /// Rotates `pivot` down to the left: its right child takes its place,
    /// `pivot` becomes that child's left child, and the promoted child's
    /// former left subtree is relinked as `pivot`'s right subtree.
    ///
    /// The pivot must have a right child. Traversal order is unchanged.
    pub fn rotate_left(&mut self, pivot: NodeIndex) {
        let parent = self.node(pivot).parent;
        let promoted = self.node(pivot).right;
        debug_assert!(!promoted.is_nil());

        let moved = self.node(promoted).left;
        self.node_mut(pivot).right = moved;
        if !moved.is_nil() {
            self.node_mut(moved).parent = pivot;
        }

        self.node_mut(promoted).left = pivot;
        self.node_mut(pivot).parent = promoted;
        self.node_mut(promoted).parent = parent;

        if parent.is_nil() {
            self.root = promoted;
        } else if self.node(parent).right == pivot {
            self.node_mut(parent).right = promoted;
        } else {
            self.node_mut(parent).left = promoted;
        }
    }

    /// Mirror image of [`rotate_left`](Self::rotate_left). The pivot must
    /// have a left child.
    pub fn rotate_right(&mut self, pivot: NodeIndex) {
        let parent = self.node(pivot).parent;
        let promoted = self.node(pivot).left;
        debug_assert!(!promoted.is_nil());

        let moved = self.node(promoted).right;
        self.node_mut(pivot).left = moved;
        if !moved.is_nil() {
            self.node_mut(moved).parent = pivot;
        }

        self.node_mut(promoted).right = pivot;
        self.node_mut(pivot).parent = promoted;
        self.node_mut(promoted).parent = parent;

        if parent.is_nil() {
            self.root = promoted;
        } else if self.node(parent).right == pivot {
            self.node_mut(parent).right = promoted;
        } else {
            self.node_mut(parent).left = promoted;
        }
    }

    /// Exchanges the values of two nodes, not their positions. The caller
    /// is responsible for restoring search order afterwards.
    pub(crate) fn swap_values(&mut self, a: NodeIndex, b: NodeIndex) {
        if a == b {
            return;
        }
        let taken = self.node_mut(a).value.take();
        let other = mem::replace(&mut self.node_mut(b).value, taken);
        self.node_mut(a).value = other;
    }

    /// Puts `replacement` where `node` currently sits: relinks the parent's
    /// child slot (or the root) and the replacement's parent pointer. The
    /// replacement may be the sentinel, in which case its parent pointer
    /// records where the hole is while delete-fixup runs.
    pub(crate) fn splice(&mut self, node: NodeIndex, replacement: NodeIndex) {
        let parent = self.node(node).parent;
        self.node_mut(replacement).parent = parent;

        if parent.is_nil() {
            self.root = replacement;
        } else if self.node(parent).left == node {
            self.node_mut(parent).left = replacement;
        } else {
            self.node_mut(parent).right = replacement;
        }
    }

    /// Destroys an already unlinked node, pushing its slot onto the free
    /// list. Decrements the element count: one call per logical removal.
    pub(crate) fn release(&mut self, idx: NodeIndex) {
        debug_assert!(!idx.is_nil());
        let free_head = self.free_head;
        let node = self.node_mut(idx);
        node.value = None;
        node.left = NodeIndex::NIL;
        node.right = NodeIndex::NIL;
        node.parent = free_head;
        self.free_head = idx;
        self.length -= 1;
    }

    fn allocate(&mut self, value: T, parent: NodeIndex) -> NodeIndex {
        if self.free_head.is_nil() {
            let idx = NodeIndex(self.storage.len());
            self.storage.push(Node::new_leaf(value, parent));
            idx
        } else {
            let idx = self.free_head;
            self.free_head = self.node(idx).parent;
            self.storage[idx.0] = Node::new_leaf(value, parent);
            idx
        }
    }

    /// Lazy ascending traversal. Restartable: each call walks the tree
    /// from scratch.
    pub fn iter(&self) -> InOrderIter<'_, T> {
        InOrderIter {
            tree: self,
            curr: self.root,
            stack: Vec::new(),
        }
    }
}

impl<T: Ord> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T: Ord> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::OrderedTree;
    use crate::node::NodeIndex;

    fn preorder(tree: &OrderedTree<usize>) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![tree.root];
        while let Some(idx) = stack.pop() {
            if idx.is_nil() {
                continue;
            }
            out.push(*tree.get(idx).unwrap());
            stack.push(tree.node(idx).right);
            stack.push(tree.node(idx).left);
        }
        out
    }

    #[test]
    fn insert_returns_usable_handles() {
        let mut tree = OrderedTree::new();
        let five = tree.insert(5);
        let seven = tree.insert(7);
        let three = tree.insert(3);

        assert_eq!(tree.get(five), Some(&5));
        assert_eq!(tree.get(seven), Some(&7));
        assert_eq!(tree.get(three), Some(&3));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn equal_values_descend_left() {
        let mut tree = OrderedTree::new();
        let first = tree.insert(5);
        let second = tree.insert(5);

        assert_eq!(tree.node(first).left, second);
        assert_eq!(tree.node(second).parent, first);
    }

    #[test]
    fn find_reports_absence_as_none() {
        let mut tree = OrderedTree::new();
        tree.insert(1);
        tree.insert(9);

        assert!(tree.find(&1).is_some());
        assert!(tree.find(&4).is_none());
        assert!(!tree.contains(&4));
    }

    #[test]
    fn predecessor_is_the_maximum_of_the_left_subtree() {
        let mut tree = OrderedTree::new();
        let five = tree.insert(5);
        tree.insert(3);
        tree.insert(8);
        tree.insert(1);
        let four = tree.insert(4);

        assert_eq!(tree.predecessor(five), Some(four));
    }

    #[test]
    fn predecessor_without_left_child_is_none() {
        let mut tree = OrderedTree::new();
        let five = tree.insert(5);
        let eight = tree.insert(8);

        // neither a leaf nor a node with only a right child has one
        assert_eq!(tree.predecessor(eight), None);
        assert_eq!(tree.predecessor(five), None);
    }

    #[test]
    fn rotations_are_inverse_and_order_preserving() {
        let mut tree: OrderedTree<usize> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
        let shape_before = preorder(&tree);
        let inorder_before: Vec<usize> = tree.iter().copied().collect();

        let root = tree.root;
        tree.rotate_left(root);
        let inorder_rotated: Vec<usize> = tree.iter().copied().collect();
        assert_eq!(inorder_before, inorder_rotated);
        assert_ne!(shape_before, preorder(&tree));

        let new_root = tree.root;
        tree.rotate_right(new_root);
        assert_eq!(shape_before, preorder(&tree));
        assert_eq!(tree.node(root).parent, NodeIndex::NIL);
    }

    #[test]
    fn swap_exchanges_values_not_positions() {
        let mut tree = OrderedTree::new();
        let a = tree.insert(10);
        let b = tree.insert(20);

        tree.swap_values(a, b);
        assert_eq!(tree.get(a), Some(&20));
        assert_eq!(tree.get(b), Some(&10));
    }

    #[test]
    fn released_slots_are_recycled() {
        let mut tree = OrderedTree::new();
        tree.insert(1);
        let two = tree.insert(2);
        let slots = tree.storage.len();

        tree.splice(two, NodeIndex::NIL);
        tree.release(two);
        assert_eq!(tree.len(), 1);

        let reinserted = tree.insert(3);
        assert_eq!(reinserted, two);
        assert_eq!(tree.storage.len(), slots);
    }

    #[test]
    fn first_and_last_track_the_extremes() {
        let mut tree: OrderedTree<usize> = [4, 9, 1, 6].into_iter().collect();
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));

        tree.clear();
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert!(tree.is_empty());
    }
}
