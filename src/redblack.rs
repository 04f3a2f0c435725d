use crate::iter::InOrderIter;
use crate::node::{NodeColor, NodeIndex};
use crate::ordered::OrderedTree;

/// A self-balancing ordered multiset with the red-black discipline.
///
/// On top of the [`OrderedTree`] search structure, every node carries a
/// color, and after each mutation a fixup pass restores these properties:
///
/// 1. every node is red or black, and absent children count as black;
/// 2. the root is black;
/// 3. a red node has two black children;
/// 4. every path from a node down to an absent child crosses the same
///    number of black nodes.
///
/// Together with search order these bound the height to O(log n), so
/// insertion, search and removal all run in logarithmic time. Only the
/// fixup code in this module ever touches colors or links; callers get
/// opaque [`NodeIndex`] handles back and read values through them.
#[derive(Debug)]
pub struct RedBlackTree<T: Ord> {
    tree: OrderedTree<T>,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// Handle of the first node compared equal to `value`, or `None`.
    pub fn find(&self, value: &T) -> Option<NodeIndex> {
        self.tree.find(value)
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&T> {
        self.tree.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut T> {
        self.tree.get_mut(idx)
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    pub fn iter(&self) -> InOrderIter<'_, T> {
        self.tree.iter()
    }

    /// Inserts `value`, rebalances, and returns the new node's handle.
    /// Duplicates are allowed; among equal values the newest comes first
    /// in traversal order.
    pub fn insert(&mut self, value: T) -> NodeIndex {
        let idx = self.tree.insert(value);
        self.tree.node_mut(idx).color = NodeColor::Red;
        self.fix_insert(idx);
        idx
    }

    /// Removes the first node compared equal to `value`, rebalances, and
    /// reports whether anything was removed. Absent values are a no-op.
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(target) = self.tree.find(value) else {
            return false;
        };
        self.remove_at(target);
        true
    }

    fn color(&self, idx: NodeIndex) -> NodeColor {
        // the sentinel is black, so absent children read as black
        self.tree.node(idx).color
    }

    fn sibling_of(&self, node: NodeIndex, parent: NodeIndex) -> NodeIndex {
        if self.tree.node(parent).left == node {
            self.tree.node(parent).right
        } else {
            self.tree.node(parent).left
        }
    }

    /// Repairs a red-red violation starting at a freshly inserted red node.
    ///
    /// A black parent means nothing is broken. With a red parent, a red
    /// uncle is repainted away and the problem moves to the grandparent;
    /// a black uncle takes one or two rotations around the grandparent and
    /// terminates. Reaching the root repaints it black.
    fn fix_insert(&mut self, inserted: NodeIndex) {
        let mut current = inserted;

        loop {
            let parent = self.tree.node(current).parent;
            if parent.is_nil() {
                self.tree.node_mut(current).color = NodeColor::Black;
                return;
            }
            if self.color(parent) == NodeColor::Black {
                return;
            }

            // red parent: it is not the root, so the grandparent exists
            let grandparent = self.tree.node(parent).parent;
            let parent_is_right = self.tree.node(grandparent).right == parent;
            let uncle = self.sibling_of(parent, grandparent);

            if self.color(uncle) == NodeColor::Red {
                self.tree.node_mut(parent).color = NodeColor::Black;
                self.tree.node_mut(uncle).color = NodeColor::Black;
                self.tree.node_mut(grandparent).color = NodeColor::Red;
                current = grandparent;
                continue;
            }

            // zig-zag: rotate the parent first to straighten the shape
            let current_is_right = self.tree.node(parent).right == current;
            if current_is_right != parent_is_right {
                if parent_is_right {
                    self.tree.rotate_right(parent);
                } else {
                    self.tree.rotate_left(parent);
                }
                current = parent;
                continue;
            }

            // outer child with a black uncle: one rotation settles it
            self.tree.node_mut(parent).color = NodeColor::Black;
            self.tree.node_mut(grandparent).color = NodeColor::Red;
            if parent_is_right {
                self.tree.rotate_left(grandparent);
            } else {
                self.tree.rotate_right(grandparent);
            }
            return;
        }
    }

    fn remove_at(&mut self, mut node: NodeIndex) {
        // a node with two children trades values with its in-order
        // predecessor, which has no right child; removal then proceeds
        // against a node with at most one child
        if !self.tree.node(node).left.is_nil() && !self.tree.node(node).right.is_nil() {
            if let Some(prev) = self.tree.predecessor(node) {
                self.tree.swap_values(node, prev);
                node = prev;
            }
        }

        let left = self.tree.node(node).left;
        let right = self.tree.node(node).right;
        // the sentinel stands in when there is no child, so the color
        // logic below is uniform
        let child = if left.is_nil() { right } else { left };

        let removed_color = self.color(node);
        self.tree.splice(node, child);
        self.tree.release(node);

        if self.color(child) == NodeColor::Red {
            // a red replacement absorbs the missing black node
            self.tree.node_mut(child).color = NodeColor::Black;
        } else if removed_color == NodeColor::Black {
            if child.is_nil() {
                self.fix_double_black(child);
            }
            // a genuine black replacement of a black node leaves the
            // black-heights already matched
        }

        // detach the sentinel: its parent pointer was scratch space for
        // the fixup and must not keep pointing into the tree
        self.tree.node_mut(NodeIndex::NIL).parent = NodeIndex::NIL;
    }

    /// Resolves a double-black deficiency at `start`, which may be the
    /// sentinel freshly spliced into the removed node's place.
    ///
    /// One loop iteration per tree level, each running the six cases in
    /// order. Cases 1, 4 and 6 terminate, case 3 moves the deficiency to
    /// the parent, and cases 2 and 5 reshape so that a later case applies
    /// within the same iteration.
    fn fix_double_black(&mut self, start: NodeIndex) {
        let mut node = start;

        loop {
            let parent = self.tree.node(node).parent;

            // case 1: the deficiency reached the root and vanishes,
            // every path lost one black node alike
            if parent.is_nil() {
                return;
            }

            let node_is_left = self.tree.node(parent).left == node;
            let mut sibling = self.sibling_of(node, parent);

            // case 2: a red sibling is rotated above the parent; the
            // deficient side now has a black sibling for cases 3-6
            if self.color(sibling) == NodeColor::Red {
                self.tree.node_mut(parent).color = NodeColor::Red;
                self.tree.node_mut(sibling).color = NodeColor::Black;
                if node_is_left {
                    self.tree.rotate_left(parent);
                } else {
                    self.tree.rotate_right(parent);
                }
                sibling = self.sibling_of(node, parent);
            }

            let near = if node_is_left {
                self.tree.node(sibling).left
            } else {
                self.tree.node(sibling).right
            };
            let mut far = if node_is_left {
                self.tree.node(sibling).right
            } else {
                self.tree.node(sibling).left
            };

            if self.color(near) == NodeColor::Black && self.color(far) == NodeColor::Black {
                // case 3: everything around is black; repainting the
                // sibling red equalizes the subtree and pushes the
                // deficiency one level up
                if self.color(parent) == NodeColor::Black {
                    self.tree.node_mut(sibling).color = NodeColor::Red;
                    node = parent;
                    continue;
                }

                // case 4: a red parent trades colors with the sibling,
                // restoring the missing black locally
                self.tree.node_mut(parent).color = NodeColor::Black;
                self.tree.node_mut(sibling).color = NodeColor::Red;
                return;
            }

            // case 5: only the near nephew is red; rotating the sibling
            // away from the deficient side exposes a red far nephew
            if self.color(far) == NodeColor::Black {
                self.tree.node_mut(sibling).color = NodeColor::Red;
                self.tree.node_mut(near).color = NodeColor::Black;
                if node_is_left {
                    self.tree.rotate_right(sibling);
                } else {
                    self.tree.rotate_left(sibling);
                }
                sibling = near;
                far = if node_is_left {
                    self.tree.node(sibling).right
                } else {
                    self.tree.node(sibling).left
                };
            }

            // case 6: red far nephew; the sibling takes the parent's
            // color, parent and far nephew turn black, and one rotation
            // toward the deficient side rebalances for good
            debug_assert_eq!(self.color(far), NodeColor::Red);
            self.tree.node_mut(sibling).color = self.color(parent);
            self.tree.node_mut(parent).color = NodeColor::Black;
            self.tree.node_mut(far).color = NodeColor::Black;
            if node_is_left {
                self.tree.rotate_left(parent);
            } else {
                self.tree.rotate_right(parent);
            }
            return;
        }
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T: Ord> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = InOrderIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
