/// Opaque handle to a node inside a tree's arena.
///
/// Handles stay valid until the node they name is removed from the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Slot 0: the element-less sentinel standing in for every absent child.
    pub(crate) const NIL: NodeIndex = NodeIndex(0);

    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

/// A single arena slot. `value` is `None` only for the sentinel and for
/// slots sitting on the free list; every node reachable from the root
/// carries a value.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) color: NodeColor,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
}

impl<T> Node<T> {
    pub(crate) fn new_leaf(value: T, parent: NodeIndex) -> Self {
        Self {
            value: Some(value),
            color: NodeColor::default(),
            parent,
            left: NodeIndex::NIL,
            right: NodeIndex::NIL,
        }
    }

    /// The sentinel is permanently black and never carries a value.
    pub(crate) fn sentinel() -> Self {
        Self {
            value: None,
            color: NodeColor::Black,
            parent: NodeIndex::NIL,
            left: NodeIndex::NIL,
            right: NodeIndex::NIL,
        }
    }
}
