use crate::RedBlackTree;

/// Tree entry ordered by key alone. Lookups probe with a value-less entry,
/// so `V` needs no ordering of its own.
struct MapEntry<K: Ord, V> {
    key: K,
    value: Option<V>,
}

impl<K: Ord, V> PartialEq for MapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for MapEntry<K, V> {}

impl<K: Ord, V> PartialOrd for MapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for MapEntry<K, V> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// An associative array storing key-value pairs in a [`RedBlackTree`].
///
/// Duplicate keys are permitted and kept side by side; lookups and removal
/// operate on the first entry the search finds for a key.
pub struct RedBlackMap<K: Ord, V> {
    tree: RedBlackTree<MapEntry<K, V>>,
}

impl<K: Ord, V> RedBlackMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.tree.insert(MapEntry {
            key,
            value: Some(value),
        });
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.tree.contains(&MapEntry { key, value: None })
    }

    pub fn get(&self, key: K) -> Option<&V> {
        let idx = self.tree.find(&MapEntry { key, value: None })?;
        self.tree.get(idx)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        let idx = self.tree.find(&MapEntry { key, value: None })?;
        self.tree.get_mut(idx)?.value.as_mut()
    }

    /// Removes one entry for `key`, reporting whether one existed.
    pub fn remove(&mut self, key: K) -> bool {
        self.tree.remove(&MapEntry { key, value: None })
    }

    /// Key-value pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.tree
            .iter()
            .filter_map(|entry| Some((&entry.key, entry.value.as_ref()?)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }
}

impl<K: Ord, V> Default for RedBlackMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
