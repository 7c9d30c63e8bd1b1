//! Fibonacci Heap with a tag index
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert, find-min and decrease_key (the last one amortized)
//! - O(log n) amortized extract_min, delete and increase_key
//!
//! The structure consists of a collection of heap-ordered trees. Next to the
//! trees, the heap keeps an index from each entry's caller-supplied tag to the
//! node holding it, so every keyed operation is addressed by tag instead of by
//! a handle returned from insert. The price is a linear `union`: two indexes
//! cannot be spliced, so each entry of the absorbed heap is registered again.
//!
//! # Structure
//!
//! - Nodes live in an arena ([`crate::storage`]) and link to each other by key.
//! - A node is *marked* once it has lost a child while being a child itself.
//!   Losing a second child cuts it loose as well (cascading cut).
//! - After `extract_min`, roots of equal degree are linked pairwise until every
//!   root degree is unique (consolidation).
//!
//! # Removal by tag
//!
//! `delete` and `extract_tag` push the entry's key down to
//! [`Priority::NEG_INFINITY`] through the regular decrease path, which makes it
//! the minimum root, and then run `extract_min`. That is why callers may never
//! supply `NEG_INFINITY` themselves.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::storage::{Forest, Node, NodeKey};
use crate::traits::{HeapError, Priority, Value};

/// Fibonacci heap indexed by tag
///
/// `T` is the tag type, `P` the priority and `V` the payload carried with each
/// entry.
///
/// # Example
///
/// ```rust
/// use tagged_fibonacci_heap::FibHeap;
///
/// let mut heap = FibHeap::new();
/// heap.insert(1, 10.0, "ten").unwrap();
/// heap.insert(2, 20.0, "twenty").unwrap();
/// heap.insert(3, 5.0, "five").unwrap();
///
/// assert_eq!(heap.minimum(), Some((&3, &5.0, &"five")));
/// heap.decrease_key(&2, 1.0).unwrap();
/// assert_eq!(heap.extract_min(), Some((2, 1.0, "twenty")));
/// assert_eq!(heap.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FibHeap<T, P, V> {
    pub(crate) forest: Forest<T, P, V>,
    pub(crate) index: FxHashMap<T, NodeKey>,
    pub(crate) min: Option<NodeKey>,
}

impl<T, P, V> Default for FibHeap<T, P, V>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, V> FibHeap<T, P, V>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            forest: Forest::default(),
            index: FxHashMap::default(),
            min: None,
        }
    }

    /// Creates an empty heap with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            forest: Forest::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            min: None,
        }
    }

    /// Returns the number of entries in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Alias of [`len`](Self::len)
    #[inline]
    pub fn num(&self) -> usize {
        self.len()
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts `value` under `tag` with priority `key`
    ///
    /// # Errors
    /// - [`HeapError::DuplicateTag`] if `tag` is already in the heap
    /// - [`HeapError::ReservedKey`] if `key` is `NEG_INFINITY`
    /// - [`HeapError::UnorderedKey`] if `key` is NaN
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, tag: T, key: P, value: V) -> Result<(), HeapError> {
        check_key(&key)?;
        if self.index.contains_key(&tag) {
            return Err(HeapError::DuplicateTag);
        }
        self.link_new(tag, key, value);
        Ok(())
    }

    /// Returns the tag, key and payload of the minimum entry
    ///
    /// # Time Complexity
    /// O(1)
    pub fn minimum(&self) -> Option<(&T, &P, &V)> {
        self.min.map(|min| {
            let node = &self.forest[min];
            (&node.tag, &node.key, &node.value)
        })
    }

    /// Returns the payload of the minimum entry
    pub fn minimum_value(&self) -> Option<&V> {
        self.min.map(|min| &self.forest[min].value)
    }

    /// Removes and returns the minimum entry
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Option<(T, P, V)> {
        let min = self.min?;
        self.remove_min(min).map(|node| (node.tag, node.key, node.value))
    }

    /// Removes the minimum entry and returns its payload
    pub fn extract_min_value(&mut self) -> Option<V> {
        let min = self.min?;
        self.remove_min(min).map(|node| node.value)
    }

    /// Lowers the key of the entry tagged `tag`
    ///
    /// # Errors
    /// - [`HeapError::TagNotFound`] if no entry carries `tag`
    /// - [`HeapError::InvalidKeyOrder`] if `key` is not smaller than the current key
    /// - [`HeapError::ReservedKey`] / [`HeapError::UnorderedKey`] as for [`insert`](Self::insert)
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key<Q>(&mut self, tag: &Q, key: P) -> Result<(), HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        check_key(&key)?;
        let node = self.lookup(tag)?;
        if key >= self.forest[node].key {
            return Err(HeapError::InvalidKeyOrder);
        }
        self.decrease(node, key);
        Ok(())
    }

    /// Raises the key of the entry tagged `tag`
    ///
    /// Children that end up smaller than the raised node are cut to the root
    /// list.
    ///
    /// # Errors
    /// - [`HeapError::TagNotFound`] if no entry carries `tag`
    /// - [`HeapError::InvalidKeyOrder`] if `key` is not larger than the current key
    /// - [`HeapError::ReservedKey`] / [`HeapError::UnorderedKey`] as for [`insert`](Self::insert)
    ///
    /// # Time Complexity
    /// O(log n) amortized, bounded by the node's degree plus a root rescan when
    /// the minimum itself is raised
    pub fn increase_key<Q>(&mut self, tag: &Q, key: P) -> Result<(), HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        check_key(&key)?;
        let node = self.lookup(tag)?;
        if key <= self.forest[node].key {
            return Err(HeapError::InvalidKeyOrder);
        }
        self.increase(node, key);
        Ok(())
    }

    /// Removes the entry tagged `tag` and returns its payload
    ///
    /// # Errors
    /// [`HeapError::TagNotFound`] if no entry carries `tag`
    pub fn delete<Q>(&mut self, tag: &Q) -> Result<V, HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_tagged(tag)
            .map(|node| node.value)
            .ok_or(HeapError::TagNotFound)
    }

    /// Removes the entry tagged `tag`, returning the key it held and its payload
    ///
    /// Returns `None` when the tag is not in the heap.
    pub fn extract_tag<Q>(&mut self, tag: &Q) -> Option<(P, V)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_tagged(tag).map(|node| (node.key, node.value))
    }

    /// Returns the key and payload of the entry tagged `tag`
    pub fn get<Q>(&self, tag: &Q) -> Option<(&P, &V)>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(tag).map(|&node| {
            let node = &self.forest[node];
            (&node.key, &node.value)
        })
    }

    /// Returns the current key of the entry tagged `tag`
    pub fn get_key<Q>(&self, tag: &Q) -> Option<P>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(tag).map(|(key, _)| *key)
    }

    /// Returns the payload of the entry tagged `tag`
    pub fn get_value<Q>(&self, tag: &Q) -> Option<&V>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(tag).map(|(_, value)| value)
    }

    /// Returns true if an entry carries `tag`
    pub fn contains<Q>(&self, tag: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(tag)
    }

    /// Moves every entry of `other` into this heap
    ///
    /// The tag sets are compared before anything moves: on
    /// [`HeapError::DuplicateTag`] both heaps are left untouched. On success
    /// `other` is left empty and can be reused.
    ///
    /// # Time Complexity
    /// O(m) for `m = other.len()`. Each entry is inserted individually so
    /// that its tag lands in this heap's index.
    pub fn union(&mut self, other: &mut Self) -> Result<(), HeapError> {
        let (small, large) = if self.index.len() <= other.index.len() {
            (&self.index, &other.index)
        } else {
            (&other.index, &self.index)
        };
        if small.keys().any(|tag| large.contains_key(tag)) {
            return Err(HeapError::DuplicateTag);
        }

        other.min = None;
        other.index.clear();
        self.index.reserve(other.forest.len());
        for node in other.forest.drain() {
            self.link_new(node.tag, node.key, node.value);
        }
        Ok(())
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.forest.clear();
        self.index.clear();
        self.min = None;
    }

    /// Iterates over all entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&T, &P, &V)> {
        self.forest
            .iter()
            .map(|(_, node)| (&node.tag, &node.key, &node.value))
    }

    fn lookup<Q>(&self, tag: &Q) -> Result<NodeKey, HeapError>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(tag).copied().ok_or(HeapError::TagNotFound)
    }

    /// Adds a fresh root for an entry that already passed validation
    fn link_new(&mut self, tag: T, key: P, value: V) {
        let node = self.forest.insert_root(tag.clone(), key, value);
        self.index.insert(tag, node);

        match self.min {
            Some(min) if key >= self.forest[min].key => {}
            _ => self.min = Some(node),
        }
    }

    /// Detaches the given minimum root, promotes its children and consolidates
    fn remove_min(&mut self, min: NodeKey) -> Option<Node<T, P, V>> {
        debug_assert_eq!(self.min, Some(min));

        for child in self.forest.take_children(min) {
            self.forest.push_root(child);
        }
        self.forest.remove_root(min);
        let node = self.forest.free(min)?;
        self.index.remove(&node.tag);

        if self.forest.len() == 0 {
            self.min = None;
        } else {
            self.consolidate();
        }
        Some(node)
    }

    fn remove_tagged<Q>(&mut self, tag: &Q) -> Option<Node<T, P, V>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.index.get(tag).copied()?;
        let key = self.forest[node].key;

        self.decrease(node, P::NEG_INFINITY);
        let mut removed = self.remove_min(node)?;
        removed.key = key;
        Some(removed)
    }

    /// Links roots of equal degree until all root degrees differ
    ///
    /// When two roots collide, the larger key becomes the child. On equal
    /// keys the root already sitting in the degree table stays the parent.
    fn consolidate(&mut self) {
        // Max degree is bounded by log_phi(n), so 64 slots rarely spill.
        let mut by_degree: SmallVec<[Option<NodeKey>; 64]> = SmallVec::new();

        for root in self.forest.take_roots() {
            let mut tree = root;
            let mut degree = self.forest[tree].degree();
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(seen) = by_degree[degree].take() else {
                    by_degree[degree] = Some(tree);
                    break;
                };
                let (parent, child) = if self.forest[seen].key <= self.forest[tree].key {
                    (seen, tree)
                } else {
                    (tree, seen)
                };
                self.forest.attach_child(parent, child);
                tree = parent;
                degree += 1;
            }
        }

        for root in by_degree.into_iter().flatten() {
            self.forest.push_root(root);
        }
        self.rescan_min();
    }

    /// Recomputes the minimum by a linear scan of the root list
    fn rescan_min(&mut self) {
        let forest = &self.forest;
        self.min = forest.roots().iter().copied().reduce(|best, root| {
            if forest[root].key < forest[best].key {
                root
            } else {
                best
            }
        });
    }

    /// Sets a smaller key and repairs heap order around `node`
    fn decrease(&mut self, node: NodeKey, key: P) {
        self.forest[node].key = key;

        if let Some(parent) = self.forest[node].parent {
            if key < self.forest[parent].key {
                self.cut(node);
                self.cascading_cut(parent);
            }
        }

        if self.forest[node].parent.is_none() {
            match self.min {
                Some(min) if key >= self.forest[min].key => {}
                _ => self.min = Some(node),
            }
        }
    }

    /// Sets a larger key and cuts every child that now violates heap order
    fn increase(&mut self, node: NodeKey, key: P) {
        self.forest[node].key = key;

        let forest = &self.forest;
        let violators: SmallVec<[NodeKey; 8]> = forest[node]
            .children
            .iter()
            .copied()
            .filter(|&child| forest[child].key < key)
            .collect();

        for child in violators {
            self.cut(child);
            self.cascading_cut(node);
        }

        if self.min == Some(node) {
            self.rescan_min();
        }
    }

    /// Moves `node` from its parent's children to the root list
    fn cut(&mut self, node: NodeKey) {
        if self.forest.detach_child(node).is_some() {
            self.forest.push_root(node);
        }
    }

    /// Walks up from a node that just lost a child
    ///
    /// Unmarked non-roots get marked and the walk stops. Marked ones are cut
    /// and the walk continues with their former parent.
    fn cascading_cut(&mut self, start: NodeKey) {
        let mut node = start;
        while let Some(parent) = self.forest[node].parent {
            if !self.forest[node].marked {
                self.forest[node].marked = true;
                return;
            }
            self.cut(node);
            node = parent;
        }
    }
}

impl<T, P, V> FibHeap<T, P, V>
where
    T: Hash + Eq + Clone,
    P: Priority,
    V: Value<Tag = T, Key = P>,
{
    /// Inserts a value under its own tag and key
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert).
    pub fn insert_value(&mut self, value: V) -> Result<(), HeapError> {
        let tag = value.tag();
        let key = value.key();
        self.insert(tag, key, value)
    }

    /// Lowers an entry to `value.key()` and replaces its payload with `value`
    ///
    /// # Errors
    /// Same as [`decrease_key`](Self::decrease_key); on error `value` is dropped
    /// and the stored payload is kept.
    pub fn decrease_key_value(&mut self, value: V) -> Result<(), HeapError> {
        let key = value.key();
        check_key(&key)?;
        let node = self.lookup(&value.tag())?;
        if key >= self.forest[node].key {
            return Err(HeapError::InvalidKeyOrder);
        }
        self.forest[node].value = value;
        self.decrease(node, key);
        Ok(())
    }

    /// Raises an entry to `value.key()` and replaces its payload with `value`
    ///
    /// # Errors
    /// Same as [`increase_key`](Self::increase_key).
    pub fn increase_key_value(&mut self, value: V) -> Result<(), HeapError> {
        let key = value.key();
        check_key(&key)?;
        let node = self.lookup(&value.tag())?;
        if key <= self.forest[node].key {
            return Err(HeapError::InvalidKeyOrder);
        }
        self.forest[node].value = value;
        self.increase(node, key);
        Ok(())
    }

    /// Removes the entry sharing `value`'s tag and returns the stored payload
    ///
    /// # Errors
    /// [`HeapError::TagNotFound`] if no entry carries that tag
    pub fn delete_value(&mut self, value: &V) -> Result<V, HeapError> {
        self.delete(&value.tag())
    }
}

/// Rejects keys callers are not allowed to store
fn check_key<P: Priority>(key: &P) -> Result<(), HeapError> {
    if !key.is_ordered() {
        return Err(HeapError::UnorderedKey);
    }
    if key.is_neg_infinity() {
        return Err(HeapError::ReservedKey);
    }
    Ok(())
}
