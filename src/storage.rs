//! Arena-backed forest storage for heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other through generational
//! [`NodeKey`]s, so parent and child links never form reference cycles.
//!
//! Every node records the slot it occupies in whichever list currently holds
//! it: the forest's root list, or its parent's child list. Detaching a node is
//! a `swap_remove` followed by a slot fixup on the element that moved into the
//! hole, which keeps cut and root removal O(1).

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for a node in the forest arena
    pub struct NodeKey;
}

/// A single heap entry and its links
#[derive(Debug, Clone)]
pub(crate) struct Node<T, P, V> {
    pub(crate) tag: T,
    pub(crate) key: P,
    pub(crate) value: V,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    /// Position inside the root list or the parent's child list
    pub(crate) slot: usize,
    pub(crate) marked: bool,
}

impl<T, P, V> Node<T, P, V> {
    fn new(tag: T, key: P, value: V) -> Self {
        Node {
            tag,
            key,
            value,
            parent: None,
            children: Vec::new(),
            slot: 0,
            marked: false,
        }
    }

    /// Number of direct children
    #[inline]
    pub(crate) fn degree(&self) -> usize {
        self.children.len()
    }
}

/// Collection of heap-ordered trees
///
/// The forest only maintains links. Ordering decisions (which node becomes
/// the parent, which root is the minimum) belong to the heap engine.
#[derive(Debug, Clone)]
pub(crate) struct Forest<T, P, V> {
    nodes: SlotMap<NodeKey, Node<T, P, V>>,
    roots: Vec<NodeKey>,
}

impl<T, P, V> Default for Forest<T, P, V> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }
}

impl<T, P, V> Forest<T, P, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            roots: Vec::new(),
        }
    }

    /// Number of live nodes
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T, P, V>> {
        self.nodes.get(key)
    }

    /// Allocates a node and appends it to the root list
    pub(crate) fn insert_root(&mut self, tag: T, key: P, value: V) -> NodeKey {
        let node = self.nodes.insert(Node::new(tag, key, value));
        self.push_root(node);
        node
    }

    /// Frees a node that has already been detached from every list
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<Node<T, P, V>> {
        self.nodes.remove(key)
    }

    /// Appends an existing, parentless node to the root list
    pub(crate) fn push_root(&mut self, key: NodeKey) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.slot = self.roots.len();
            self.roots.push(key);
        }
    }

    /// Removes a node from the root list without freeing it
    pub(crate) fn remove_root(&mut self, key: NodeKey) {
        let Some(slot) = self.nodes.get(key).map(|n| n.slot) else {
            return;
        };
        debug_assert!(self.roots.get(slot) == Some(&key));
        self.roots.swap_remove(slot);
        if let Some(&moved) = self.roots.get(slot) {
            if let Some(node) = self.nodes.get_mut(moved) {
                node.slot = slot;
            }
        }
    }

    /// Empties the root list, handing the keys to the caller
    ///
    /// The nodes stay allocated; the caller is expected to re-root or link
    /// every one of them.
    pub(crate) fn take_roots(&mut self) -> Vec<NodeKey> {
        std::mem::take(&mut self.roots)
    }

    /// Makes `child` a child of `parent`
    ///
    /// `child` must not be in any list. Its mark is cleared since it starts a
    /// fresh life as a child.
    pub(crate) fn attach_child(&mut self, parent: NodeKey, child: NodeKey) {
        let Some(p) = self.nodes.get_mut(parent) else {
            return;
        };
        let slot = p.children.len();
        p.children.push(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.slot = slot;
            c.marked = false;
        }
    }

    /// Removes a node from its parent's child list and returns the former parent
    ///
    /// The node keeps its subtree. Its parent link and mark are cleared but it
    /// is not placed on the root list.
    pub(crate) fn detach_child(&mut self, child: NodeKey) -> Option<NodeKey> {
        let (parent, slot) = {
            let c = self.nodes.get_mut(child)?;
            let parent = c.parent.take()?;
            c.marked = false;
            (parent, c.slot)
        };

        let moved = {
            let p = self.nodes.get_mut(parent)?;
            debug_assert!(p.children.get(slot) == Some(&child));
            p.children.swap_remove(slot);
            p.children.get(slot).copied()
        };
        if let Some(moved) = moved {
            if let Some(m) = self.nodes.get_mut(moved) {
                m.slot = slot;
            }
        }
        Some(parent)
    }

    /// Removes every child of `key` and returns them, parent links cleared
    pub(crate) fn take_children(&mut self, key: NodeKey) -> Vec<NodeKey> {
        let children = match self.nodes.get_mut(key) {
            Some(node) => std::mem::take(&mut node.children),
            None => return Vec::new(),
        };
        for &child in &children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
                c.marked = false;
            }
        }
        children
    }

    /// Removes every node from the arena, leaving the forest empty
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Node<T, P, V>> + '_ {
        self.roots.clear();
        self.nodes.drain().map(|(_, node)| node)
    }

    pub(crate) fn clear(&mut self) {
        self.roots.clear();
        self.nodes.clear();
    }

    /// Iterates over every live node in arena order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node<T, P, V>)> {
        self.nodes.iter()
    }
}

impl<T, P, V> Index<NodeKey> for Forest<T, P, V> {
    type Output = Node<T, P, V>;

    #[inline]
    fn index(&self, key: NodeKey) -> &Self::Output {
        &self.nodes[key]
    }
}

impl<T, P, V> IndexMut<NodeKey> for Forest<T, P, V> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut Self::Output {
        &mut self.nodes[key]
    }
}
