//! Diagnostic views of a heap: the forest dump and the structure check

use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::fibonacci::FibHeap;
use crate::storage::NodeKey;
use crate::traits::Priority;

/// Renders counts, the current minimum and every tree in bracket notation
///
/// ```text
/// Total number: 4, Root size: 2, Index size: 4,
/// Current minimum: key(1), tag("a"), value(()),
/// Heap detail:
/// < 1 < 3 < 4 > > 2 >
/// ```
///
/// Each `< ... >` group is one list of siblings; a node's children follow
/// its key. An empty heap renders `Heap is empty.`.
impl<T, P, V> fmt::Display for FibHeap<T, P, V>
where
    T: Hash + Eq + Clone + Debug,
    P: Priority,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((tag, key, value)) = self.minimum() else {
            return writeln!(f, "Heap is empty.");
        };

        writeln!(
            f,
            "Total number: {}, Root size: {}, Index size: {},",
            self.len(),
            self.forest.roots().len(),
            self.index.len()
        )?;
        writeln!(
            f,
            "Current minimum: key({key:?}), tag({tag:?}), value({value:?}),"
        )?;
        writeln!(f, "Heap detail:")?;
        self.write_forest(f)?;
        writeln!(f)
    }
}

impl<T, P, V> FibHeap<T, P, V>
where
    T: Hash + Eq + Clone,
    P: Priority,
{
    /// Depth-first bracket dump with an explicit stack, so degenerate chains
    /// do not grow the call stack
    fn write_forest(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&[NodeKey], usize)> = vec![(self.forest.roots(), 0)];
        f.write_str("<")?;

        while let Some((siblings, pos)) = stack.last_mut() {
            let Some(&next) = siblings.get(*pos) else {
                f.write_str(" >")?;
                stack.pop();
                continue;
            };
            *pos += 1;

            let node = &self.forest[next];
            write!(f, " {:?}", node.key)?;
            if !node.children.is_empty() {
                f.write_str(" <")?;
                stack.push((node.children.as_slice(), 0));
            }
        }
        Ok(())
    }

    /// Checks every structural invariant of the heap
    ///
    /// Verifies that:
    /// - every index entry names a live node carrying that tag, and the index
    ///   and the arena have the same size
    /// - parent and child links agree, slots match list positions
    /// - every child's key is at least its parent's key
    /// - roots are unmarked
    /// - every node is reachable from the root list exactly once
    /// - the cached minimum is a root and no root has a smaller key
    ///
    /// Runs in O(n). Intended for tests and debugging.
    pub fn verify_structure(&self) -> bool {
        if self.index.len() != self.forest.len() {
            return false;
        }
        for (tag, &node) in &self.index {
            match self.forest.get(node) {
                Some(n) if n.tag == *tag => {}
                _ => return false,
            }
        }

        let mut reached = 0usize;
        let mut pending: Vec<NodeKey> = Vec::new();
        for (slot, &root) in self.forest.roots().iter().enumerate() {
            let Some(node) = self.forest.get(root) else {
                return false;
            };
            if node.parent.is_some() || node.marked || node.slot != slot {
                return false;
            }
            pending.push(root);
        }

        while let Some(key) = pending.pop() {
            reached += 1;
            if reached > self.forest.len() {
                return false;
            }
            let node = &self.forest[key];
            for (slot, &child) in node.children.iter().enumerate() {
                let Some(c) = self.forest.get(child) else {
                    return false;
                };
                if c.parent != Some(key) || c.slot != slot || c.key < node.key {
                    return false;
                }
                pending.push(child);
            }
        }
        if reached != self.forest.len() {
            return false;
        }

        match self.min {
            None => self.forest.len() == 0,
            Some(min) => {
                let Some(min_node) = self.forest.get(min) else {
                    return false;
                };
                min_node.parent.is_none()
                    && self
                        .forest
                        .roots()
                        .iter()
                        .all(|&root| self.forest[root].key >= min_node.key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::FibHeap;

    #[test]
    fn test_empty_dump() {
        let heap: FibHeap<u8, i32, ()> = FibHeap::new();
        assert_eq!(heap.to_string(), "Heap is empty.\n");
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_flat_dump() {
        let mut heap = FibHeap::new();
        heap.insert("a", 2, 'x').unwrap();
        heap.insert("b", 1, 'y').unwrap();

        assert_eq!(
            heap.to_string(),
            "Total number: 2, Root size: 2, Index size: 2,\n\
             Current minimum: key(1), tag(\"b\"), value('y'),\n\
             Heap detail:\n\
             < 2 1 >\n"
        );
    }

    #[test]
    fn test_nested_dump() {
        let mut heap = FibHeap::new();
        for (tag, key) in [10, 11, 12, 13, 14].into_iter().enumerate() {
            heap.insert(tag, key, ()).unwrap();
        }
        heap.extract_min();

        // Roots [14, 11, 12, 13] consolidate into 11 < 14, 12 < 13 >
        let dump = heap.to_string();
        assert!(dump.starts_with("Total number: 4, Root size: 1, Index size: 4,\n"));
        assert!(dump.ends_with("Heap detail:\n< 11 < 14 12 < 13 > > >\n"));
    }

    #[test]
    fn test_deep_chain_dump() {
        // 2047 nodes consolidate into trees of every degree from 0 to 10
        let mut heap = FibHeap::new();
        for i in 0..2048i64 {
            heap.insert(i, i, ()).unwrap();
        }
        heap.extract_min();
        let dump = heap.to_string();
        assert_eq!(dump.matches('<').count(), dump.matches('>').count());
        assert!(heap.verify_structure());
    }
}
