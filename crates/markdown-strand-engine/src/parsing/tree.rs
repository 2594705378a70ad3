//! # Append-Only Tree
//!
//! Ordered tree storage for documents that only ever grow at the end.
//!
//! Nodes live in one flat buffer in pre-order. Each slot records the buffer
//! index of its last descendant, so a subtree is always the contiguous range
//! `index..=end`. The *strand* caches, per depth, the index of the node that
//! is currently open at that depth: the root-to-leaf path new nodes hang off.
//!
//! ```text
//! buffer:  [Quote, Paragraph, List, Item, Paragraph]
//! end:     [  1,       1,       4,    4,     4    ]
//! strand:  [List(2), Item(3), Paragraph(4)]
//! ```
//!
//! Appending at depth `d` truncates the strand to `d`, extends the range of
//! every node left on it, and pushes the new index. Closed siblings are never
//! touched again, so reaching the open node at any depth is O(1) and an
//! append is O(depth).

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone)]
struct Slot<T> {
    data: T,
    /// Buffer index of this node's last descendant (itself when a leaf).
    end: usize,
}

#[derive(Debug, Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
    strand: Vec<usize>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            strand: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of levels on the open strand.
    pub fn depth(&self) -> usize {
        self.strand.len()
    }

    /// The open root-to-leaf path, as buffer indices.
    pub fn strand(&self) -> &[usize] {
        &self.strand
    }

    /// Appends `data` as the newest child of the open node at `depth - 1`
    /// (or as a new root when `depth == 0`), returning its buffer index.
    ///
    /// Everything deeper than `depth` on the strand is closed off.
    pub fn append(&mut self, data: T, depth: usize) -> usize {
        debug_assert!(
            depth <= self.strand.len(),
            "append at depth {depth} past open strand of {}",
            self.strand.len()
        );
        let depth = depth.min(self.strand.len());
        self.strand.truncate(depth);

        let ix = self.slots.len();
        for &ancestor in &self.strand {
            self.slots[ancestor].end = ix;
        }
        self.slots.push(Slot { data, end: ix });
        self.strand.push(ix);
        ix
    }

    /// Closes every open node deeper than `depth`.
    pub fn truncate_strand(&mut self, depth: usize) {
        self.strand.truncate(depth);
    }

    /// Buffer index of the open node at `depth`.
    pub fn index_at(&self, depth: usize) -> Option<usize> {
        self.strand.get(depth).copied()
    }

    pub fn last_at(&self, depth: usize) -> Option<&T> {
        self.index_at(depth).map(|ix| &self.slots[ix].data)
    }

    pub fn last_at_mut(&mut self, depth: usize) -> Option<&mut T> {
        self.index_at(depth).map(|ix| &mut self.slots[ix].data)
    }

    /// The deepest open node.
    pub fn leaf(&self) -> Option<&T> {
        self.strand.last().map(|&ix| &self.slots[ix].data)
    }

    pub fn get(&self, ix: usize) -> Option<&T> {
        self.slots.get(ix).map(|s| &s.data)
    }

    pub fn get_mut(&mut self, ix: usize) -> Option<&mut T> {
        self.slots.get_mut(ix).map(|s| &mut s.data)
    }

    /// Pre-order traversal: a linear scan of the buffer.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().map(|s| &s.data)
    }

    /// The top-level nodes, in order.
    pub fn roots(&self) -> Siblings<'_, T> {
        Siblings {
            tree: self,
            next: 0,
            bound: self.slots.len(),
        }
    }

    /// The children of the node at `ix`, in order.
    pub fn children(&self, ix: usize) -> Siblings<'_, T> {
        Siblings {
            tree: self,
            next: ix + 1,
            bound: self.slots[ix].end + 1,
        }
    }

    /// Level-order traversal yielding `(depth, node)`.
    pub fn breadth_first(&self) -> BreadthFirst<'_, T> {
        let mut queue = VecDeque::new();
        queue.push_back((0, self.roots()));
        BreadthFirst { queue }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Tree<T> {
    type Output = T;

    fn index(&self, ix: usize) -> &T {
        &self.slots[ix].data
    }
}

impl<T> IndexMut<usize> for Tree<T> {
    fn index_mut(&mut self, ix: usize) -> &mut T {
        &mut self.slots[ix].data
    }
}

/// A node borrowed from a [`Tree`], able to walk its own children.
#[derive(Debug)]
pub struct Node<'a, T> {
    tree: &'a Tree<T>,
    index: usize,
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn data(self) -> &'a T {
        &self.tree.slots[self.index].data
    }

    pub fn children(self) -> Siblings<'a, T> {
        self.tree.children(self.index)
    }

    pub fn is_leaf(self) -> bool {
        self.tree.slots[self.index].end == self.index
    }
}

/// Iterates a run of siblings, hopping over each one's subtree.
#[derive(Debug)]
pub struct Siblings<'a, T> {
    tree: &'a Tree<T>,
    next: usize,
    /// Exclusive upper bound: one past the parent's last descendant.
    bound: usize,
}

impl<'a, T> Iterator for Siblings<'a, T> {
    type Item = Node<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.bound {
            return None;
        }
        let index = self.next;
        self.next = self.tree.slots[index].end + 1;
        Some(Node {
            tree: self.tree,
            index,
        })
    }
}

pub struct BreadthFirst<'a, T> {
    queue: VecDeque<(usize, Siblings<'a, T>)>,
}

impl<'a, T> Iterator for BreadthFirst<'a, T> {
    type Item = (usize, Node<'a, T>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.queue.front_mut()?;
            let depth = *depth;
            match siblings.next() {
                Some(node) => {
                    if !node.is_leaf() {
                        self.queue.push_back((depth + 1, node.children()));
                    }
                    return Some((depth, node));
                }
                None => {
                    self.queue.pop_front();
                }
            }
        }
    }
}
