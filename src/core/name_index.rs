//! Unbalanced binary search tree over record copies, keyed by name.
//!
//! Nodes live in a `Vec` and link to each other by index. Names compare
//! byte-wise and case-sensitively. Equal names descend right, so lookups
//! always return the first match reached from the root, which is the
//! earliest inserted of the duplicates. There is no removal and no
//! rebalancing: inserting names in sorted order degrades the tree to a chain.

use std::cmp::Ordering;

use crate::record::FurnitureRecord;

#[derive(Debug, Clone)]
struct NameNode {
    record: FurnitureRecord,
    left: Option<usize>,
    right: Option<usize>,
}

/// Name-keyed lookup structure holding independent record copies.
#[derive(Debug, Default, Clone)]
pub struct NameIndex {
    nodes: Vec<NameNode>,
    root: Option<usize>,
}

impl NameIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` as a new leaf.
    pub fn insert(&mut self, record: FurnitureRecord) {
        let idx = self.nodes.len();
        let mut link = self.root;
        let mut parent: Option<(usize, Ordering)> = None;

        while let Some(at) = link {
            let node = &self.nodes[at];
            let ord = compare_names(&record.name, &node.record.name);
            link = if ord.is_lt() { node.left } else { node.right };
            parent = Some((at, ord));
        }

        self.nodes.push(NameNode {
            record,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(idx),
            Some((at, Ordering::Less)) => self.nodes[at].left = Some(idx),
            Some((at, _)) => self.nodes[at].right = Some(idx),
        }
    }

    /// First exact match on the descent from the root.
    pub fn lookup(&self, name: &str) -> Option<&FurnitureRecord> {
        let mut link = self.root;
        while let Some(at) = link {
            let node = &self.nodes[at];
            match compare_names(name, &node.record.name) {
                Ordering::Equal => return Some(&node.record),
                Ordering::Less => link = node.left,
                Ordering::Greater => link = node.right,
            }
        }
        None
    }

    /// Copies in ascending name order; duplicates in insertion order.
    pub fn iter_in_order(&self) -> InOrder<'_> {
        InOrder {
            index: self,
            stack: Vec::new(),
            next: self.root,
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((at, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[at];
            pending.extend(node.left.map(|l| (l, depth + 1)));
            pending.extend(node.right.map(|r| (r, depth + 1)));
        }
        deepest
    }

    /// Number of copies held, stale ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}

/// In-order traversal returned by [`NameIndex::iter_in_order`].
#[derive(Debug)]
pub struct InOrder<'a> {
    index: &'a NameIndex,
    stack: Vec<usize>,
    next: Option<usize>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a FurnitureRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(at) = self.next {
            self.stack.push(at);
            self.next = self.index.nodes[at].left;
        }
        let at = self.stack.pop()?;
        let node = &self.index.nodes[at];
        self.next = node.right;
        Some(&node.record)
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}
