use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Upper bound on generated or parsed tree sizes, keeps allocation sane.
pub const MAX_NODES: usize = 1 << 26;

/// Node in the arena-backed binary tree.
#[derive(Debug, Clone)]
pub struct TreeNode<V> {
    /// Payload carried by this node
    pub value: V,
    /// Index of the parent node, None for the root
    pub parent: Option<Index>,
    /// Left child, if any
    pub left: Option<Index>,
    /// Right child, if any
    pub right: Option<Index>,
}

impl<V> TreeNode<V> {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-backed binary tree.
///
/// Uses a generational arena for memory-safe node handles and O(1) lookups.
/// Indices handed out by `insert_root`/`attach_*` stay valid until the tree
/// is cleared or rebuilt; stale handles surface as errors, never panics.
#[derive(Debug)]
pub struct BinaryTree<V> {
    arena: Arena<TreeNode<V>>,
    root: Option<Index>,
}

impl<V> Default for BinaryTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BinaryTree<V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node(&self, idx: Index) -> Option<&TreeNode<V>> {
        self.arena.get(idx)
    }

    pub fn node_mut(&mut self, idx: Index) -> Option<&mut TreeNode<V>> {
        self.arena.get_mut(idx)
    }

    pub fn value(&self, idx: Index) -> Option<&V> {
        self.arena.get(idx).map(|n| &n.value)
    }

    /// Replaces the whole tree with a single root node.
    pub fn insert_root(&mut self, value: V) -> Index {
        self.arena.clear();
        let idx = self.arena.insert(TreeNode {
            value,
            parent: None,
            left: None,
            right: None,
        });
        self.root = Some(idx);
        idx
    }

    /// Attaches a new left child under `parent`.
    #[instrument(level = "trace", skip_all)]
    pub fn attach_left(&mut self, parent: Index, value: V) -> TreeResult<Index> {
        self.attach(parent, value, true)
    }

    /// Attaches a new right child under `parent`.
    #[instrument(level = "trace", skip_all)]
    pub fn attach_right(&mut self, parent: Index, value: V) -> TreeResult<Index> {
        self.attach(parent, value, false)
    }

    fn attach(&mut self, parent: Index, value: V, left: bool) -> TreeResult<Index> {
        match self.arena.get(parent) {
            None => return Err(TreeError::StaleIndex),
            Some(node) => {
                let slot = if left { node.left } else { node.right };
                if slot.is_some() {
                    return Err(TreeError::SlotOccupied {
                        side: if left { "left" } else { "right" },
                    });
                }
            }
        }

        let child = self.arena.insert(TreeNode {
            value,
            parent: Some(parent),
            left: None,
            right: None,
        });
        if let Some(node) = self.arena.get_mut(parent) {
            if left {
                node.left = Some(child);
            } else {
                node.right = Some(child);
            }
        }
        Ok(child)
    }

    /// Number of levels; empty trees have height 0, a lone root height 1.
    ///
    /// Walks with an explicit stack so degenerate chains cannot overflow
    /// the call stack.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }

        while let Some((idx, depth)) = stack.pop() {
            if depth > max_depth {
                max_depth = depth;
            }
            if let Some(node) = self.arena.get(idx) {
                if let Some(left) = node.left {
                    stack.push((left, depth + 1));
                }
                if let Some(right) = node.right {
                    stack.push((right, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Payloads of all leaves, in preorder.
    pub fn leaf_values(&self) -> Vec<&V> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| &node.value)
            .collect()
    }

    /// Preorder iterator over `(Index, &TreeNode)`.
    pub fn iter(&self) -> PreorderIter<'_, V> {
        PreorderIter::new(self)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

impl<V: fmt::Display> BinaryTree<V> {
    /// Renders the tree for terminal display. Children are tagged `L`/`R`
    /// so a lone child is unambiguous.
    pub fn to_termtree(&self) -> Option<Tree<String>> {
        self.root.map(|root| self.subtree(root, None))
    }

    fn subtree(&self, idx: Index, tag: Option<&str>) -> Tree<String> {
        let Some(node) = self.arena.get(idx) else {
            return Tree::new("?".to_string());
        };
        let label = match tag {
            Some(tag) => format!("{} {}", tag, node.value),
            None => node.value.to_string(),
        };
        let mut leaves = Vec::new();
        if let Some(left) = node.left {
            leaves.push(self.subtree(left, Some("L")));
        }
        if let Some(right) = node.right {
            leaves.push(self.subtree(right, Some("R")));
        }
        Tree::new(label).with_leaves(leaves)
    }
}

pub struct PreorderIter<'a, V> {
    tree: &'a BinaryTree<V>,
    stack: Vec<Index>,
}

impl<'a, V> PreorderIter<'a, V> {
    fn new(tree: &'a BinaryTree<V>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, V> Iterator for PreorderIter<'a, V> {
    type Item = (Index, &'a TreeNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(idx) {
                // Right pushed first so the left subtree pops first
                if let Some(right) = node.right {
                    self.stack.push(right);
                }
                if let Some(left) = node.left {
                    self.stack.push(left);
                }
                return Some((idx, node));
            }
        }
        None
    }
}
