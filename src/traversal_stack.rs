//! Iterative depth-first traversals using an explicit stack.
//!
//! The stack replaces the call stack of the recursive forms; its length is
//! sampled on every push so the recorder sees the true peak.

use generational_arena::Index;

use crate::arena::BinaryTree;
use crate::stats::Recorder;

/// Preorder: visit on the way down, then backtrack to the right subtree.
pub(crate) fn preorder_iterative<V>(
    tree: &BinaryTree<V>,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let mut stack: Vec<Index> = Vec::new();
    let mut current = tree.root();

    while current.is_some() || !stack.is_empty() {
        while let Some(idx) = current {
            rec.visit();
            out.push(idx);
            stack.push(idx);
            rec.stack_depth(stack.len());
            current = tree.node(idx).and_then(|n| n.left);
        }
        if let Some(idx) = stack.pop() {
            current = tree.node(idx).and_then(|n| n.right);
        }
    }
}

/// Inorder: descend left pushing, visit on pop, then cross to the right.
pub(crate) fn inorder_iterative<V>(
    tree: &BinaryTree<V>,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let mut stack: Vec<Index> = Vec::new();
    let mut current = tree.root();

    while current.is_some() || !stack.is_empty() {
        while let Some(idx) = current {
            stack.push(idx);
            rec.stack_depth(stack.len());
            current = tree.node(idx).and_then(|n| n.left);
        }
        if let Some(idx) = stack.pop() {
            rec.visit();
            out.push(idx);
            current = tree.node(idx).and_then(|n| n.right);
        }
    }
}

/// Postorder with a single stack: a node is only popped once its right
/// subtree was the last one visited.
pub(crate) fn postorder_iterative<V>(
    tree: &BinaryTree<V>,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let mut stack: Vec<Index> = Vec::new();
    let mut current = tree.root();
    let mut last_visited: Option<Index> = None;

    while current.is_some() || !stack.is_empty() {
        while let Some(idx) = current {
            stack.push(idx);
            rec.stack_depth(stack.len());
            current = tree.node(idx).and_then(|n| n.left);
        }
        let Some(&peek) = stack.last() else { break };
        let right = tree.node(peek).and_then(|n| n.right);
        if right.is_some() && last_visited != right {
            current = right;
        } else {
            rec.visit();
            out.push(peek);
            last_visited = stack.pop();
        }
    }
}
