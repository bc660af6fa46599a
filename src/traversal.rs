//! Traversal engine: four orders, each in recursive and iterative form.
//!
//! The recursive forms live here; the explicit-stack and queue forms are in
//! `traversal_stack` and `traversal_queue`. All eight go through [`traverse`],
//! which times the run and returns the visit sequence together with its
//! [`TraversalStats`].

use std::fmt;
use std::time::Instant;

use clap::ValueEnum;
use generational_arena::Index;
use serde::Serialize;
use tracing::instrument;

use crate::arena::BinaryTree;
use crate::errors::{TreeError, TreeResult};
use crate::stats::{Recorder, TraversalStats};
use crate::traversal_queue::level_order_iterative;
use crate::traversal_stack::{inorder_iterative, postorder_iterative, preorder_iterative};

/// Recursive forms refuse trees deeper than this instead of overflowing
/// the call stack.
pub const MAX_RECURSION_DEPTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    Pre,
    In,
    Post,
    Level,
}

impl Order {
    pub const ALL: [Order; 4] = [Order::Pre, Order::In, Order::Post, Order::Level];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Pre => "preorder",
            Order::In => "inorder",
            Order::Post => "postorder",
            Order::Level => "level-order",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Recursive,
    Iterative,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Recursive => "recursive",
            Mode::Iterative => "iterative",
        };
        write!(f, "{}", name)
    }
}

/// One finished traversal: the visit-event sequence consumers animate or
/// compare, plus the measurements taken while it ran.
#[derive(Debug)]
pub struct TraversalRun {
    pub order: Order,
    pub mode: Mode,
    pub sequence: Vec<Index>,
    pub stats: TraversalStats,
}

impl TraversalRun {
    /// Resolves the visit sequence to payload references for display.
    pub fn values<'a, V>(&self, tree: &'a BinaryTree<V>) -> Vec<&'a V> {
        self.sequence
            .iter()
            .filter_map(|&idx| tree.value(idx))
            .collect()
    }
}

/// Dispatcher selecting among the eight traversal variants.
///
/// Errors with [`TreeError::RecursionLimit`] when a recursive form is asked
/// to walk a tree deeper than [`MAX_RECURSION_DEPTH`].
#[instrument(level = "debug", skip(tree))]
pub fn traverse<V>(tree: &BinaryTree<V>, order: Order, mode: Mode) -> TreeResult<TraversalRun> {
    if mode == Mode::Recursive {
        let height = tree.height();
        if height > MAX_RECURSION_DEPTH {
            return Err(TreeError::RecursionLimit {
                height,
                limit: MAX_RECURSION_DEPTH,
            });
        }
    }

    let mut rec = Recorder::new();
    let mut seq = Vec::with_capacity(tree.len());
    let started = Instant::now();

    match (order, mode) {
        (Order::Pre, Mode::Recursive) => preorder_recursive(tree, &mut rec, &mut seq),
        (Order::Pre, Mode::Iterative) => preorder_iterative(tree, &mut rec, &mut seq),
        (Order::In, Mode::Recursive) => inorder_recursive(tree, &mut rec, &mut seq),
        (Order::In, Mode::Iterative) => inorder_iterative(tree, &mut rec, &mut seq),
        (Order::Post, Mode::Recursive) => postorder_recursive(tree, &mut rec, &mut seq),
        (Order::Post, Mode::Iterative) => postorder_iterative(tree, &mut rec, &mut seq),
        (Order::Level, Mode::Recursive) => level_order_recursive(tree, &mut rec, &mut seq),
        (Order::Level, Mode::Iterative) => level_order_iterative(tree, &mut rec, &mut seq),
    }

    let stats = rec.finish(started.elapsed());
    Ok(TraversalRun {
        order,
        mode,
        sequence: seq,
        stats,
    })
}

fn preorder_recursive<V>(tree: &BinaryTree<V>, rec: &mut Recorder, out: &mut Vec<Index>) {
    if let Some(root) = tree.root() {
        preorder_walk(tree, root, 1, rec, out);
    }
}

fn preorder_walk<V>(
    tree: &BinaryTree<V>,
    idx: Index,
    depth: usize,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let Some(node) = tree.node(idx) else { return };
    rec.stack_depth(depth);
    rec.visit();
    out.push(idx);
    if let Some(left) = node.left {
        preorder_walk(tree, left, depth + 1, rec, out);
    }
    if let Some(right) = node.right {
        preorder_walk(tree, right, depth + 1, rec, out);
    }
}

fn inorder_recursive<V>(tree: &BinaryTree<V>, rec: &mut Recorder, out: &mut Vec<Index>) {
    if let Some(root) = tree.root() {
        inorder_walk(tree, root, 1, rec, out);
    }
}

fn inorder_walk<V>(
    tree: &BinaryTree<V>,
    idx: Index,
    depth: usize,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let Some(node) = tree.node(idx) else { return };
    rec.stack_depth(depth);
    if let Some(left) = node.left {
        inorder_walk(tree, left, depth + 1, rec, out);
    }
    rec.visit();
    out.push(idx);
    if let Some(right) = node.right {
        inorder_walk(tree, right, depth + 1, rec, out);
    }
}

fn postorder_recursive<V>(tree: &BinaryTree<V>, rec: &mut Recorder, out: &mut Vec<Index>) {
    if let Some(root) = tree.root() {
        postorder_walk(tree, root, 1, rec, out);
    }
}

fn postorder_walk<V>(
    tree: &BinaryTree<V>,
    idx: Index,
    depth: usize,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let Some(node) = tree.node(idx) else { return };
    rec.stack_depth(depth);
    if let Some(left) = node.left {
        postorder_walk(tree, left, depth + 1, rec, out);
    }
    if let Some(right) = node.right {
        postorder_walk(tree, right, depth + 1, rec, out);
    }
    rec.visit();
    out.push(idx);
}

/// Level-order via recursion: one pass per level, each pass descending only
/// to nodes at that level. Costs O(n * height) visits worth of walking but
/// needs no queue.
fn level_order_recursive<V>(tree: &BinaryTree<V>, rec: &mut Recorder, out: &mut Vec<Index>) {
    let Some(root) = tree.root() else { return };
    let height = tree.height();
    for level in 0..height {
        level_walk(tree, root, level, 1, rec, out);
    }
}

fn level_walk<V>(
    tree: &BinaryTree<V>,
    idx: Index,
    remaining: usize,
    depth: usize,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let Some(node) = tree.node(idx) else { return };
    rec.stack_depth(depth);
    if remaining == 0 {
        rec.visit();
        out.push(idx);
        return;
    }
    if let Some(left) = node.left {
        level_walk(tree, left, remaining - 1, depth + 1, rec, out);
    }
    if let Some(right) = node.right {
        level_walk(tree, right, remaining - 1, depth + 1, rec, out);
    }
}
