//! Tree generation: complete, skewed, and seeded random shapes.

use std::collections::VecDeque;
use std::fmt;

use clap::ValueEnum;
use generational_arena::Index;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::arena::{BinaryTree, MAX_NODES};
use crate::errors::{TreeError, TreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Every level full except possibly the last, filled left to right
    Complete,
    /// Each node has only a left child
    LeftSkewed,
    /// Each node has only a right child
    RightSkewed,
    /// Each node attached under a uniformly chosen free slot
    Random,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Complete => "complete",
            Shape::LeftSkewed => "left-skewed",
            Shape::RightSkewed => "right-skewed",
            Shape::Random => "random",
        };
        write!(f, "{}", name)
    }
}

/// Builds `i64`-valued trees of a requested shape and size. Values are
/// assigned in creation order, `0..n`, so a complete tree reads `0..n` in
/// level order.
pub struct TreeBuilder {
    seed: u64,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { seed: 42 }
    }

    /// Seed only matters for [`Shape::Random`]; same seed, same shape.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, shape: Shape, n: usize) -> TreeResult<BinaryTree<i64>> {
        check_size(n)?;
        match shape {
            Shape::Complete => self.complete(n),
            Shape::LeftSkewed => self.chain(n, true),
            Shape::RightSkewed => self.chain(n, false),
            Shape::Random => self.random(n),
        }
    }

    /// Queue-driven level filling: parents leave the queue in creation
    /// order and receive children until `n` nodes exist.
    pub fn complete(&self, n: usize) -> TreeResult<BinaryTree<i64>> {
        check_size(n)?;
        let mut tree = BinaryTree::with_capacity(n);
        if n == 0 {
            return Ok(tree);
        }

        let root = tree.insert_root(0);
        let mut queue = VecDeque::new();
        queue.push_back(root);
        let mut created: usize = 1;

        while let Some(parent) = queue.pop_front() {
            if created >= n {
                break;
            }
            let left = tree.attach_left(parent, created as i64)?;
            queue.push_back(left);
            created += 1;

            if created < n {
                let right = tree.attach_right(parent, created as i64)?;
                queue.push_back(right);
                created += 1;
            }
        }

        Ok(tree)
    }

    pub fn left_skewed(&self, n: usize) -> TreeResult<BinaryTree<i64>> {
        check_size(n)?;
        self.chain(n, true)
    }

    pub fn right_skewed(&self, n: usize) -> TreeResult<BinaryTree<i64>> {
        check_size(n)?;
        self.chain(n, false)
    }

    fn chain(&self, n: usize, left: bool) -> TreeResult<BinaryTree<i64>> {
        let mut tree = BinaryTree::with_capacity(n);
        if n == 0 {
            return Ok(tree);
        }

        let mut tail = tree.insert_root(0);
        for value in 1..n as i64 {
            tail = if left {
                tree.attach_left(tail, value)?
            } else {
                tree.attach_right(tail, value)?
            };
        }

        Ok(tree)
    }

    /// Grows the tree one node at a time, attaching each under a free slot
    /// drawn uniformly from all open left/right positions.
    pub fn random(&self, n: usize) -> TreeResult<BinaryTree<i64>> {
        check_size(n)?;
        let mut tree = BinaryTree::with_capacity(n);
        if n == 0 {
            return Ok(tree);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let root = tree.insert_root(0);
        let mut free: Vec<(Index, bool)> = vec![(root, true), (root, false)];

        for value in 1..n as i64 {
            let pick = rng.random_range(0..free.len());
            let (parent, left) = free.swap_remove(pick);
            let child = if left {
                tree.attach_left(parent, value)?
            } else {
                tree.attach_right(parent, value)?
            };
            free.push((child, true));
            free.push((child, false));
        }

        Ok(tree)
    }
}

fn check_size(n: usize) -> TreeResult<()> {
    if n > MAX_NODES {
        return Err(TreeError::NodeLimitExceeded {
            requested: n,
            limit: MAX_NODES,
        });
    }
    Ok(())
}
