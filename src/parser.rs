//! Preorder token serialization.
//!
//! A tree is written as its preorder sequence with `#` marking an absent
//! child, e.g. `1 2 # # 3` is a root `1` with left child `2` and right
//! child `3`. Tokens may be separated by whitespace, commas, or both.

use generational_arena::Index;
use regex::Regex;
use tracing::instrument;

use crate::arena::BinaryTree;
use crate::errors::{TreeError, TreeResult};
use crate::traversal::MAX_RECURSION_DEPTH;

pub const NIL_TOKEN: &str = "#";

/// Parses a preorder token string into a tree.
#[instrument(level = "debug", skip(input))]
pub fn parse_preorder(input: &str) -> TreeResult<BinaryTree<i64>> {
    let splitter = Regex::new(r"[,\s]+").unwrap();
    let tokens: Vec<&str> = splitter
        .split(input.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err(TreeError::TruncatedInput);
    }

    let mut tree = BinaryTree::with_capacity(tokens.len() / 2 + 1);
    let mut pos = 0usize;
    parse_node(&tokens, &mut pos, &mut tree, None, 1)?;

    if pos != tokens.len() {
        return Err(TreeError::TrailingTokens {
            count: tokens.len() - pos,
        });
    }
    Ok(tree)
}

/// `slot` is `None` for the root, otherwise the parent index and whether
/// this subtree hangs off its left side.
fn parse_node(
    tokens: &[&str],
    pos: &mut usize,
    tree: &mut BinaryTree<i64>,
    slot: Option<(Index, bool)>,
    depth: usize,
) -> TreeResult<()> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(TreeError::RecursionLimit {
            height: depth,
            limit: MAX_RECURSION_DEPTH,
        });
    }

    let token = *tokens.get(*pos).ok_or(TreeError::TruncatedInput)?;
    *pos += 1;
    if token == NIL_TOKEN {
        return Ok(());
    }

    let value: i64 = token.parse().map_err(|e: std::num::ParseIntError| {
        TreeError::ParseToken {
            token: token.to_string(),
            reason: e.to_string(),
        }
    })?;

    let idx = match slot {
        None => tree.insert_root(value),
        Some((parent, true)) => tree.attach_left(parent, value)?,
        Some((parent, false)) => tree.attach_right(parent, value)?,
    };

    parse_node(tokens, pos, tree, Some((idx, true)), depth + 1)?;
    parse_node(tokens, pos, tree, Some((idx, false)), depth + 1)
}

/// Serializes a tree back to preorder tokens; the empty tree yields `["#"]`.
pub fn to_preorder_tokens<V: std::fmt::Display>(tree: &BinaryTree<V>) -> Vec<String> {
    let mut out = Vec::with_capacity(tree.len() * 2 + 1);
    let mut stack = vec![tree.root()];

    while let Some(slot) = stack.pop() {
        match slot.and_then(|idx| tree.node(idx)) {
            None => out.push(NIL_TOKEN.to_string()),
            Some(node) => {
                out.push(node.value.to_string());
                stack.push(node.right);
                stack.push(node.left);
            }
        }
    }

    out
}
