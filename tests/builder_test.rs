//! Tests for tree generation

use rstest::rstest;

use treelab::builder::{Shape, TreeBuilder};
use treelab::parser::to_preorder_tokens;
use treelab::traversal::{traverse, Mode, Order};

// ============================================================
// Complete Shape Tests
// ============================================================

#[test]
fn given_complete_shape_when_built_then_level_order_reads_zero_to_n() {
    let tree = TreeBuilder::new().complete(15).unwrap();
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.height(), 4);

    let run = traverse(&tree, Order::Level, Mode::Iterative).unwrap();
    let values: Vec<i64> = run.values(&tree).into_iter().copied().collect();
    assert_eq!(values, (0..15).collect::<Vec<_>>());
}

#[test]
fn given_zero_nodes_when_built_then_tree_is_empty() {
    for shape in [
        Shape::Complete,
        Shape::LeftSkewed,
        Shape::RightSkewed,
        Shape::Random,
    ] {
        let tree = TreeBuilder::new().build(shape, 0).unwrap();
        assert!(tree.is_empty(), "{} should be empty", shape);
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(6)]
#[case(16)]
fn given_partial_last_level_when_built_then_count_is_exact(#[case] n: usize) {
    let tree = TreeBuilder::new().complete(n).unwrap();
    assert_eq!(tree.len(), n);
}

// ============================================================
// Skewed Shape Tests
// ============================================================

#[test]
fn given_left_skewed_when_built_then_single_branch_of_left_children() {
    let tree = TreeBuilder::new().left_skewed(5).unwrap();
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.height(), 5);
    assert_eq!(tree.leaf_values().len(), 1);
    assert!(tree.iter().all(|(_, node)| node.right.is_none()));
}

#[test]
fn given_right_skewed_when_built_then_single_branch_of_right_children() {
    let tree = TreeBuilder::new().right_skewed(5).unwrap();
    assert_eq!(tree.height(), 5);
    assert!(tree.iter().all(|(_, node)| node.left.is_none()));
}

// ============================================================
// Random Shape Tests
// ============================================================

#[test]
fn given_same_seed_when_built_twice_then_shapes_are_identical() {
    let first = TreeBuilder::with_seed(7).random(40).unwrap();
    let second = TreeBuilder::with_seed(7).random(40).unwrap();
    assert_eq!(to_preorder_tokens(&first), to_preorder_tokens(&second));
}

#[test]
fn given_different_seeds_when_built_then_shapes_differ() {
    let first = TreeBuilder::with_seed(1).random(40).unwrap();
    let second = TreeBuilder::with_seed(2).random(40).unwrap();
    assert_ne!(to_preorder_tokens(&first), to_preorder_tokens(&second));
}

#[test]
fn given_random_shape_when_built_then_height_is_within_bounds() {
    let tree = TreeBuilder::with_seed(11).random(40).unwrap();
    assert_eq!(tree.len(), 40);
    // Can't be flatter than a complete tree nor taller than a chain
    assert!(tree.height() >= 6);
    assert!(tree.height() <= 40);
}
