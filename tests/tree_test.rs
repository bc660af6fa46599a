//! Tests for the arena-backed binary tree

use treelab::arena::{BinaryTree, MAX_NODES};
use treelab::builder::TreeBuilder;
use treelab::errors::TreeError;

// ============================================================
// Empty Tree Tests
// ============================================================

#[test]
fn given_empty_tree_when_queried_then_everything_is_zero() {
    let tree: BinaryTree<i64> = BinaryTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert!(tree.root().is_none());
    assert!(tree.leaf_values().is_empty());
    assert!(tree.to_termtree().is_none());
}

// ============================================================
// Manual Construction Tests
// ============================================================

#[test]
fn given_manual_construction_when_attaching_then_links_are_consistent() {
    let mut tree = BinaryTree::new();
    let root = tree.insert_root(1);
    let left = tree.attach_left(root, 2).unwrap();
    let right = tree.attach_right(root, 3).unwrap();
    let grandchild = tree.attach_left(left, 4).unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.height(), 3);

    let root_node = tree.node(root).unwrap();
    assert_eq!(root_node.left, Some(left));
    assert_eq!(root_node.right, Some(right));
    assert!(root_node.parent.is_none());

    assert_eq!(tree.node(left).unwrap().parent, Some(root));
    assert_eq!(tree.node(grandchild).unwrap().parent, Some(left));
    assert!(tree.node(right).unwrap().is_leaf());
}

#[test]
fn given_occupied_slot_when_attaching_then_reports_slot_occupied() {
    let mut tree = BinaryTree::new();
    let root = tree.insert_root(1);
    tree.attach_left(root, 2).unwrap();

    let err = tree.attach_left(root, 3).unwrap_err();
    assert!(matches!(err, TreeError::SlotOccupied { side: "left" }));

    // The right slot is still free
    assert!(tree.attach_right(root, 3).is_ok());
}

#[test]
fn given_cleared_tree_when_attaching_with_old_index_then_reports_stale_index() {
    let mut tree = BinaryTree::new();
    let root = tree.insert_root(1);
    tree.clear();

    assert!(tree.is_empty());
    let err = tree.attach_left(root, 2).unwrap_err();
    assert!(matches!(err, TreeError::StaleIndex));
}

#[test]
fn given_existing_tree_when_inserting_root_then_old_nodes_are_gone() {
    let mut tree = BinaryTree::new();
    let root = tree.insert_root(1);
    tree.attach_left(root, 2).unwrap();

    tree.insert_root(9);
    assert_eq!(tree.len(), 1);
    let root = tree.root().unwrap();
    assert_eq!(tree.value(root), Some(&9));
}

// ============================================================
// Shape Fact Tests
// ============================================================

#[test]
fn given_complete_tree_when_measuring_then_height_is_logarithmic() {
    let builder = TreeBuilder::new();
    assert_eq!(builder.complete(1).unwrap().height(), 1);
    assert_eq!(builder.complete(7).unwrap().height(), 3);
    assert_eq!(builder.complete(8).unwrap().height(), 4);
    assert_eq!(builder.complete(15).unwrap().height(), 4);
}

#[test]
fn given_skewed_tree_when_measuring_then_height_equals_node_count() {
    let builder = TreeBuilder::new();
    assert_eq!(builder.left_skewed(37).unwrap().height(), 37);
    assert_eq!(builder.right_skewed(37).unwrap().height(), 37);
}

#[test]
fn given_complete_tree_when_collecting_leaves_then_last_levels_are_returned() {
    let tree = TreeBuilder::new().complete(15).unwrap();
    let leaves = tree.leaf_values();
    assert_eq!(leaves.len(), 8);
    assert!(leaves.iter().all(|&&v| v >= 7));
}

// ============================================================
// Iterator Tests
// ============================================================

#[test]
fn given_tree_when_iterating_then_visits_all_nodes_once() {
    let tree = TreeBuilder::new().complete(31).unwrap();
    let mut seen: Vec<i64> = tree.iter().map(|(_, node)| node.value).collect();
    assert_eq!(seen.len(), 31);
    seen.sort();
    assert_eq!(seen, (0..31).collect::<Vec<_>>());
}

#[test]
fn given_tree_when_iterating_then_parents_come_before_children() {
    let tree = TreeBuilder::new().complete(15).unwrap();
    let order: Vec<_> = tree.iter().map(|(idx, _)| idx).collect();
    for (idx, node) in tree.iter() {
        if let Some(parent) = node.parent {
            let parent_pos = order.iter().position(|&i| i == parent).unwrap();
            let own_pos = order.iter().position(|&i| i == idx).unwrap();
            assert!(parent_pos < own_pos, "parent must precede its child");
        }
    }
}

// ============================================================
// Rendering Tests
// ============================================================

#[test]
fn given_tree_when_rendering_then_every_value_shows_up() {
    let tree = TreeBuilder::new().complete(7).unwrap();
    let rendered = tree.to_termtree().unwrap().to_string();
    for value in 0..7 {
        assert!(rendered.contains(&value.to_string()));
    }
    // One line per node
    assert_eq!(rendered.trim_end().lines().count(), 7);
}

// ============================================================
// Size Guard Tests
// ============================================================

#[test]
fn given_oversized_request_when_building_then_reports_node_limit() {
    let err = TreeBuilder::new().complete(MAX_NODES + 1).unwrap_err();
    assert!(matches!(err, TreeError::NodeLimitExceeded { .. }));
}
