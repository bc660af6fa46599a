//! Iterative level-order traversal using a FIFO queue.

use std::collections::VecDeque;

use generational_arena::Index;

use crate::arena::BinaryTree;
use crate::stats::Recorder;

/// Breadth-first: dequeue, visit, enqueue children. Queue length is sampled
/// after every enqueue so the recorder sees the widest front.
pub(crate) fn level_order_iterative<V>(
    tree: &BinaryTree<V>,
    rec: &mut Recorder,
    out: &mut Vec<Index>,
) {
    let Some(root) = tree.root() else { return };

    let mut queue: VecDeque<Index> = VecDeque::new();
    queue.push_back(root);
    rec.queue_len(queue.len());

    while let Some(idx) = queue.pop_front() {
        rec.visit();
        out.push(idx);
        if let Some(node) = tree.node(idx) {
            if let Some(left) = node.left {
                queue.push_back(left);
            }
            if let Some(right) = node.right {
                queue.push_back(right);
            }
            rec.queue_len(queue.len());
        }
    }
}
