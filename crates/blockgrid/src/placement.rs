//! Bottom-up subtree placement.
//!
//! Tree selection reduced the DAG to a forest, so placement is putting subtrees side by side with
//! the parent on top. Subtree silhouettes are kept as linked lists of per-row column deltas so
//! that shifting a whole subtree only touches the first list entry, and merging two silhouettes
//! is a pool splice instead of a copy.

use crate::data::list_pool::ListPool;
use crate::model::{BlockId, LayoutConfig};
use crate::state::LayoutState;

/// Assign a column to every block. Processes blocks in post-order (children before parents),
/// keeping child columns relative to their parent until a final top-down pass makes them
/// absolute.
pub fn compute_block_placement(order: &[BlockId], state: &mut LayoutState, config: &LayoutConfig) {
    // Two silhouettes per block.
    let mut pool: ListPool<i32> = ListPool::with_capacity(order.len() * 2);

    for &block_id in order {
        let tree_edge = state.grid(block_id).tree_edge.clone();

        if tree_edge.is_empty() {
            let block = state.grid_mut(block_id);
            block.row_count = 1;
            block.col = 0;
            block.last_row_right = 2;
            block.last_row_left = 0;
            block.left_position = 0;
            block.right_position = 2;
            block.left_shape = pool.make_list(0);
            block.right_shape = pool.make_list(2);
            continue;
        }

        // Start from the first child's subtree and fold the remaining children into it.
        let first_child = state.grid(tree_edge[0]);
        let mut left_side = first_child.left_shape;
        let mut right_side = first_child.right_shape;
        let mut row_count = first_child.row_count;
        let mut last_row_right = first_child.last_row_right;
        let mut last_row_left = first_child.last_row_left;
        let mut left_position = first_child.left_position;
        let mut right_position = first_child.right_position;

        for &child_id in &tree_edge[1..] {
            let child = state.grid(child_id);
            let mut child_col = child.col;
            let child_left_shape = child.left_shape;
            let child_right_shape = child.right_shape;
            let child_row_count = child.row_count;
            let child_last_row_right = child.last_row_right;
            let child_last_row_left = child.last_row_left;
            let child_left_position = child.left_position;
            let child_right_position = child.right_position;

            // Walk the rows where the two subtrees touch, accumulating the silhouette deltas.
            let mut min_pos = i32::MIN;
            let mut left_pos = 0;
            let mut right_pos = 0;
            let mut left_it = pool.head(right_side);
            let mut right_it = pool.head(child_left_shape);
            let mut max_left_width = 0;
            let mut min_right_pos = child_col;

            while !left_it.is_end() && !right_it.is_end() {
                left_pos += *pool.get(left_it);
                right_pos += *pool.get(right_it);
                min_pos = min_pos.max(left_pos - right_pos);
                max_left_width = max_left_width.max(left_pos);
                min_right_pos = min_right_pos.min(right_pos);
                left_it = pool.next(left_it);
                right_it = pool.next(right_it);
            }

            let right_tree_offset = if config.tight_subtree_placement {
                // Exact silhouettes, subtrees as close as possible.
                min_pos
            } else if !left_it.is_end() {
                // Bounding box of the shorter side; here the new child is the shorter one.
                max_left_width - child_left_position
            } else {
                right_position - min_right_pos
            };

            // Stitch the silhouettes together after shifting the child into place.
            child_col += right_tree_offset;
            if !left_it.is_end() {
                *pool.get_mut(left_it) -= right_tree_offset + child_last_row_right - left_pos;
                let tail = pool.split_tail(right_side, left_it);
                right_side = pool.append(child_right_shape, tail);
            } else if !right_it.is_end() {
                *pool.get_mut(right_it) += right_pos + right_tree_offset - last_row_left;
                let tail = pool.split_tail(child_left_shape, right_it);
                left_side = pool.append(left_side, tail);

                right_side = child_right_shape;
                last_row_right = child_last_row_right + right_tree_offset;
                last_row_left = child_last_row_left + right_tree_offset;
            } else {
                right_side = child_right_shape;
            }
            let right_head = pool.head(right_side);
            *pool.get_mut(right_head) += right_tree_offset;

            row_count = row_count.max(child_row_count);
            left_position = left_position.min(child_left_position + right_tree_offset);
            right_position = right_position.max(right_tree_offset + child_right_position);
            state.grid_mut(child_id).col = child_col;
        }

        // Parent column: mean of direct children, or subtree midpoint clamped between the first
        // and last child.
        let col = if config.parent_between_direct_child {
            let mut sum = 0;
            for &target in &tree_edge {
                sum += state.grid(target).col;
            }
            sum / tree_edge.len() as i32
        } else {
            let first = state.grid(tree_edge[0]).col;
            let last = state.grid(*tree_edge.last().expect("tree_edge is non-empty")).col;
            ((right_position + left_position) / 2 - 1).max(first - 1).min(last + 1)
        };

        let block = state.grid_mut(block_id);
        // += keeps the offset assigned by merge-point adjustment.
        block.col += col;
        let block_col = block.col;
        block.row_count = row_count + 1;
        block.left_position = left_position.min(block_col);
        block.right_position = right_position.max(block_col + 2);
        block.last_row_left = last_row_left;
        block.last_row_right = last_row_right;

        let left_head = pool.head(left_side);
        *pool.get_mut(left_head) -= block_col;
        let left_cap = pool.make_list(block_col);
        let left_shape = pool.append(left_cap, left_side);

        let right_head = pool.head(right_side);
        *pool.get_mut(right_head) -= block_col + 2;
        let right_cap = pool.make_list(block_col + 2);
        let right_shape = pool.append(right_cap, right_side);

        let block = state.grid_mut(block_id);
        block.left_shape = left_shape;
        block.right_shape = right_shape;

        // Keep children relative to the parent so that moving the parent moves the whole subtree.
        for &target in &tree_edge {
            state.grid_mut(target).col -= block_col;
        }
    }

    // Place roots left to right. A typical function has a single root matching the entry point;
    // unreachable components and analysis failures produce more.
    let mut next_empty_column = 0;
    let ids = state.block_ids.clone();
    for id in ids {
        let block = state.grid_mut(id);
        if block.row == 0 {
            let offset = -block.left_position;
            block.col += next_empty_column + offset;
            next_empty_column += block.right_position + offset;
        }
    }

    // Top to bottom, convert relative positions to absolute.
    for &id in order.iter().rev() {
        let block = state.grid(id);
        let block_col = block.col;
        debug_assert!(block_col >= 0, "block column went negative during placement");
        let children = block.tree_edge.clone();
        for child in children {
            state.grid_mut(child).col += block_col;
        }
    }
}
