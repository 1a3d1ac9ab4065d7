//! Row assignment, spanning-tree selection, and merge-point adjustment.

use crate::model::BlockId;
use crate::state::LayoutState;

/// Assign rows in toposort order (roots first) so that every DAG edge points strictly downward.
/// Loop edges are the only ones that may point back up.
pub fn assign_rows(state: &mut LayoutState, order: &[BlockId]) {
    for &id in order.iter().rev() {
        let block = state.grid(id);
        let next_row = block.row + 1;
        let targets = block.dag_edge.clone();
        for target in targets {
            let target_block = state.grid_mut(target);
            target_block.row = target_block.row.max(next_row);
        }
    }
}

/// Greedily claim each DAG child exactly one row below as a tree child, turning the DAG into a
/// forest with one tree per root. A block keeps the first parent that claims it.
pub fn select_tree(state: &mut LayoutState) {
    let ids = state.block_ids.clone();
    for id in ids {
        let block = state.grid(id);
        let row = block.row;
        let targets = block.dag_edge.clone();
        for target_id in targets {
            let target = state.grid_mut(target_id);
            if !target.has_parent && target.row == row + 1 {
                target.has_parent = true;
                state.grid_mut(id).tree_edge.push(target_id);
            }
        }
    }
}

/// Detect single-child branches that reconverge one row below into the same grandchild (the
/// typical if/else join) and pre-shift the branch owning the tree edge so the join looks
/// centered after placement.
pub fn find_merge_points(state: &mut LayoutState) {
    let ids = state.block_ids.clone();
    for id in ids {
        let block = state.grid(id);
        let tree_edge = block.tree_edge.clone();

        let mut merge_block: Option<BlockId> = None;
        let mut grand_child_count = 0usize;
        for &child_id in &tree_edge {
            let child = state.grid(child_id);
            if let Some(&grand_child) = child.tree_edge.first() {
                merge_block = Some(grand_child);
            }
            grand_child_count += child.tree_edge.len();
        }
        let Some(merge_id) = merge_block else { continue };
        if grand_child_count != 1 {
            continue;
        }

        let mut blocks_going_to_merge = 0usize;
        let mut block_with_tree_edge = 0usize;
        for &child_id in &tree_edge {
            let child = state.grid(child_id);
            if !child.dag_edge.contains(&merge_id) {
                break;
            }
            if child.tree_edge.len() == 1 {
                block_with_tree_edge = blocks_going_to_merge;
            }
            blocks_going_to_merge += 1;
        }
        if blocks_going_to_merge > 0 {
            let shifted = tree_edge[block_with_tree_edge];
            state.grid_mut(shifted).col =
                (block_with_tree_edge * 2) as i32 - (blocks_going_to_merge as i32 - 1);
        }
    }
}
