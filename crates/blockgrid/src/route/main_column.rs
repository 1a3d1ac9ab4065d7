//! Main-column selection.
//!
//! Each edge crosses from its source row to its target row through a single vertical channel, the
//! main column. Columns are picked with a sweep line over rows, keeping for every column the row
//! of the deepest block seen so far; a column is usable for an edge when that marker lies above
//! the edge's vertical span.

use crate::data::trees::PointSetMinTree;
use crate::model::BlockId;
use crate::state::LayoutState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Edge = 0,
    Block = 1,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    block_id: BlockId,
    edge_id: usize,
    row: i32,
    kind: EventKind,
}

pub fn calculate_edge_main_column(state: &mut LayoutState) {
    let mut events: Vec<Event> = Vec::with_capacity(state.block_ids.len() * 2);
    for &id in &state.block_ids {
        let block = state.grid(id);
        events.push(Event {
            block_id: id,
            edge_id: 0,
            row: block.row,
            kind: EventKind::Block,
        });
        let start_row = block.row + 1;
        for (i, edge) in state.edge[&id].iter().enumerate() {
            let end_row = state.grid(edge.dest).row;
            events.push(Event {
                block_id: id,
                edge_id: i,
                row: start_row.max(end_row),
                kind: EventKind::Edge,
            });
        }
    }
    // Stable sort keeps event construction order within a (row, kind) group, which makes column
    // choice deterministic. Edge events run before block events of the same row: a block's own
    // row never blocks an edge that ends just above it.
    events.sort_by_key(|e| (e.row, e.kind as i32));

    let mut blocked_columns = PointSetMinTree::new(state.columns + 1, -1);
    for event in events {
        let block = state.grid(event.block_id);
        match event.kind {
            EventKind::Block => {
                blocked_columns.set((block.col + 1) as usize, event.row);
            }
            EventKind::Edge => {
                let column = block.col + 1;
                let dest = state.edge[&event.block_id][event.edge_id].dest;
                let target_block = state.grid(dest);
                let top_row = (block.row + 1).min(target_block.row);
                let target_column = target_block.col + 1;

                // The source block's own column needs no horizontal jog at the top; the target's
                // column needs none at the bottom. Fall back to the nearest free column.
                let main_column = if blocked_columns.value_at(column as usize) < top_row {
                    column
                } else if blocked_columns.value_at(target_column as usize) < top_row {
                    target_column
                } else {
                    choose_free_column(
                        &blocked_columns,
                        state,
                        event.block_id,
                        event.edge_id,
                        column,
                        target_column,
                        top_row,
                        block.row,
                        target_block.row,
                    )
                };
                state
                    .edge
                    .get_mut(&event.block_id)
                    .expect("edge list missing")[event.edge_id]
                    .main_column = main_column;
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn choose_free_column(
    blocked_columns: &PointSetMinTree,
    state: &LayoutState,
    block_id: BlockId,
    edge_id: usize,
    column: i32,
    target_column: i32,
    top_row: i32,
    start_row: i32,
    end_row: i32,
) -> i32 {
    let nearest_left = blocked_columns
        .right_most_less_than(column as usize, top_row)
        .expect("empty column must exist at the left side of the drawing") as i32;
    let nearest_right = blocked_columns
        .left_most_less_than(column as usize, top_row)
        .expect("empty column must exist at the right side of the drawing") as i32;

    // Closest free column, counting the detour to the target column as well.
    let distance_left = column - nearest_left + (target_column - nearest_left).abs();
    let distance_right = nearest_right - column + (target_column - nearest_right).abs();

    // For upward edges prefer a loop just past the source column over a figure-8 shape; slightly
    // longer but crosses less.
    if end_row < start_row {
        if target_column < column
            && blocked_columns.value_at((column + 1) as usize) < top_row
            && column - target_column <= distance_left + 2
        {
            return column + 1;
        } else if target_column > column
            && blocked_columns.value_at((column - 1) as usize) < top_row
            && target_column - column <= distance_right + 2
        {
            return column - 1;
        }
    }

    if distance_left != distance_right {
        if distance_left < distance_right {
            nearest_left
        } else {
            nearest_right
        }
    } else {
        // Tie: split by edge index so true branches group on one side, false branches on the
        // other. The rule is ordinal, not semantic; it relies on the caller's edge order.
        if edge_id < state.edge[&block_id].len() / 2 {
            nearest_left
        } else {
            nearest_right
        }
    }
}
