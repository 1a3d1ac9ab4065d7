//! Grid-to-pixel conversion.
//!
//! Columns and edge columns interleave along the x axis (edge column `i` sits left of column
//! `i`, the last edge column closes the drawing on the right); rows and edge rows do the same
//! along y. Once every width and height is known, pixel positions are plain prefix sums.

use rustc_hash::FxHashMap;

use crate::model::{Block, BlockId, LayoutConfig, Point};
use crate::state::LayoutState;

/// Compute interleaved prefix sums; returns the total extent.
pub fn calculate_column_offsets(
    column_width: &[i32],
    edge_column_width: &[i32],
    column_offset: &mut Vec<i32>,
    edge_column_offset: &mut Vec<i32>,
) -> i32 {
    debug_assert_eq!(edge_column_width.len(), column_width.len() + 1);
    let mut position = 0;
    edge_column_offset.resize(edge_column_width.len(), 0);
    column_offset.resize(column_width.len(), 0);
    for i in 0..column_width.len() {
        edge_column_offset[i] = position;
        position += edge_column_width[i];
        column_offset[i] = position;
        position += column_width[i];
    }
    *edge_column_offset
        .last_mut()
        .expect("edge column offsets are non-empty") = position;
    position += edge_column_width
        .last()
        .expect("edge column widths are non-empty");
    position
}

/// Assign pixel positions to blocks and materialize edge polylines; returns `(width, height)`.
pub fn convert_to_pixels(
    state: &mut LayoutState,
    blocks: &mut FxHashMap<BlockId, Block>,
    config: &LayoutConfig,
) -> (i32, i32) {
    let width = calculate_column_offsets(
        &state.column_width,
        &state.edge_column_width,
        &mut state.column_offset,
        &mut state.edge_column_offset,
    );
    let height = calculate_column_offsets(
        &state.row_height,
        &state.edge_row_height,
        &mut state.row_offset,
        &mut state.edge_row_offset,
    );

    for &id in &state.block_ids {
        let node = &state.grid_blocks[&id];
        let block = blocks.get_mut(&id).expect("laid out block missing");
        let col = node.col as usize;
        let row = node.row as usize;
        // Center the block on its middle edge column.
        block.x = state.edge_column_offset[col + 1] + state.edge_column_width[col + 1] / 2
            - block.width / 2;
        block.y = state.row_offset[row];
        if config.vertical_block_alignment_middle {
            block.y += (state.row_height[row] - block.height) / 2;
        }
    }

    let position: FxHashMap<BlockId, (i32, i32, i32)> = blocks
        .iter()
        .map(|(&id, block)| (id, (block.x, block.y, block.height)))
        .collect();

    for &id in &state.block_ids {
        let (_, source_y, source_height) = position[&id];
        let block = blocks.get_mut(&id).expect("laid out block missing");
        for (result_edge, edge) in block.edges.iter_mut().zip(&state.edge[&id]) {
            debug_assert_eq!(result_edge.target, edge.dest);
            let (_, target_y, _) = position[&edge.dest];

            result_edge.polyline.clear();
            result_edge.polyline.push(Point {
                x: 0,
                y: source_y + source_height,
            });
            for (j, point) in edge.points.iter().enumerate().skip(1) {
                let last = result_edge
                    .polyline
                    .last_mut()
                    .expect("polyline starts non-empty");
                if j % 2 == 1 {
                    let x = state.edge_column_offset[point.col as usize] + point.offset;
                    last.x = x;
                    result_edge.polyline.push(Point { x, y: 0 });
                } else {
                    let y = state.edge_row_offset[point.row as usize] + point.offset;
                    last.y = y;
                    result_edge.polyline.push(Point { x: 0, y });
                }
            }
            result_edge
                .polyline
                .last_mut()
                .expect("polyline starts non-empty")
                .y = target_y;
        }
    }

    (width, height)
}
