//! Rough routing in grid units.
//!
//! Builds each edge's path as up to 5 orthogonal segments: a stub out of the source block, a jog
//! to the main column, the long vertical run, a jog to the target column, and a stub into the
//! target. Same-column edges collapse to a single segment, and jogs merge with the run when the
//! column directly below the source or above the target is the main column itself.

use rustc_hash::FxHashMap;

use crate::model::{Block, BlockId, LayoutConfig};
use crate::state::LayoutState;

pub fn rough_routing(
    state: &mut LayoutState,
    blocks: &FxHashMap<BlockId, Block>,
    config: &LayoutConfig,
) {
    // Fan-in/fan-out heavy blocks get tighter spacing so all stubs fit along the block side.
    let spacing_override = |block_width: i32, edge_count: i32| -> i16 {
        let max_spacing = block_width / edge_count;
        if max_spacing < config.edge_horizontal_spacing {
            max_spacing.max(1) as i16
        } else {
            0
        }
    };

    let ids = state.block_ids.clone();
    for id in ids {
        let start = state.grid(id).clone();
        let mut edges = state.edge.remove(&id).expect("edge list missing");
        for edge in &mut edges {
            let target = state.grid(edge.dest);

            edge.add_point(start.row + 1, start.col + 1, 0);
            if edge.main_column != start.col + 1 {
                edge.add_point(
                    start.row + 1,
                    start.col + 1,
                    if edge.main_column < start.col + 1 { -1 } else { 1 },
                );
                edge.add_point(
                    start.row + 1,
                    edge.main_column,
                    if target.row <= start.row { -2 } else { 0 },
                );
            }

            let main_column_kind: i16 = if edge.main_column < start.col + 1
                && edge.main_column < target.col + 1
            {
                2
            } else if edge.main_column > start.col + 1 && edge.main_column > target.col + 1 {
                -2
            } else if edge.main_column == start.col + 1 && edge.main_column != target.col + 1 {
                if edge.main_column < target.col + 1 { 1 } else { -1 }
            } else if edge.main_column == target.col + 1 && edge.main_column != start.col + 1 {
                if edge.main_column < start.col + 1 { 1 } else { -1 }
            } else {
                0
            };
            edge.add_point(target.row, edge.main_column, main_column_kind);

            if target.col + 1 != edge.main_column {
                edge.add_point(
                    target.row,
                    target.col + 1,
                    if target.row <= start.row { 2 } else { 0 },
                );
                edge.add_point(
                    target.row,
                    target.col + 1,
                    if target.col + 1 < edge.main_column { 1 } else { -1 },
                );
            }

            let start_override = spacing_override(blocks[&id].width, start.output_count);
            let target_override = spacing_override(blocks[&edge.dest].width, target.input_count);
            edge.points
                .first_mut()
                .expect("route has at least two points")
                .spacing_override = start_override;
            edge.points
                .last_mut()
                .expect("route has at least two points")
                .spacing_override = target_override;

            let mut length = 0;
            for i in 1..edge.points.len() {
                length += (edge.points[i].row - edge.points[i - 1].row).abs()
                    + (edge.points[i].col - edge.points[i - 1].col).abs();
            }
            edge.secondary_priority = 2 * length + if target.row >= start.row { 1 } else { 0 };
        }
        state.edge.insert(id, edges);
    }
}
