//! Layout driver.
//!
//! Runs the stages in order: cycle removal and topological order, row assignment, spanning tree
//! selection with merge points, subtree placement, edge routing, pixel conversion. Every stage
//! iterates blocks through the sorted id list in [`LayoutState`], so a given input always maps to
//! the same output.

use rustc_hash::FxHashMap;

use crate::coords;
use crate::error::{LayoutError, Result};
use crate::model::{Block, BlockId, LayoutConfig};
use crate::placement;
use crate::route;
use crate::rows;
use crate::state::{GridEdge, LayoutState};
use crate::toposort;

/// Lay out `blocks` as a control-flow graph entered at `entry`.
///
/// On success every block has its `x`/`y` set and every edge carries an orthogonal polyline; the
/// returned pair is the total drawing size in pixels. The input is not modified on error.
pub fn layout(
    blocks: &mut FxHashMap<BlockId, Block>,
    entry: BlockId,
    config: &LayoutConfig,
) -> Result<(i32, i32)> {
    if !blocks.contains_key(&entry) {
        return Err(LayoutError::MissingEntry(entry));
    }
    for (&id, block) in blocks.iter() {
        for edge in &block.edges {
            if !blocks.contains_key(&edge.target) {
                return Err(LayoutError::MissingTarget {
                    from: id,
                    target: edge.target,
                });
            }
        }
    }

    let mut state = LayoutState::new(blocks);

    let order = toposort::run(&mut state, blocks, entry);
    rows::assign_rows(&mut state, &order);
    rows::select_tree(&mut state);
    rows::find_merge_points(&mut state);
    placement::compute_block_placement(&order, &mut state, config);

    let ids = state.block_ids.clone();
    for &id in &ids {
        let edges: Vec<GridEdge> = blocks[&id]
            .edges
            .iter()
            .map(|edge| GridEdge::new(edge.target))
            .collect();
        state.grid_mut(id).output_count += edges.len() as i32;
        for edge in &edges {
            state.grid_mut(edge.dest).input_count += 1;
        }
        state.edge.insert(id, edges);
    }

    let mut rows = 0usize;
    let mut columns = 0usize;
    for &id in &state.block_ids {
        let node = state.grid(id);
        rows = rows.max(node.row as usize + 1);
        columns = columns.max(node.col as usize + 2);
    }
    state.rows = rows;
    state.columns = columns;
    state.row_height = vec![0; rows];
    state.column_width = vec![0; columns];
    for &id in &state.block_ids {
        let node = &state.grid_blocks[&id];
        let block = &blocks[&id];
        state.row_height[node.row as usize] =
            state.row_height[node.row as usize].max(block.height);
        let half_width = block.width / 2;
        let col = node.col as usize;
        state.column_width[col] = state.column_width[col].max(half_width);
        state.column_width[col + 1] = state.column_width[col + 1].max(half_width);
    }
    tracing::debug!(
        blocks = state.block_ids.len(),
        rows = state.rows,
        columns = state.columns,
        "grid placement done"
    );

    route::route_edges(&mut state, blocks, config);
    let (width, height) = coords::convert_to_pixels(&mut state, blocks, config);
    tracing::debug!(width, height, "pixel conversion done");
    Ok((width, height))
}
