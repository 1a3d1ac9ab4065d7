//! Edge routing: main-column selection, rough routing, and segment-offset assignment.

pub mod main_column;
pub mod offsets;
pub mod rough;

use rustc_hash::FxHashMap;

use crate::model::{Block, BlockId, LayoutConfig};
use crate::state::LayoutState;

pub fn route_edges(
    state: &mut LayoutState,
    blocks: &mut FxHashMap<BlockId, Block>,
    config: &LayoutConfig,
) {
    main_column::calculate_edge_main_column(state);
    rough::rough_routing(state, blocks, config);
    offsets::elaborate_edge_placement(state, blocks, config);
}
