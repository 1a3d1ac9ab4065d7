//! Computation-scoped layout state.
//!
//! One [`LayoutState`] is built per layout request and discarded at its end. All intermediate
//! grid coordinates live here; the caller's blocks are only touched by the final pixel pass.

use rustc_hash::FxHashMap;

use crate::data::list_pool::List;
use crate::model::{Block, BlockId};

/// Grid-unit counterpart of a caller [`Block`]. Each block spans 2 columns and 1 row; the double
/// width lets merge-point adjustment center a block between two others.
#[derive(Debug, Clone, Default)]
pub struct GridBlock {
    pub id: BlockId,
    pub row: i32,
    pub col: i32,
    /// Outgoing edges retained after cycle removal, in source order.
    pub dag_edge: Vec<BlockId>,
    /// Subset of `dag_edge` forming the spanning tree used for placement.
    pub tree_edge: Vec<BlockId>,
    pub has_parent: bool,

    // Subtree placement bookkeeping. Columns here are relative to the subtree until the final
    // top-down absolutization pass.
    pub row_count: i32,
    pub left_position: i32,
    pub right_position: i32,
    pub last_row_left: i32,
    pub last_row_right: i32,
    pub left_shape: List,
    pub right_shape: List,

    pub input_count: i32,
    pub output_count: i32,
}

/// One waypoint of an edge's rough route. Points alternate vertical/horizontal, starting with the
/// vertical stub out of the source block.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePoint {
    pub row: i32,
    pub col: i32,
    /// Pixel offset within the point's edge column (vertical) or edge row (horizontal), filled in
    /// by segment-offset assignment.
    pub offset: i32,
    /// Packing-order class, see the segment sort in `route::offsets`.
    pub kind: i16,
    /// Reduced inter-edge spacing at blocks with many edges, 0 for the configured default.
    pub spacing_override: i16,
}

/// Routing state of one caller edge.
#[derive(Debug, Clone, Default)]
pub struct GridEdge {
    pub dest: BlockId,
    /// Vertical channel the edge travels through between its source and target rows.
    pub main_column: i32,
    pub points: Vec<RoutePoint>,
    /// Length-based tie-break used by segment-offset assignment ordering.
    pub secondary_priority: i32,
}

impl GridEdge {
    pub fn new(dest: BlockId) -> Self {
        Self {
            dest,
            ..Default::default()
        }
    }

    pub fn add_point(&mut self, row: i32, col: i32, kind: i16) {
        self.points.push(RoutePoint {
            row,
            col,
            offset: 0,
            kind,
            spacing_override: 0,
        });
    }
}

#[derive(Debug, Default)]
pub struct LayoutState {
    /// Block ids in ascending order. All map iteration goes through this list so that identical
    /// input produces identical output.
    pub block_ids: Vec<BlockId>,
    pub grid_blocks: FxHashMap<BlockId, GridBlock>,
    /// Per source block, one [`GridEdge`] per caller edge, in caller edge order.
    pub edge: FxHashMap<BlockId, Vec<GridEdge>>,

    pub rows: usize,
    pub columns: usize,
    pub row_height: Vec<i32>,
    pub column_width: Vec<i32>,
    pub edge_row_height: Vec<i32>,
    pub edge_column_width: Vec<i32>,
    pub row_offset: Vec<i32>,
    pub column_offset: Vec<i32>,
    pub edge_row_offset: Vec<i32>,
    pub edge_column_offset: Vec<i32>,
}

impl LayoutState {
    pub fn new(blocks: &FxHashMap<BlockId, Block>) -> Self {
        let mut block_ids: Vec<BlockId> = blocks.keys().copied().collect();
        block_ids.sort_unstable();

        let grid_blocks = block_ids
            .iter()
            .map(|&id| {
                (
                    id,
                    GridBlock {
                        id,
                        ..Default::default()
                    },
                )
            })
            .collect();

        Self {
            block_ids,
            grid_blocks,
            ..Default::default()
        }
    }

    pub fn grid(&self, id: BlockId) -> &GridBlock {
        self.grid_blocks.get(&id).expect("grid block missing")
    }

    pub fn grid_mut(&mut self, id: BlockId) -> &mut GridBlock {
        self.grid_blocks.get_mut(&id).expect("grid block missing")
    }
}
