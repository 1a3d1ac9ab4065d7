//! Public data model: caller-owned blocks and the layout configuration.
//!
//! The layout core only reads block sizes and edge targets; it writes back the pixel position of
//! each block and the routed polyline of each edge.

use serde::{Deserialize, Serialize};

/// Identifier of a basic block, typically the block's start address.
pub type BlockId = u64;

/// A 2-D pixel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// An outgoing edge of a block. `polyline` is produced by the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub target: BlockId,
    /// Orthogonal polyline from the bottom of the source block to the top of the target block.
    pub polyline: Vec<Point>,
}

impl Edge {
    pub fn new(target: BlockId) -> Self {
        Self {
            target,
            polyline: Vec::new(),
        }
    }
}

/// A caller-owned basic block. `width`/`height` are inputs; `x`/`y` are outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    /// Outgoing edges in source order. For conditional jumps the convention is true branch first;
    /// routing tie-breaks rely on the ordinal position, not on branch semantics.
    pub edges: Vec<Edge>,
}

impl Block {
    pub fn new(width: i32, height: i32, targets: impl IntoIterator<Item = BlockId>) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
            edges: targets.into_iter().map(Edge::new).collect(),
        }
    }
}

/// Overall density of the produced layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Pack sibling subtrees using their exact silhouettes, parent near the horizontal middle.
    Narrow,
    /// Bounding-box packing of the shorter sibling, parent near the horizontal middle.
    #[default]
    Medium,
    /// Bounding-box packing, parent centered between its direct children.
    Wide,
}

/// Immutable layout configuration, constructed once per request and passed by reference through
/// the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pack sibling subtrees by exact silhouette instead of bounding box.
    pub tight_subtree_placement: bool,
    /// Place a parent at the mean column of its direct children instead of the subtree midpoint.
    pub parent_between_direct_child: bool,
    /// Minimum vertical pixel spacing between two rows of blocks.
    pub block_vertical_spacing: i32,
    /// Minimum horizontal pixel spacing between two blocks in the same row.
    pub block_horizontal_spacing: i32,
    /// Minimum vertical pixel spacing between two parallel horizontal edge segments.
    pub edge_vertical_spacing: i32,
    /// Minimum horizontal pixel spacing between two parallel vertical edge segments.
    pub edge_horizontal_spacing: i32,
    /// Center each block vertically within its row instead of top-aligning it.
    pub vertical_block_alignment_middle: bool,
}

impl LayoutConfig {
    pub fn new(kind: LayoutKind) -> Self {
        let (tight_subtree_placement, parent_between_direct_child) = match kind {
            LayoutKind::Narrow => (true, false),
            LayoutKind::Medium => (false, false),
            LayoutKind::Wide => (false, true),
        };
        Self {
            tight_subtree_placement,
            parent_between_direct_child,
            block_vertical_spacing: 40,
            block_horizontal_spacing: 20,
            edge_vertical_spacing: 10,
            edge_horizontal_spacing: 10,
            vertical_block_alignment_middle: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(LayoutKind::Medium)
    }
}
