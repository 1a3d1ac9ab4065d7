//! Fine-grained segment-offset assignment.
//!
//! Segments sharing a column (vertical pass) or a row (horizontal pass) are packed into
//! non-overlapping pixel offsets with one shared routine. The assignment order is picked so that
//! overlapping segments whose spans nest like valid parentheses come out interleaved instead of
//! crossing, and block sides take part in the packing so edges may slip into the free space
//! between narrow blocks.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::coords::calculate_column_offsets;
use crate::data::trees::RangeAssignMaxTree;
use crate::model::{Block, BlockId, LayoutConfig};
use crate::state::{LayoutState, RoutePoint};

/// One straight piece of an edge in one axis. Field names follow the vertical interpretation;
/// the horizontal pass swaps the axes.
#[derive(Debug, Clone, Copy)]
struct EdgeSegment {
    y0: i32,
    y1: i32,
    x: i32,
    edge_index: usize,
    secondary_priority: i32,
    kind: i16,
    /// 0 when the default spacing applies.
    spacing_override: i16,
}

/// Reserved space contributed by one side of a block.
#[derive(Debug, Clone, Copy)]
struct NodeSide {
    x: i32,
    y0: i32,
    y1: i32,
    /// Block size in the x-axis direction.
    size: i32,
}

pub fn elaborate_edge_placement(
    state: &mut LayoutState,
    blocks: &FxHashMap<BlockId, Block>,
    config: &LayoutConfig,
) {
    // -- Vertical segments -------------------------------------------------------------------
    let mut segments: Vec<EdgeSegment> = Vec::new();
    let mut edge_index = 0usize;
    for_each_point(state, 1, |point, prev, _next, secondary_priority| {
        segments.push(EdgeSegment {
            // Edge rows are the even grid rows, blocks sit in the odd ones.
            y0: prev.row * 2,
            y1: point.row * 2,
            x: point.col,
            edge_index: post_increment(&mut edge_index),
            secondary_priority,
            kind: point.kind,
            spacing_override: point.spacing_override,
        });
    });

    let mut left_sides: Vec<NodeSide> = Vec::new();
    let mut right_sides: Vec<NodeSide> = Vec::new();
    for &id in &state.block_ids {
        let node = &state.grid_blocks[&id];
        let width = blocks[&id].width;
        let left_width = width / 2;
        // Not the same as left_width; a one pixel imbalance is visible.
        let right_width = width - left_width;
        let row = node.row * 2 + 1;
        left_sides.push(NodeSide {
            x: node.col,
            y0: row,
            y1: row,
            size: left_width,
        });
        right_sides.push(NodeSide {
            x: node.col + 1,
            y0: row,
            y1: row,
            size: right_width,
        });
    }

    state.edge_column_width = vec![config.block_horizontal_spacing; state.columns + 1];
    state.edge_column_width[0] = config.edge_horizontal_spacing;
    *state
        .edge_column_width
        .last_mut()
        .expect("edge column widths are non-empty") = config.edge_horizontal_spacing;

    let mut edge_offsets = vec![0i32; edge_index];
    let column_width = state.column_width.clone();
    calculate_segment_offsets(
        &mut segments,
        &mut edge_offsets,
        &mut state.edge_column_width,
        &mut right_sides,
        &mut left_sides,
        &column_width,
        2 * state.rows + 1,
        config.edge_horizontal_spacing,
    );
    center_edges(
        &mut edge_offsets,
        &state.edge_column_width,
        &segments,
        config.block_horizontal_spacing,
    );

    // Block half-widths shrink once the adjoining edge-column widths are known; segments that
    // hug a block side move with it.
    let old_column_widths = std::mem::take(&mut state.column_width);
    adjust_column_widths(state, blocks);
    for segment in &segments {
        let x = segment.x as usize;
        let offset = &mut edge_offsets[segment.edge_index];
        if segment.kind == -2 && x > 0 {
            *offset -= (state.edge_column_width[x - 1] / 2 + state.column_width[x - 1])
                - old_column_widths[x - 1];
        } else if segment.kind == 2 && x + 1 < state.edge_column_width.len() {
            *offset += (state.edge_column_width[x + 1] / 2 + state.column_width[x])
                - old_column_widths[x];
        }
    }
    calculate_column_offsets(
        &state.column_width,
        &state.edge_column_width,
        &mut state.column_offset,
        &mut state.edge_column_offset,
    );
    copy_offsets_to_points(state, &edge_offsets, 1);

    // -- Horizontal segments -----------------------------------------------------------------
    // Spans use the exact x coordinates obtained from vertical segment placement, compressed to
    // a dense index range for the packing tree.
    segments.clear();
    left_sides.clear();
    right_sides.clear();

    let mut edge_index = 0usize;
    let edge_column_offset = state.edge_column_offset.clone();
    for_each_point(state, 2, |point, prev, next, secondary_priority| {
        let next = next.expect("horizontal point is followed by a vertical point");
        let y0 = edge_column_offset[prev.col as usize] + prev.offset;
        let y1 = edge_column_offset[next.col as usize] + next.offset;
        segments.push(EdgeSegment {
            y0,
            y1,
            x: point.row,
            edge_index: post_increment(&mut edge_index),
            secondary_priority,
            kind: point.kind,
            spacing_override: point.spacing_override,
        });
    });

    for &id in &state.block_ids {
        let node = &state.grid_blocks[&id];
        let block = &blocks[&id];
        let col = node.col as usize;
        let left_side = state.edge_column_offset[col + 1] + state.edge_column_width[col + 1] / 2
            - block.width / 2;
        let right_side = left_side + block.width;

        let free_space = state.row_height[node.row as usize] - block.height;
        let mut top_profile = state.row_height[node.row as usize];
        let mut bottom_profile = block.height;
        if config.vertical_block_alignment_middle {
            top_profile -= free_space / 2;
            bottom_profile += free_space / 2;
        }
        left_sides.push(NodeSide {
            x: node.row,
            y0: left_side,
            y1: right_side,
            size: top_profile,
        });
        right_sides.push(NodeSide {
            x: node.row,
            y0: left_side,
            y1: right_side,
            size: bottom_profile,
        });
    }

    state.edge_row_height = vec![config.block_vertical_spacing; state.rows + 1];
    state.edge_row_height[0] = config.edge_vertical_spacing;
    *state
        .edge_row_height
        .last_mut()
        .expect("edge row heights are non-empty") = config.edge_vertical_spacing;

    let mut edge_offsets = vec![0i32; edge_index];
    let compressed_size = compress_coordinates(&mut segments, &mut left_sides, &mut right_sides);
    let row_height = state.row_height.clone();
    calculate_segment_offsets(
        &mut segments,
        &mut edge_offsets,
        &mut state.edge_row_height,
        &mut right_sides,
        &mut left_sides,
        &row_height,
        compressed_size,
        config.edge_vertical_spacing,
    );
    copy_offsets_to_points(state, &edge_offsets, 2);
}

fn post_increment(index: &mut usize) -> usize {
    let value = *index;
    *index += 1;
    value
}

/// Visit the route points of every edge at `start, start + 2, ...` in deterministic edge order.
/// `start = 1` walks the vertical points, `start = 2` the horizontal ones.
fn for_each_point(
    state: &LayoutState,
    start: usize,
    mut f: impl FnMut(&RoutePoint, &RoutePoint, Option<&RoutePoint>, i32),
) {
    for id in &state.block_ids {
        for edge in &state.edge[id] {
            let mut j = start;
            while j < edge.points.len() {
                f(
                    &edge.points[j],
                    &edge.points[j - 1],
                    edge.points.get(j + 1),
                    edge.secondary_priority,
                );
                j += 2;
            }
        }
    }
}

/// Write assigned offsets back into the route points walked by [`for_each_point`].
fn copy_offsets_to_points(state: &mut LayoutState, edge_offsets: &[i32], start: usize) {
    let mut edge_index = 0usize;
    let ids = state.block_ids.clone();
    for id in ids {
        for edge in state.edge.get_mut(&id).expect("edge list missing") {
            let mut j = start;
            while j < edge.points.len() {
                edge.points[j].offset = edge_offsets[edge_index];
                edge_index += 1;
                j += 2;
            }
        }
    }
}

/// Pack segments into offsets relative to their edge column.
///
/// Terminology matches the vertical pass; the horizontal pass passes rows for columns. Each
/// coordinate is handled in two batches (kinds `<= 1`, then the right-hugging kind `2`), with the
/// second batch mirrored so its segments pack from the right. `edge_column_width` enters with the
/// configured minimum widths and leaves with the widths the packed segments actually need.
#[allow(clippy::too_many_arguments)]
fn calculate_segment_offsets(
    segments: &mut [EdgeSegment],
    edge_offsets: &mut [i32],
    edge_column_width: &mut [i32],
    node_right_side: &mut [NodeSide],
    node_left_side: &mut [NodeSide],
    column_width: &[i32],
    h: usize,
    segment_spacing: i32,
) {
    for segment in segments.iter_mut() {
        if segment.y0 > segment.y1 {
            std::mem::swap(&mut segment.y0, &mut segment.y1);
        }
    }

    // Sort order drives assignment order: nested spans (valid-parenthesization structure) are
    // packed inside-out so they interleave instead of crossing. The stable sort keeps edge
    // construction order for full ties, which keeps the output deterministic.
    segments.sort_by(|a, b| {
        if a.x != b.x {
            return a.x.cmp(&b.x);
        }
        if a.kind != b.kind {
            return a.kind.cmp(&b.kind);
        }
        let a_size = a.y1 - a.y0;
        let b_size = b.y1 - b.y0;
        if a_size != b_size {
            return if a.kind != 1 {
                a_size.cmp(&b_size)
            } else {
                b_size.cmp(&a_size)
            };
        }
        if a.kind != 1 {
            a.secondary_priority.cmp(&b.secondary_priority)
        } else {
            b.secondary_priority.cmp(&a.secondary_priority)
        }
    });

    node_right_side.sort_by_key(|side| side.x);
    node_left_side.sort_by_key(|side| side.x);

    let mut max_segment = RangeAssignMaxTree::new(h, i32::MIN);
    let mut si = 0usize;
    let mut right_it = 0usize;
    let mut left_it = 0usize;
    while si < segments.len() {
        let x = segments[si].x;

        // Left batch: offsets grow rightward from the left column's blocks.
        let left_column_width = if x > 0 { column_width[(x - 1) as usize] } else { 0 };
        max_segment.set_range(0, h, -left_column_width);
        while right_it < node_right_side.len() && node_right_side[right_it].x + 1 < x {
            right_it += 1;
        }
        while right_it < node_right_side.len() && node_right_side[right_it].x + 1 == x {
            let side = node_right_side[right_it];
            max_segment.set_range(
                side.y0 as usize,
                side.y1 as usize + 1,
                side.size - left_column_width,
            );
            right_it += 1;
        }

        while si < segments.len() && segments[si].x == x && segments[si].kind <= 1 {
            let segment = segments[si];
            let mut y = max_segment.range_max(segment.y0 as usize, segment.y1 as usize + 1);
            if segment.kind != -2 {
                y = y.max(0);
            }
            y += if segment.spacing_override != 0 {
                segment.spacing_override as i32
            } else {
                segment_spacing
            };
            max_segment.set_range(segment.y0 as usize, segment.y1 as usize + 1, y);
            edge_offsets[segment.edge_index] = y;
            si += 1;
        }

        let first_right_side_segment = si;
        let middle_width = max_segment.range_max(0, h).max(0);

        // Right batch: pack against the right column's blocks, then mirror.
        let right_column_width = if (x as usize) < column_width.len() {
            column_width[x as usize]
        } else {
            0
        };
        max_segment.set_range(0, h, -right_column_width);
        while left_it < node_left_side.len() && node_left_side[left_it].x < x {
            left_it += 1;
        }
        while left_it < node_left_side.len() && node_left_side[left_it].x == x {
            let side = node_left_side[left_it];
            max_segment.set_range(
                side.y0 as usize,
                side.y1 as usize + 1,
                side.size - right_column_width,
            );
            left_it += 1;
        }
        while si < segments.len() && segments[si].x == x {
            let segment = segments[si];
            let mut y = max_segment.range_max(segment.y0 as usize, segment.y1 as usize + 1);
            y += if segment.spacing_override != 0 {
                segment.spacing_override as i32
            } else {
                segment_spacing
            };
            max_segment.set_range(segment.y0 as usize, segment.y1 as usize + 1, y);
            edge_offsets[segment.edge_index] = y;
            si += 1;
        }
        let mut right_side_middle = max_segment.range_max(0, h).max(0);
        right_side_middle =
            right_side_middle.max(edge_column_width[x as usize] - middle_width - segment_spacing);
        for segment in &segments[first_right_side_segment..si] {
            edge_offsets[segment.edge_index] =
                middle_width + (right_side_middle - edge_offsets[segment.edge_index])
                    + segment_spacing;
        }
        edge_column_width[x as usize] = middle_width + segment_spacing + right_side_middle;
    }
}

/// Re-center segments within their edge column where there is slack.
///
/// Segments in one column are split into runs of transitively touching spans (the active count
/// returning to zero marks a gap); each run shifts as a whole towards the middle of the channel.
/// Segments already outside the channel sit between blocks and stay put, since moving them could
/// push them into a block.
fn center_edges(
    segment_offsets: &mut [i32],
    edge_column_width: &[i32],
    segments: &[EdgeSegment],
    min_spacing: i32,
) {
    #[derive(Debug, Clone, Copy)]
    struct Event {
        x: i32,
        y: i32,
        index: usize,
        start: bool,
    }

    let mut events: Vec<Event> = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        let offset = segment_offsets[segment.edge_index];
        if offset >= 0 && offset <= edge_column_width[segment.x as usize] {
            events.push(Event {
                x: segment.x,
                y: segment.y0,
                index: segment.edge_index,
                start: true,
            });
            events.push(Event {
                x: segment.x,
                y: segment.y1,
                index: segment.edge_index,
                start: false,
            });
        }
    }
    // Start events before end events at equal positions, so the active count only hits zero at a
    // real gap between runs.
    events.sort_by(|a, b| {
        if a.x != b.x {
            return a.x.cmp(&b.x);
        }
        if a.y != b.y {
            return a.y.cmp(&b.y);
        }
        match (a.start, b.start) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    });

    let mut i = 0usize;
    while i < events.len() {
        let chunk_start = i;
        i += 1;
        let mut active_segment_count = 1;
        let mut chunk_width = 0;
        while active_segment_count > 0 {
            active_segment_count += if events[i].start { 1 } else { -1 };
            chunk_width = chunk_width.max(segment_offsets[events[i].index]);
            i += 1;
        }
        // The leftmost offset already includes padding on the left, mirror it on the right.
        chunk_width += min_spacing;

        let column = events[chunk_start].x as usize;
        let spacing = (edge_column_width[column].max(min_spacing) - chunk_width) / 2;
        for event in &events[chunk_start..i] {
            if event.start {
                segment_offsets[event.index] += spacing;
            }
        }
    }
}

/// Remap sparse span coordinates to a dense `0..n` range; returns `n`. The horizontal pass needs
/// this because its spans are pixel positions produced by the vertical pass.
fn compress_coordinates(
    segments: &mut [EdgeSegment],
    left_sides: &mut [NodeSide],
    right_sides: &mut [NodeSide],
) -> usize {
    let mut positions: Vec<i32> = Vec::with_capacity((segments.len() + left_sides.len()) * 2);
    for segment in segments.iter() {
        positions.push(segment.y0);
        positions.push(segment.y1);
    }
    for side in left_sides.iter() {
        positions.push(side.y0);
        positions.push(side.y1);
    }
    // y0/y1 in right_sides match left_sides.
    positions.sort_unstable();
    positions.dedup();

    let position_to_index = |position: i32| -> i32 {
        positions
            .binary_search(&position)
            .expect("span endpoint missing from compressed positions") as i32
    };
    for segment in segments.iter_mut() {
        segment.y0 = position_to_index(segment.y0);
        segment.y1 = position_to_index(segment.y1);
    }
    debug_assert_eq!(left_sides.len(), right_sides.len());
    for (left, right) in left_sides.iter_mut().zip(right_sides.iter_mut()) {
        left.y0 = position_to_index(left.y0);
        left.y1 = position_to_index(left.y1);
        right.y0 = left.y0;
        right.y1 = left.y1;
    }
    positions.len()
}

/// Recompute row heights and column widths once edge-column widths are final: each block's
/// half-width no longer includes the share taken by its center edge column.
fn adjust_column_widths(state: &mut LayoutState, blocks: &FxHashMap<BlockId, Block>) {
    state.row_height = vec![0; state.rows];
    state.column_width = vec![0; state.columns];
    for &id in &state.block_ids {
        let node = &state.grid_blocks[&id];
        let block = &blocks[&id];
        let row = node.row as usize;
        let col = node.col as usize;
        state.row_height[row] = state.row_height[row].max(block.height);
        let edge_width = state.edge_column_width[col + 1];
        let column_width = (block.width - edge_width) / 2;
        state.column_width[col] = state.column_width[col].max(column_width);
        state.column_width[col + 1] = state.column_width[col + 1].max(column_width);
    }
}
