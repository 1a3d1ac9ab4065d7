//! Cycle removal and topological ordering in one DFS.
//!
//! A single non-recursive DFS marks each block unvisited / on-stack / done. Edges into on-stack
//! blocks are loop edges and are dropped; everything else is kept as a DAG edge. The traversal
//! starts at the entry block so that an entry inside a loop still ends up at the top of the
//! drawing, then restarts from every unvisited block to cover unreachable components.

use rustc_hash::FxHashMap;

use crate::model::{Block, BlockId};
use crate::state::LayoutState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Visit {
    #[default]
    NotVisited,
    InStack,
    Done,
}

/// Fill `dag_edge` for every grid block and return block ids in post-order of completion, which
/// is a reverse topological order of the DAG subgraph.
pub fn run(
    state: &mut LayoutState,
    blocks: &FxHashMap<BlockId, Block>,
    entry: BlockId,
) -> Vec<BlockId> {
    let mut order: Vec<BlockId> = Vec::with_capacity(state.block_ids.len());
    let mut visited: FxHashMap<BlockId, Visit> = FxHashMap::default();
    visited.reserve(state.block_ids.len());
    // The DFS must stay iterative; graphs can have thousands of blocks.
    let mut stack: Vec<(BlockId, usize)> = Vec::new();

    let mut dfs_fragment = |first: BlockId,
                            visited: &mut FxHashMap<BlockId, Visit>,
                            state: &mut LayoutState| {
        visited.insert(first, Visit::InStack);
        stack.push((first, 0));
        while let Some(&(v, edge_index)) = stack.last() {
            let edges = &blocks[&v].edges;
            if edge_index < edges.len() {
                stack.last_mut().expect("stack is non-empty").1 += 1;
                let target = edges[edge_index].target;
                match visited.get(&target).copied().unwrap_or_default() {
                    Visit::NotVisited => {
                        visited.insert(target, Visit::InStack);
                        stack.push((target, 0));
                        state.grid_mut(v).dag_edge.push(target);
                    }
                    Visit::Done => {
                        // Forward or cross edge, keeps the subgraph acyclic.
                        state.grid_mut(v).dag_edge.push(target);
                    }
                    Visit::InStack => {
                        // Loop edge, dropped from the DAG.
                    }
                }
            } else {
                stack.pop();
                visited.insert(v, Visit::Done);
                order.push(v);
            }
        }
    };

    dfs_fragment(entry, &mut visited, state);
    let ids = state.block_ids.clone();
    for id in ids {
        if visited.get(&id).copied().unwrap_or_default() == Visit::NotVisited {
            dfs_fragment(id, &mut visited, state);
        }
    }

    order
}
