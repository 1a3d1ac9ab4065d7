use blockgrid::model::{Block, LayoutConfig, LayoutKind};
use blockgrid::state::LayoutState;
use blockgrid::{placement, rows, toposort};
use rustc_hash::FxHashMap;

fn graph(blocks: &[(u64, &[u64])]) -> FxHashMap<u64, Block> {
    blocks
        .iter()
        .map(|&(id, targets)| (id, Block::new(100, 50, targets.iter().copied())))
        .collect()
}

fn placed(blocks: &FxHashMap<u64, Block>, entry: u64, config: &LayoutConfig) -> LayoutState {
    let mut state = LayoutState::new(blocks);
    let order = toposort::run(&mut state, blocks, entry);
    rows::assign_rows(&mut state, &order);
    rows::select_tree(&mut state);
    rows::find_merge_points(&mut state);
    placement::compute_block_placement(&order, &mut state, config);
    state
}

fn assert_no_overlap(state: &LayoutState, ids: &[u64]) {
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            let (ga, gb) = (state.grid(a), state.grid(b));
            if ga.row == gb.row {
                assert!(
                    (ga.col - gb.col).abs() >= 2,
                    "blocks {a} and {b} overlap in row {}",
                    ga.row
                );
            }
        }
    }
}

#[test]
fn chain_stacks_in_a_single_column() {
    let blocks = graph(&[(0, &[1]), (1, &[2]), (2, &[])]);
    let state = placed(&blocks, 0, &LayoutConfig::default());

    for &id in &[0u64, 1, 2] {
        assert_eq!(state.grid(id).col, 0);
        assert_eq!(state.grid(id).row, id as i32);
    }
}

#[test]
fn diamond_centers_parent_and_merge_between_the_branches() {
    let blocks = graph(&[(0, &[1, 2]), (1, &[3]), (2, &[3]), (3, &[])]);
    let state = placed(&blocks, 0, &LayoutConfig::default());

    assert_eq!(state.grid(1).col, 0);
    assert_eq!(state.grid(2).col, 2);
    assert_eq!(state.grid(0).col, 1);
    assert_eq!(state.grid(3).col, 1);
}

#[test]
fn diamond_shape_is_stable_across_layout_kinds() {
    let blocks = graph(&[(0, &[1, 2]), (1, &[3]), (2, &[3]), (3, &[])]);
    for kind in [LayoutKind::Narrow, LayoutKind::Medium, LayoutKind::Wide] {
        let state = placed(&blocks, 0, &LayoutConfig::new(kind));
        assert_eq!(state.grid(0).col, 1, "{kind:?}");
        assert_eq!(state.grid(3).col, 1, "{kind:?}");
        assert_no_overlap(&state, &[0, 1, 2, 3]);
    }
}

#[test]
fn columns_are_never_negative() {
    let blocks = graph(&[
        (0, &[1, 2]),
        (1, &[3, 4]),
        (2, &[5]),
        (3, &[6]),
        (4, &[6]),
        (5, &[6]),
        (6, &[0]),
    ]);
    let state = placed(&blocks, 0, &LayoutConfig::default());

    let ids = [0u64, 1, 2, 3, 4, 5, 6];
    for &id in &ids {
        assert!(state.grid(id).col >= 0, "block {id} at negative column");
    }
    assert_no_overlap(&state, &ids);
}

#[test]
fn sibling_subtrees_do_not_overlap() {
    // Left subtree is deep, right subtree is wide.
    let blocks = graph(&[
        (0, &[1, 2]),
        (1, &[3]),
        (3, &[4]),
        (4, &[]),
        (2, &[5, 6, 7]),
        (5, &[]),
        (6, &[]),
        (7, &[]),
    ]);
    for kind in [LayoutKind::Narrow, LayoutKind::Medium, LayoutKind::Wide] {
        let state = placed(&blocks, 0, &LayoutConfig::new(kind));
        assert_no_overlap(&state, &[0, 1, 2, 3, 4, 5, 6, 7]);
    }
}

#[test]
fn roots_are_placed_side_by_side() {
    let blocks = graph(&[(0, &[]), (1, &[]), (2, &[])]);
    let state = placed(&blocks, 0, &LayoutConfig::default());

    assert_eq!(state.grid(0).col, 0);
    assert_eq!(state.grid(1).col, 2);
    assert_eq!(state.grid(2).col, 4);
}

#[test]
fn disconnected_component_sits_next_to_the_entry_tree() {
    let blocks = graph(&[(0, &[1]), (1, &[]), (8, &[9]), (9, &[])]);
    let state = placed(&blocks, 0, &LayoutConfig::default());

    assert_no_overlap(&state, &[0, 1, 8, 9]);
    assert_eq!(state.grid(0).row, 0);
    assert_eq!(state.grid(8).row, 0);
    assert_ne!(state.grid(0).col, state.grid(8).col);
}
