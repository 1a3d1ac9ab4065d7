use blockgrid::data::trees::{PointSetMinTree, RangeAssignMaxTree};

#[test]
fn point_set_min_tree_reads_back_point_values() {
    let mut tree = PointSetMinTree::new(5, -1);
    tree.set(2, 4);
    tree.set(4, 1);
    assert_eq!(tree.value_at(0), -1);
    assert_eq!(tree.value_at(2), 4);
    assert_eq!(tree.value_at(4), 1);
}

#[test]
fn right_most_less_than_scans_towards_the_left() {
    let mut tree = PointSetMinTree::new(6, -1);
    for i in 0..6 {
        tree.set(i, 10);
    }
    tree.set(1, 2);
    tree.set(3, 5);

    assert_eq!(tree.right_most_less_than(5, 6), Some(3));
    assert_eq!(tree.right_most_less_than(5, 3), Some(1));
    assert_eq!(tree.right_most_less_than(2, 6), Some(1));
    // The threshold is strict.
    assert_eq!(tree.right_most_less_than(5, 2), None);
}

#[test]
fn left_most_less_than_scans_towards_the_right() {
    let mut tree = PointSetMinTree::new(6, -1);
    for i in 0..6 {
        tree.set(i, 10);
    }
    tree.set(1, 2);
    tree.set(3, 5);

    assert_eq!(tree.left_most_less_than(0, 6), Some(1));
    assert_eq!(tree.left_most_less_than(2, 6), Some(3));
    assert_eq!(tree.left_most_less_than(4, 6), None);
}

#[test]
fn queries_ignore_padding_past_the_length() {
    // Capacity rounds up to a power of two; the padding leaves must never be reported.
    let mut tree = PointSetMinTree::new(5, -1);
    for i in 0..5 {
        tree.set(i, 10);
    }
    assert_eq!(tree.left_most_less_than(0, 5), None);
    assert_eq!(tree.right_most_less_than(4, -5), None);
}

#[test]
fn range_assign_max_tree_assigns_and_queries() {
    let mut tree = RangeAssignMaxTree::new(8, 0);
    tree.set_range(0, 8, 0);
    tree.set_range(2, 5, 7);
    assert_eq!(tree.range_max(0, 8), 7);
    assert_eq!(tree.range_max(0, 2), 0);
    assert_eq!(tree.range_max(4, 5), 7);
    assert_eq!(tree.range_max(5, 8), 0);
}

#[test]
fn later_assignments_overwrite_earlier_ones() {
    let mut tree = RangeAssignMaxTree::new(8, 0);
    tree.set_range(0, 8, 9);
    tree.set_range(1, 7, 3);
    assert_eq!(tree.range_max(1, 7), 3);
    assert_eq!(tree.range_max(0, 8), 9);
    tree.set_range(0, 8, -2);
    assert_eq!(tree.range_max(3, 4), -2);
}

#[test]
fn assignments_can_be_negative_baselines() {
    let mut tree = RangeAssignMaxTree::new(5, i32::MIN);
    tree.set_range(0, 5, -40);
    tree.set_range(1, 3, 10);
    assert_eq!(tree.range_max(0, 5), 10);
    assert_eq!(tree.range_max(3, 5), -40);
}

#[test]
fn single_point_ranges_work() {
    let mut tree = RangeAssignMaxTree::new(3, 0);
    tree.set_range(0, 3, 0);
    tree.set_range(1, 2, 5);
    assert_eq!(tree.range_max(1, 2), 5);
    assert_eq!(tree.range_max(0, 1), 0);
    assert_eq!(tree.range_max(2, 3), 0);
}
