//! Order-statistics trees used by edge routing.
//!
//! [`PointSetMinTree`] answers "nearest column whose blocked-until row is below a threshold" for
//! the sweep-line main-column search. [`RangeAssignMaxTree`] answers "maximum occupied offset in a
//! span" for segment packing. Both are rebuilt per routing pass and hold no state across sweeps.

/// Point-assign tree with directional "first value less than" queries.
#[derive(Debug, Clone)]
pub struct PointSetMinTree {
    len: usize,
    cap: usize,
    tree: Vec<i32>,
}

impl PointSetMinTree {
    pub fn new(len: usize, initial: i32) -> Self {
        let cap = len.next_power_of_two().max(1);
        Self {
            len,
            cap,
            tree: vec![initial; 2 * cap],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn set(&mut self, position: usize, value: i32) {
        debug_assert!(position < self.len);
        let mut i = self.cap + position;
        self.tree[i] = value;
        while i > 1 {
            i /= 2;
            self.tree[i] = self.tree[2 * i].min(self.tree[2 * i + 1]);
        }
    }

    pub fn value_at(&self, position: usize) -> i32 {
        debug_assert!(position < self.len);
        self.tree[self.cap + position]
    }

    /// Rightmost position `<= position` whose value is strictly less than `value`.
    pub fn right_most_less_than(&self, position: usize, value: i32) -> Option<usize> {
        self.rightmost(1, 0, self.cap, position.min(self.len - 1) + 1, value)
    }

    /// Leftmost position `>= position` whose value is strictly less than `value`.
    pub fn left_most_less_than(&self, position: usize, value: i32) -> Option<usize> {
        self.leftmost(1, 0, self.cap, position, value)
    }

    fn rightmost(&self, node: usize, l: usize, r: usize, hi: usize, value: i32) -> Option<usize> {
        if l >= hi || self.tree[node] >= value {
            return None;
        }
        if r - l == 1 {
            return Some(l);
        }
        let mid = (l + r) / 2;
        self.rightmost(2 * node + 1, mid, r, hi, value)
            .or_else(|| self.rightmost(2 * node, l, mid, hi, value))
    }

    fn leftmost(&self, node: usize, l: usize, r: usize, lo: usize, value: i32) -> Option<usize> {
        if r <= lo || l >= self.len || self.tree[node] >= value {
            return None;
        }
        if r - l == 1 {
            return Some(l);
        }
        let mid = (l + r) / 2;
        self.leftmost(2 * node, l, mid, lo, value)
            .or_else(|| self.leftmost(2 * node + 1, mid, r, lo, value))
    }
}

/// Lazy range-assign / range-max tree over a fixed index range.
#[derive(Debug, Clone)]
pub struct RangeAssignMaxTree {
    cap: usize,
    tree: Vec<i32>,
    pending: Vec<Option<i32>>,
}

impl RangeAssignMaxTree {
    pub fn new(len: usize, initial: i32) -> Self {
        let cap = len.next_power_of_two().max(1);
        Self {
            cap,
            tree: vec![initial; 2 * cap],
            pending: vec![None; 2 * cap],
        }
    }

    /// Assign `value` to every position in `[from, to)`.
    pub fn set_range(&mut self, from: usize, to: usize, value: i32) {
        if from >= to {
            return;
        }
        self.assign(1, 0, self.cap, from, to.min(self.cap), value);
    }

    /// Maximum value in `[from, to)`.
    pub fn range_max(&self, from: usize, to: usize) -> i32 {
        debug_assert!(from < to);
        self.query(1, 0, self.cap, from, to.min(self.cap))
    }

    fn assign(&mut self, node: usize, l: usize, r: usize, from: usize, to: usize, value: i32) {
        if to <= l || r <= from {
            return;
        }
        if from <= l && r <= to {
            self.tree[node] = value;
            self.pending[node] = Some(value);
            return;
        }
        self.push_down(node);
        let mid = (l + r) / 2;
        self.assign(2 * node, l, mid, from, to, value);
        self.assign(2 * node + 1, mid, r, from, to, value);
        self.tree[node] = self.tree[2 * node].max(self.tree[2 * node + 1]);
    }

    fn query(&self, node: usize, l: usize, r: usize, from: usize, to: usize) -> i32 {
        if to <= l || r <= from {
            return i32::MIN;
        }
        if from <= l && r <= to {
            return self.tree[node];
        }
        if let Some(value) = self.pending[node] {
            // The whole subtree carries the pending assignment.
            return value;
        }
        let mid = (l + r) / 2;
        self.query(2 * node, l, mid, from, to)
            .max(self.query(2 * node + 1, mid, r, from, to))
    }

    fn push_down(&mut self, node: usize) {
        if let Some(value) = self.pending[node].take() {
            for child in [2 * node, 2 * node + 1] {
                self.tree[child] = value;
                self.pending[child] = Some(value);
            }
        }
    }
}
