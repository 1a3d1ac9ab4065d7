//! Pool-allocated singly-linked lists with O(1) append and split.
//!
//! Subtree shape profiles are merged and split at high frequency during placement. Storing the
//! `(value, next)` records in one arena and addressing them by integer handles keeps ownership
//! explicit and makes splicing two lists a constant-time pointer rewrite. Lists produced by
//! [`ListPool::split_tail`] share their tail with the source list; the placement pass only ever
//! reads a list after the lists it was spliced from are dead, so the sharing is never observable.

use serde::Serialize;

/// Position within a list. The null handle doubles as the end-of-list marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListIter(u32);

impl ListIter {
    pub fn is_end(self) -> bool {
        self.0 == 0
    }
}

/// Handle to a list stored in a [`ListPool`]. An empty list is all-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct List {
    head: u32,
    tail: u32,
}

impl List {
    pub fn is_empty(self) -> bool {
        self.head == 0
    }
}

#[derive(Debug, Clone)]
struct Item<T> {
    value: T,
    next: u32,
}

#[derive(Debug, Clone)]
pub struct ListPool<T> {
    // items[0] is the null sentinel, never read through a valid handle.
    items: Vec<Item<T>>,
}

impl<T: Default> ListPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity + 1);
        items.push(Item {
            value: T::default(),
            next: 0,
        });
        Self { items }
    }

    /// Create a single-element list.
    pub fn make_list(&mut self, value: T) -> List {
        let index = self.items.len() as u32;
        self.items.push(Item { value, next: 0 });
        List {
            head: index,
            tail: index,
        }
    }

    /// Concatenate two lists. Either may be empty.
    pub fn append(&mut self, front: List, back: List) -> List {
        if front.is_empty() {
            return back;
        }
        if back.is_empty() {
            return front;
        }
        self.items[front.tail as usize].next = back.head;
        List {
            head: front.head,
            tail: back.tail,
        }
    }

    /// The list starting at `head` and sharing the rest of `list`. Returns the empty list when
    /// the iterator has reached the end.
    pub fn split_tail(&self, list: List, head: ListIter) -> List {
        if head.is_end() {
            return List::default();
        }
        List {
            head: head.0,
            tail: list.tail,
        }
    }

    pub fn head(&self, list: List) -> ListIter {
        ListIter(list.head)
    }

    pub fn next(&self, it: ListIter) -> ListIter {
        debug_assert!(!it.is_end(), "cannot advance the end iterator");
        ListIter(self.items[it.0 as usize].next)
    }

    pub fn get(&self, it: ListIter) -> &T {
        debug_assert!(!it.is_end(), "cannot read through the end iterator");
        &self.items[it.0 as usize].value
    }

    pub fn get_mut(&mut self, it: ListIter) -> &mut T {
        debug_assert!(!it.is_end(), "cannot write through the end iterator");
        &mut self.items[it.0 as usize].value
    }
}

impl<T: Default + Copy> ListPool<T> {
    /// Collect a list's values, front to back. Test and debugging helper.
    pub fn values(&self, list: List) -> Vec<T> {
        let mut out = Vec::new();
        let mut it = self.head(list);
        while !it.is_end() {
            out.push(*self.get(it));
            it = self.next(it);
        }
        out
    }
}
