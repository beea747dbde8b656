//! Indexed binary heap with arbitrary-position deletion.
//!
//! Eviction from the window happens by arrival order, not by heap order, so the
//! heap must be able to delete any entry given its array index. Every time an
//! entry changes position its owning slot's link in the [`SlotRing`] is updated,
//! which is how the window finds the index to delete.

use crate::error::WindowError;
use crate::slot_ring::{Link, Side, SlotId, SlotRing};

/// Heap ordering policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Root holds the maximum.
    Max,
    /// Root holds the minimum.
    Min,
}

impl Order {
    /// `true` if `a` may sit above `b` in the heap.
    #[inline]
    pub fn holds(self, a: i64, b: i64) -> bool {
        match self {
            Order::Max => a >= b,
            Order::Min => a <= b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapEntry {
    pub value: i64,
    pub slot: SlotId,
}

#[derive(Clone, Debug)]
pub struct IndexedHeap {
    order: Order,

    /// Tag written into the ring links of the entries this heap owns.
    side: Side,

    entries: Vec<HeapEntry>,

    /// Running sum of all contained values.
    sum: i128,
}

impl IndexedHeap {
    pub fn new(order: Order, side: Side, capacity: usize) -> Self {
        Self {
            order,
            side,
            entries: Vec::with_capacity(capacity),
            sum: 0,
        }
    }

    /// Add `value`, owned by `slot`, and record its position in `ring`.
    pub fn insert(&mut self, value: i64, slot: SlotId, ring: &mut SlotRing) {
        let index = self.entries.len();
        self.entries.push(HeapEntry { value, slot });
        ring.set_link(slot, Link::new(self.side, index));
        self.sum += i128::from(value);

        self.sift_up(index, ring);
    }

    /// Delete the entry at `index` and return it.
    ///
    /// The last entry is moved into the hole. It came from a different subtree,
    /// so it may belong above or below its new position: if it beats its new
    /// parent it is sifted up, otherwise down.
    pub fn remove_at(
        &mut self,
        index: usize,
        ring: &mut SlotRing,
    ) -> Result<HeapEntry, WindowError> {
        let len = self.entries.len();
        if index >= len {
            return Err(WindowError::HeapIndexOutOfRange { index, len });
        }

        let last = len - 1;
        self.swap_entries(index, last, ring);

        let removed = self.entries[last];
        self.entries.truncate(last);
        self.sum -= i128::from(removed.value);

        if index < self.entries.len() {
            if index != 0 && !self.in_order(parent(index), index) {
                self.sift_up(index, ring);
            } else {
                self.sift_down(index, ring);
            }
        }

        Ok(removed)
    }

    /// Root value: the maximum for [`Order::Max`], the minimum for [`Order::Min`].
    pub fn peek(&self) -> Option<i64> {
        self.entries.first().map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> i128 {
        self.sum
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> Order {
        self.order
    }

    #[cfg(test)]
    pub(crate) fn side(&self) -> Side {
        self.side
    }

    /// Backing array in heap layout.
    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[HeapEntry] {
        &self.entries
    }

    fn sift_up(&mut self, mut pos: usize, ring: &mut SlotRing) {
        while pos != 0 {
            let up = parent(pos);
            if self.in_order(up, pos) {
                break;
            }
            self.swap_entries(up, pos, ring);
            pos = up;
        }
    }

    fn sift_down(&mut self, mut pos: usize, ring: &mut SlotRing) {
        let len = self.entries.len();

        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.in_order(right, left) {
                right
            } else {
                left
            };

            if self.in_order(pos, child) {
                break;
            }
            self.swap_entries(pos, child, ring);
            pos = child;
        }
    }

    /// Swap two entries and keep their slots' links pointing at them.
    fn swap_entries(&mut self, a: usize, b: usize, ring: &mut SlotRing) {
        if a == b {
            return;
        }
        ring.swap_links(self.entries[a].slot, self.entries[b].slot);
        self.entries.swap(a, b);
    }

    #[inline]
    fn in_order(&self, upper: usize, lower: usize) -> bool {
        self.order
            .holds(self.entries[upper].value, self.entries[lower].value)
    }
}

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}
