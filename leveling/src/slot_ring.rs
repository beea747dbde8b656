//! Slot Ring (arrival-order ledger)
//!
//! A fixed-capacity circular buffer that identifies every live element of the
//! window by its arrival position (its *slot*) and records where that element
//! currently lives inside the two heaps (its *link*).
//!
//! The heaps move entries around on every sift, so the link stored here is the
//! only stable way to find "the element that arrived first" when it has to be
//! evicted. The ring never reallocates after construction.

use crate::error::WindowError;

/// Arrival position of an element inside the ring.
pub type SlotId = usize;

/// Which half of the window an element belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Max-ordered half, holds the median at its root.
    #[default]
    Lower,
    /// Min-ordered half.
    Upper,
}

/// Current location of an element: heap side + array index inside that heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Link {
    pub side: Side,
    pub index: usize,
}

impl Link {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

#[derive(Clone, Debug)]
pub struct SlotRing {
    values: Vec<i64>,
    links: Vec<Link>,

    /// Read cursor: slot of the oldest live element.
    head: usize,

    /// Write cursor: slot handed out by the next insert.
    tail: usize,

    /// Live slots (inserts minus removes).
    len: usize,
}

impl SlotRing {
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }

        Ok(Self {
            values: vec![0; capacity],
            links: vec![Link::default(); capacity],
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    /// Claim the next slot for `value` and return it.
    ///
    /// The caller must record a link for the slot (via [`SlotRing::set_link`])
    /// before the slot is removed again.
    pub fn insert(&mut self, value: i64) -> Result<SlotId, WindowError> {
        if self.is_full() {
            return Err(WindowError::RingFull {
                capacity: self.capacity(),
            });
        }

        let slot = self.tail;
        self.values[slot] = value;
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;

        Ok(slot)
    }

    /// Release the oldest slot and return the link it held.
    pub fn remove(&mut self) -> Result<Link, WindowError> {
        if self.is_empty() {
            return Err(WindowError::RingEmpty);
        }

        let link = self.links[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;

        Ok(link)
    }

    pub fn set_link(&mut self, slot: SlotId, link: Link) {
        self.links[slot] = link;
    }

    /// Exchange the links of two slots whose heap entries just traded places.
    pub fn swap_links(&mut self, a: SlotId, b: SlotId) {
        self.links.swap(a, b);
    }

    #[cfg(test)]
    pub(crate) fn link(&self, slot: SlotId) -> Link {
        self.links[slot]
    }

    #[cfg(test)]
    pub(crate) fn value(&self, slot: SlotId) -> i64 {
        self.values[slot]
    }

    /// Value of the element that the next [`SlotRing::remove`] will evict.
    #[cfg(test)]
    pub(crate) fn oldest(&self) -> Option<i64> {
        (!self.is_empty()).then(|| self.values[self.head])
    }

    /// Live slots in arrival order, oldest first.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.len).map(move |i| (self.head + i) % self.capacity())
    }

    /// Live values in arrival order, oldest first.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.slots().map(move |slot| self.values[slot])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(SlotRing::new(0).unwrap_err(), WindowError::ZeroCapacity);
    }

    #[test]
    fn slots_are_handed_out_in_arrival_order_and_wrap() {
        let mut ring = SlotRing::new(3).unwrap();

        assert_eq!(ring.insert(10).unwrap(), 0);
        assert_eq!(ring.insert(20).unwrap(), 1);
        assert_eq!(ring.insert(30).unwrap(), 2);
        assert!(ring.is_full());

        ring.remove().unwrap();
        assert_eq!(ring.insert(40).unwrap(), 0, "write cursor wraps to slot 0");
        assert_eq!(ring.values().collect::<Vec<_>>(), vec![20, 30, 40]);
    }

    #[test]
    fn remove_returns_links_fifo_regardless_of_value() {
        let mut ring = SlotRing::new(3).unwrap();

        for (i, v) in [9, 1, 5].into_iter().enumerate() {
            let slot = ring.insert(v).unwrap();
            ring.set_link(slot, Link::new(Side::Upper, i * 10));
        }

        assert_eq!(ring.oldest(), Some(9));
        assert_eq!(ring.remove().unwrap(), Link::new(Side::Upper, 0));
        assert_eq!(ring.remove().unwrap(), Link::new(Side::Upper, 10));
        assert_eq!(ring.remove().unwrap(), Link::new(Side::Upper, 20));
        assert!(ring.is_empty());
        assert_eq!(ring.oldest(), None);
    }

    #[test]
    fn swap_links_only_touches_the_two_slots() {
        let mut ring = SlotRing::new(3).unwrap();
        for i in 0..3 {
            let slot = ring.insert(i as i64).unwrap();
            ring.set_link(slot, Link::new(Side::Lower, i));
        }

        ring.swap_links(0, 2);

        assert_eq!(ring.link(0), Link::new(Side::Lower, 2));
        assert_eq!(ring.link(1), Link::new(Side::Lower, 1));
        assert_eq!(ring.link(2), Link::new(Side::Lower, 0));
    }

    #[test]
    fn insert_into_full_ring_fails_instead_of_overwriting() {
        let mut ring = SlotRing::new(2).unwrap();
        ring.insert(1).unwrap();
        ring.insert(2).unwrap();

        assert_eq!(
            ring.insert(3).unwrap_err(),
            WindowError::RingFull { capacity: 2 }
        );
        assert_eq!(ring.values().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn remove_from_empty_ring_fails() {
        let mut ring = SlotRing::new(2).unwrap();
        assert_eq!(ring.remove().unwrap_err(), WindowError::RingEmpty);

        ring.insert(1).unwrap();
        ring.remove().unwrap();
        assert_eq!(ring.remove().unwrap_err(), WindowError::RingEmpty);
    }
}
