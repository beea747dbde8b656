//! Median Cost Window
//!
//! Maintains the last `W` values of a stream split at the median into two
//! indexed heaps, and answers the window's *leveling cost* in O(1):
//!
//! ```text
//! price = Σ |x - m|   over the window,  m = median
//!       = (m·|lower| - Σlower) + (Σupper - m·|upper|)
//! ```
//!
//! ## Layout
//! - `lower`: max-heap, holds the `ceil(W/2)` smallest values, root = median
//! - `upper`: min-heap, holds the rest
//! - `ring`: arrival-order ledger, lets eviction find the oldest value inside
//!   whichever heap currently holds it
//!
//! ## Balance
//! After every insert/remove:
//! - `lower.len() == min(target, len)`
//! - `max(lower) <= min(upper)`
//!
//! The price formula is only correct while both hold exactly, and only once
//! the window is full: before that the lower half may hold more than half of
//! the live values.
//!
//! ## Protocol
//! Fill to `W` with [`MedianCostWindow::insert`], then alternate
//! [`MedianCostWindow::remove`] / [`MedianCostWindow::insert`]
//! (or use [`MedianCostWindow::push`], which does both).

use tracing::trace;

use crate::error::WindowError;
use crate::indexed_heap::{IndexedHeap, Order};
use crate::slot_ring::{Side, SlotRing};

#[derive(Clone, Debug)]
pub struct MedianCostWindow {
    /// Size the lower half grows to: `ceil(W/2)`.
    target: usize,

    lower: IndexedHeap,
    upper: IndexedHeap,
    ring: SlotRing,
}

impl MedianCostWindow {
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        let ring = SlotRing::new(capacity)?;
        let target = capacity.div_ceil(2);

        Ok(Self {
            target,
            lower: IndexedHeap::new(Order::Max, Side::Lower, target),
            upper: IndexedHeap::new(Order::Min, Side::Upper, capacity - target),
            ring,
        })
    }

    /// Add the newest value. Fails if the window already holds `W` values.
    pub fn insert(&mut self, value: i64) -> Result<(), WindowError> {
        let slot = self.ring.insert(value)?;

        if self.lower.len() < self.target {
            self.lower.insert(value, slot, &mut self.ring);
            return Ok(());
        }

        match self.lower.peek() {
            Some(median) if value < median => {
                // `value` belongs below the median but the lower half is full:
                // hand the current median over to the upper half.
                let displaced = self.lower.remove_at(0, &mut self.ring)?;
                self.lower.insert(value, slot, &mut self.ring);
                self.upper
                    .insert(displaced.value, displaced.slot, &mut self.ring);

                trace!(value, displaced = displaced.value, "median displaced upward");
            }
            _ => self.upper.insert(value, slot, &mut self.ring),
        }

        Ok(())
    }

    /// Evict the oldest value (by arrival) and return it.
    pub fn remove(&mut self) -> Result<i64, WindowError> {
        let link = self.ring.remove()?;

        let evicted = match link.side {
            Side::Upper => self.upper.remove_at(link.index, &mut self.ring)?,
            Side::Lower => {
                let evicted = self.lower.remove_at(link.index, &mut self.ring)?;

                // Refill the lower half from the bottom of the upper half so the
                // lower root stays the median.
                if !self.upper.is_empty() {
                    let promoted = self.upper.remove_at(0, &mut self.ring)?;
                    self.lower
                        .insert(promoted.value, promoted.slot, &mut self.ring);

                    trace!(promoted = promoted.value, "median refilled from upper half");
                }

                evicted
            }
        };

        Ok(evicted.value)
    }

    /// Slide the window by one value.
    ///
    /// Evicts the oldest value first when the window is full and returns it.
    /// The window only answers [`MedianCostWindow::price`] and
    /// [`MedianCostWindow::median`] once `W` values have been pushed.
    pub fn push(&mut self, value: i64) -> Result<Option<i64>, WindowError> {
        let evicted = if self.is_full() {
            Some(self.remove()?)
        } else {
            None
        };

        self.insert(value)?;
        Ok(evicted)
    }

    /// Minimum total absolute deviation of the window from a single value.
    ///
    /// Defined only for a full window: `EmptyWindow` when nothing is held,
    /// `WindowNotFull` while fewer than `W` values are live.
    pub fn price(&self) -> Result<i128, WindowError> {
        let median = i128::from(self.median()?);
        let lower_len = self.lower.len() as i128;
        let upper_len = self.upper.len() as i128;

        Ok(median * lower_len - self.lower.sum() + self.upper.sum() - median * upper_len)
    }

    /// Lower median of a full window.
    ///
    /// While filling, the lower half holds up to `ceil(W/2)` values, which can
    /// be more than half of what is live, so its root is not the median yet.
    pub fn median(&self) -> Result<i64, WindowError> {
        if self.is_empty() {
            return Err(WindowError::EmptyWindow);
        }
        if !self.is_full() {
            return Err(WindowError::WindowNotFull {
                len: self.len(),
                capacity: self.capacity(),
            });
        }
        self.lower.peek().ok_or(WindowError::EmptyWindow)
    }

    /// Window values in arrival order, oldest first.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.ring.values()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }
}
