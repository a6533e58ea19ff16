//! Priority map: the ordered container under each side of a book
//!
//! A binary heap over [`Order`]s whose direction is chosen by the owning
//! side (min-top for asks, max-top for bids), fused with an id index so
//! any element can be located and removed by order id in O(log n).
//!
//! The heap array and the index move in lockstep: every swap, push, pop
//! and delete updates both, and the index stays bijective with the live
//! slots at all times.

use common::{OrderId, Side};
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::Order;

/// Errors from id-keyed heap operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriorityMapError {
    /// The id is already present in this queue
    #[error("order id {0} already present in queue")]
    DuplicateId(OrderId),

    /// The id is not present in this queue
    #[error("order id {0} not present in queue")]
    UnknownId(OrderId),
}

/// A heap of orders with O(log n) removal by id.
///
/// The comparator direction comes from the side the map was built for:
/// an ask map keeps the lowest-ranked key on top, a bid map the highest.
#[derive(Debug, Clone)]
pub struct PriorityMap {
    side: Side,
    slots: Vec<Order>,
    index: HashMap<OrderId, usize>,
}

impl PriorityMap {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Insert an order and sift it to its slot
    pub fn push(&mut self, order: Order) -> Result<(), PriorityMapError> {
        let id = order.order_id;
        if self.index.contains_key(&id) {
            return Err(PriorityMapError::DuplicateId(id));
        }
        self.slots.push(order);
        let last = self.slots.len() - 1;
        self.index.insert(id, last);
        self.sift_up(last);
        Ok(())
    }

    /// The top element, without removal
    pub fn peek(&self) -> Option<&Order> {
        self.slots.first()
    }

    /// Remove and return the top element
    pub fn pop(&mut self) -> Option<Order> {
        if self.slots.is_empty() {
            return None;
        }
        let last = self.slots.len() - 1;
        self.swap_slots(0, last);
        let order = self.slots.pop()?;
        self.index.remove(&order.order_id);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Some(order)
    }

    /// Remove an arbitrary element by id.
    ///
    /// The vacated slot is filled by the last element, which is then sifted
    /// in both directions; one of the two sifts is always a no-op.
    pub fn delete(&mut self, id: OrderId) -> Result<Order, PriorityMapError> {
        let slot = *self
            .index
            .get(&id)
            .ok_or(PriorityMapError::UnknownId(id))?;
        let last = self.slots.len() - 1;
        self.swap_slots(slot, last);
        let order = self
            .slots
            .pop()
            .ok_or(PriorityMapError::UnknownId(id))?;
        self.index.remove(&id);
        if slot < self.slots.len() {
            self.sift_up(slot);
            self.sift_down(slot);
        }
        Ok(order)
    }

    /// Snapshot of up to `n` top elements in priority order.
    ///
    /// Works on a copy of the backing array; the live structure is not
    /// touched. `None` returns every element.
    pub fn top_n(&self, n: Option<usize>) -> Vec<Order> {
        let take = n.unwrap_or(self.slots.len()).min(self.slots.len());
        let mut scratch = self.clone();
        let mut out = Vec::with_capacity(take);
        while out.len() < take {
            match scratch.pop() {
                Some(order) => out.push(order),
                None => break,
            }
        }
        out
    }

    /// True when the order at `a` ranks strictly above the order at `b`
    fn outranks(&self, a: usize, b: usize) -> bool {
        self.slots[a].rank(&self.slots[b], self.side) == Ordering::Less
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        let id_a = self.slots[a].order_id;
        let id_b = self.slots[b].order_id;
        self.index.insert(id_a, a);
        self.index.insert(id_b, b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.outranks(slot, parent) {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut best = slot;
            if left < self.slots.len() && self.outranks(left, best) {
                best = left;
            }
            if right < self.slots.len() && self.outranks(right, best) {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap_slots(slot, best);
            slot = best;
        }
    }

    /// Heap and index must agree slot-for-slot
    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.slots.len(), self.index.len());
        for (slot, order) in self.slots.iter().enumerate() {
            assert_eq!(self.index[&order.order_id], slot);
        }
        for slot in 1..self.slots.len() {
            let parent = (slot - 1) / 2;
            assert!(
                !self.outranks(slot, parent),
                "slot {slot} outranks its parent"
            );
        }
    }
}
