//! Order book for a single symbol
//!
//! A pair of priority maps, one per side, each behind its own lock.
//! Holding one side's lock says nothing about the other; callers that
//! need both take them one at a time.

use common::Side;
use parking_lot::Mutex;

use crate::priority_map::PriorityMap;

/// The two queues of one symbol
#[derive(Debug)]
pub struct Book {
    symbol: String,
    ask: Mutex<PriorityMap>,
    bid: Mutex<PriorityMap>,
}

impl Book {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ask: Mutex::new(PriorityMap::new(Side::Ask)),
            bid: Mutex::new(PriorityMap::new(Side::Bid)),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The queue for one side of this book
    pub fn side(&self, side: Side) -> &Mutex<PriorityMap> {
        match side {
            Side::Ask => &self.ask,
            Side::Bid => &self.bid,
        }
    }

    /// Resting order counts as (asks, bids); takes each lock briefly
    pub fn depth(&self) -> (usize, usize) {
        let asks = self.ask.lock().len();
        let bids = self.bid.lock().len();
        (asks, bids)
    }
}
