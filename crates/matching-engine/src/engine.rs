//! Core matching engine
//!
//! Continuous double auction over per-symbol books under price-time
//! priority. Each book carries one lock per side and the engine never
//! holds both at once: an incoming order first drains the opposite side
//! under that side's lock, releases it, and only then takes its own
//! side's lock to rest any residual volume. Cancellation takes exactly
//! one side lock. The order index (`db`) and the trade history are
//! serialised independently and are never held together with a side
//! lock; a side lock may be held while appending to the history.
//!
//! Expiry is lazy: an expired order sits in its queue until it surfaces
//! at the top during matching, where it is popped and discarded, or is
//! filtered out of book views.

use chrono::Utc;
use common::{OrderId, Side};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::book::Book;
use crate::domain::{BookRow, BookView, Order, Trade};
use crate::error::{EngineError, EngineResult};
use crate::history::TradeLog;
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::priority_map::PriorityMap;

/// The matching engine.
///
/// Owns the set of books, the order index and the append-only trade
/// history. All state lives for the lifetime of the engine; nothing is
/// persisted.
pub struct MatchingEngine {
    /// Books per registered symbol
    books: RwLock<HashMap<String, Arc<Book>>>,
    /// Every admitted order, including fully filled ones until cancelled
    db: Mutex<HashMap<OrderId, Order>>,
    /// Append-only trade history
    history: TradeLog,
    /// Running counters
    metrics: EngineMetrics,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
            db: Mutex::new(HashMap::new()),
            history: TradeLog::new(),
            metrics: EngineMetrics::new(),
        }
    }

    /// Create an engine with the given symbols already registered
    pub fn with_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let engine = Self::new();
        engine.load_symbols(symbols);
        engine
    }

    /// Register symbols for trading.
    ///
    /// Registering a symbol that already exists resets both of its books
    /// to empty; previously admitted orders stay in the order index and
    /// can still be cancelled. Symbols not named here are untouched.
    pub fn load_symbols<I>(&self, symbols: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut books = self.books.write();
        for symbol in symbols {
            let symbol = symbol.into();
            info!(%symbol, "symbol registered");
            books.insert(symbol.clone(), Arc::new(Book::new(symbol)));
        }
    }

    /// Registered symbols, in no particular order
    pub fn symbols(&self) -> Vec<String> {
        self.books.read().keys().cloned().collect()
    }

    /// Snapshot of one admitted order, if the id is known
    pub fn find_order(&self, order_id: OrderId) -> Option<Order> {
        self.db.lock().get(&order_id).cloned()
    }

    /// Running counter values
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn book(&self, symbol: &str) -> EngineResult<Arc<Book>> {
        self.books
            .read()
            .get(symbol)
            .cloned()
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))
    }

    /// Admit an order, match it against the opposite side and rest any
    /// residual volume on its own side.
    ///
    /// Returns the admitted snapshot (time stamped, volume as submitted).
    /// A fully consumed order is not inserted into its own side; it stays
    /// in the order index as a volume-zero record.
    pub fn accept_order(&self, mut order: Order) -> EngineResult<Order> {
        if !(order.price.is_finite() && order.price > 0.0) {
            return Err(EngineError::InvalidOrder(format!(
                "price must be a positive number, got {}",
                order.price
            )));
        }
        if order.volume == 0 {
            return Err(EngineError::InvalidOrder("volume must be positive".into()));
        }
        if order.order_id.raw() == 0 {
            return Err(EngineError::InvalidOrder("order id must be positive".into()));
        }

        let book = self.book(&order.symbol)?;

        // admission time, the basis of time priority
        order.time = Utc::now();
        {
            let mut db = self.db.lock();
            if db.contains_key(&order.order_id) {
                return Err(EngineError::DuplicateOrderId(order.order_id));
            }
            db.insert(order.order_id, order.clone());
        }
        let accepted = order.clone();

        info!(
            order_id = %order.order_id,
            symbol = %order.symbol,
            side = %order.side,
            price = order.price,
            volume = order.volume,
            "order accepted"
        );
        self.metrics.orders_accepted.increment();

        let other = order.side.opposite();
        let touched = {
            let mut queue = book.side(other).lock();
            self.match_loop(&mut order, &mut queue)?
        };

        // refresh index copies with post-match volumes; entries may have
        // been cancelled concurrently, so only update what is still there
        if !touched.is_empty() {
            let mut db = self.db.lock();
            for (id, residual) in &touched {
                if let Some(entry) = db.get_mut(id) {
                    entry.volume = *residual;
                }
            }
            if let Some(entry) = db.get_mut(&order.order_id) {
                entry.volume = order.volume;
            }
        }

        if order.volume > 0 {
            let mut queue = book.side(order.side).lock();
            queue
                .push(order)
                .map_err(|e| EngineError::QueueInvariant(e.to_string()))?;
        }

        Ok(accepted)
    }

    /// Drain the opposite queue while the incoming order crosses its top.
    ///
    /// Expired tops are discarded as they surface. Returns the resting
    /// orders that were filled, with their residual volumes, so the order
    /// index can be refreshed after the lock is released.
    fn match_loop(
        &self,
        order: &mut Order,
        queue: &mut PriorityMap,
    ) -> EngineResult<Vec<(OrderId, u64)>> {
        let mut touched = Vec::new();
        loop {
            let (expired, crosses) = match queue.peek() {
                None => break,
                Some(top) => {
                    if !top.is_valid_at(Utc::now()) {
                        (true, false)
                    } else {
                        let crosses = match order.side {
                            Side::Ask => order.price <= top.price,
                            Side::Bid => order.price >= top.price,
                        };
                        (false, crosses)
                    }
                }
            };

            if expired {
                if let Some(gone) = queue.pop() {
                    info!(
                        order_id = %gone.order_id,
                        symbol = %gone.symbol,
                        side = %gone.side,
                        "resting order expired, discarded"
                    );
                    self.metrics.orders_expired.increment();
                }
                continue;
            }
            if !crosses {
                // the top is the best the other side has; nothing further
                // down can cross either
                break;
            }

            let mut resting = match queue.pop() {
                Some(resting) => resting,
                None => break,
            };
            let filled = order.volume.min(resting.volume);
            let trade = Trade {
                accepted_order: order.clone(),
                matched_order: resting.clone(),
                volume_filled: filled,
                final_price: resting.price,
                price_gap: (order.price - resting.price).abs(),
                time: Utc::now(),
            };
            order.fill(filled);
            resting.fill(filled);

            info!(
                accepted = %trade.accepted_order.order_id,
                matched = %trade.matched_order.order_id,
                volume_filled = filled,
                final_price = trade.final_price,
                "orders matched"
            );
            self.history.append(trade);
            self.metrics.trades_executed.increment();
            self.metrics.volume_filled.add(filled);
            touched.push((resting.order_id, resting.volume));

            if resting.volume > 0 {
                // residual keeps its admission time and with it its queue
                // priority; the volume key may have changed, so re-push
                queue
                    .push(resting)
                    .map_err(|e| EngineError::QueueInvariant(e.to_string()))?;
            }
            if order.is_filled() {
                break;
            }
        }
        Ok(touched)
    }

    /// Cancel an order by id.
    ///
    /// The id may legitimately be absent from its queue: the order was
    /// fully filled, or expired and discarded, after admission. That is a
    /// benign cancel; the index record is removed and returned as the
    /// snapshot.
    pub fn cancel_order(&self, order_id: OrderId) -> EngineResult<Order> {
        let recorded = self
            .db
            .lock()
            .get(&order_id)
            .cloned()
            .ok_or(EngineError::UnknownOrderId(order_id))?;

        let book = self.book(&recorded.symbol)?;
        let removed = {
            let mut queue = book.side(recorded.side).lock();
            queue.delete(order_id).ok()
        };
        self.db.lock().remove(&order_id);
        self.metrics.orders_cancelled.increment();

        match removed {
            Some(live) => {
                info!(order_id = %order_id, symbol = %live.symbol, "order cancelled");
                Ok(live)
            }
            None => {
                debug!(
                    order_id = %order_id,
                    "cancel target no longer resting, index record removed"
                );
                Ok(recorded)
            }
        }
    }

    /// Top-of-book snapshot for one symbol.
    ///
    /// Asks come back worst to best, bids best to worst. Each side's lock
    /// is taken on its own, ask before bid; the two halves may therefore
    /// reflect slightly different instants, which is fine for a depth
    /// display. Expired entries are filtered out unless asked for.
    pub fn view_orders(
        &self,
        symbol: &str,
        include_expired: bool,
        size: Option<usize>,
    ) -> EngineResult<BookView> {
        let book = self.book(symbol)?;
        let ask_top = book.side(Side::Ask).lock().top_n(size);
        let bid_top = book.side(Side::Bid).lock().top_n(size);

        let now = Utc::now();
        let asks = ask_top
            .iter()
            .rev()
            .filter(|order| include_expired || order.is_valid_at(now))
            .map(|order| BookRow::from_order(order, now))
            .collect();
        let bids = bid_top
            .iter()
            .filter(|order| include_expired || order.is_valid_at(now))
            .map(|order| BookRow::from_order(order, now))
            .collect();

        Ok(BookView {
            symbol: symbol.to_string(),
            asks,
            bids,
        })
    }

    /// Chronological copy of the trade history
    pub fn view_history(&self) -> Vec<Trade> {
        self.history.snapshot()
    }

    /// The trade history as one JSON document per trade
    pub fn render_history(&self) -> String {
        self.history.render()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::thread;
    use std::time::Duration;

    fn engine() -> MatchingEngine {
        MatchingEngine::with_symbols(["MSFT", "AAPL"])
    }

    fn order(id: u64, side: Side, price: f64, volume: u64) -> Order {
        Order::new(OrderId::new(id), "MSFT", side, price, volume, "Trader_A", 600)
    }

    fn row_keys(rows: &[BookRow]) -> Vec<(u64, u64)> {
        rows.iter().map(|r| (r.order_id.raw(), r.volume)).collect()
    }

    #[test]
    fn test_simple_cross_partial_fill() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Ask, 200.0, 3)).unwrap();
        engine.accept_order(order(3, Side::Bid, 185.0, 2)).unwrap();

        let trades = engine.view_history();
        assert_eq!(trades.len(), 1);
        let trade = &trades[0];
        assert_eq!(trade.accepted_order.order_id, OrderId::new(3));
        assert_eq!(trade.accepted_order.volume, 2);
        assert_eq!(trade.matched_order.order_id, OrderId::new(1));
        assert_eq!(trade.matched_order.volume, 5);
        assert_eq!(trade.volume_filled, 2);
        assert_eq!(trade.final_price, 180.0);
        assert_eq!(trade.price_gap, 5.0);

        // O1 rests with residual 3, O2 untouched, O3 fully consumed
        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&view.asks), vec![(2, 3), (1, 3)]);
        assert!(view.bids.is_empty());
        assert_eq!(engine.find_order(OrderId::new(3)).unwrap().volume, 0);
    }

    #[test]
    fn test_no_cross_rests_both_sides() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 200.0, 3)).unwrap();
        engine.accept_order(order(2, Side::Bid, 150.0, 1)).unwrap();

        assert!(engine.view_history().is_empty());
        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&view.asks), vec![(1, 3)]);
        assert_eq!(row_keys(&view.bids), vec![(2, 1)]);
        assert_eq!(view.asks.last().unwrap().price, 200.0);
        assert_eq!(view.bids.first().unwrap().price, 150.0);
    }

    #[test]
    fn test_lazy_expiry_at_top() {
        let engine = engine();
        let mut short_lived = order(1, Side::Ask, 170.0, 2);
        short_lived.expire_sec = 0;
        engine.accept_order(short_lived).unwrap();

        thread::sleep(Duration::from_millis(20));
        engine.accept_order(order(2, Side::Bid, 180.0, 1)).unwrap();

        // the expired ask was discarded, not traded against
        assert!(engine.view_history().is_empty());
        assert_eq!(engine.metrics().orders_expired, 1);
        let view = engine.view_orders("MSFT", true, None).unwrap();
        assert!(view.asks.is_empty());
        assert_eq!(row_keys(&view.bids), vec![(2, 1)]);
        assert_eq!(view.bids[0].price, 180.0);
    }

    #[test]
    fn test_expired_orders_filtered_from_views() {
        let engine = engine();
        let mut short_lived = order(1, Side::Ask, 170.0, 2);
        short_lived.expire_sec = 0;
        engine.accept_order(short_lived).unwrap();
        thread::sleep(Duration::from_millis(20));

        let hidden = engine.view_orders("MSFT", false, None).unwrap();
        assert!(hidden.asks.is_empty());
        let shown = engine.view_orders("MSFT", true, None).unwrap();
        assert_eq!(row_keys(&shown.asks), vec![(1, 2)]);
        assert_eq!(shown.asks[0].time_left, "0:00:00");
    }

    #[test]
    fn test_price_time_priority() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        thread::sleep(Duration::from_millis(2));
        engine.accept_order(order(2, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(3, Side::Bid, 180.0, 3)).unwrap();

        let trades = engine.view_history();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].matched_order.order_id, OrderId::new(1));
        assert_eq!(trades[0].volume_filled, 3);

        // O1 residual 2 keeps the top of the ask queue, O2 untouched
        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&view.asks), vec![(2, 5), (1, 2)]);
    }

    #[test]
    fn test_sweep_through_multiple_levels() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 170.0, 2)).unwrap();
        engine.accept_order(order(2, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(3, Side::Ask, 200.0, 3)).unwrap();
        engine.accept_order(order(4, Side::Bid, 185.0, 6)).unwrap();

        let trades = engine.view_history();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].matched_order.order_id, OrderId::new(1));
        assert_eq!(trades[0].volume_filled, 2);
        assert_eq!(trades[0].final_price, 170.0);
        assert_eq!(trades[1].matched_order.order_id, OrderId::new(2));
        assert_eq!(trades[1].volume_filled, 4);
        assert_eq!(trades[1].final_price, 180.0);

        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&view.asks), vec![(3, 3), (2, 1)]);
        assert!(view.bids.is_empty());
    }

    #[test]
    fn test_accepted_snapshot_is_post_stamp_pre_match() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        let accepted = engine.accept_order(order(2, Side::Bid, 185.0, 2)).unwrap();
        // the ack carries the submitted volume even though the order
        // was fully consumed by matching
        assert_eq!(accepted.volume, 2);
        assert_eq!(engine.find_order(OrderId::new(2)).unwrap().volume, 0);
    }

    #[test]
    fn test_duplicate_order_id_rejected() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        let result = engine.accept_order(order(1, Side::Bid, 185.0, 2));
        assert_matches!(result, Err(EngineError::DuplicateOrderId(id)) if id == OrderId::new(1));

        // nothing about the book changed
        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&view.asks), vec![(1, 5)]);
        assert!(view.bids.is_empty());
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let engine = engine();
        let stray = Order::new(OrderId::new(1), "GOOG", Side::Ask, 100.0, 1, "t", 600);
        assert_matches!(
            engine.accept_order(stray),
            Err(EngineError::UnknownSymbol(symbol)) if symbol == "GOOG"
        );
        assert_matches!(
            engine.view_orders("GOOG", false, None),
            Err(EngineError::UnknownSymbol(_))
        );
    }

    #[test]
    fn test_malformed_orders_rejected() {
        let engine = engine();
        assert_matches!(
            engine.accept_order(order(1, Side::Ask, 180.0, 0)),
            Err(EngineError::InvalidOrder(_))
        );
        assert_matches!(
            engine.accept_order(order(1, Side::Ask, -1.0, 5)),
            Err(EngineError::InvalidOrder(_))
        );
        assert_matches!(
            engine.accept_order(order(1, Side::Ask, f64::NAN, 5)),
            Err(EngineError::InvalidOrder(_))
        );
        assert_matches!(
            engine.accept_order(order(0, Side::Ask, 180.0, 5)),
            Err(EngineError::InvalidOrder(_))
        );
        assert!(engine.find_order(OrderId::new(1)).is_none());
    }

    #[test]
    fn test_cancel_restores_book() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 200.0, 3)).unwrap();
        let before = engine.view_orders("MSFT", false, None).unwrap();

        engine.accept_order(order(2, Side::Ask, 180.0, 5)).unwrap();
        let cancelled = engine.cancel_order(OrderId::new(2)).unwrap();
        assert_eq!(cancelled.volume, 5);

        let after = engine.view_orders("MSFT", false, None).unwrap();
        assert_eq!(row_keys(&before.asks), row_keys(&after.asks));
        assert_eq!(row_keys(&before.bids), row_keys(&after.bids));
        assert!(engine.find_order(OrderId::new(2)).is_none());
    }

    #[test]
    fn test_cancel_partially_filled_returns_residual() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Bid, 185.0, 2)).unwrap();

        let cancelled = engine.cancel_order(OrderId::new(1)).unwrap();
        assert_eq!(cancelled.volume, 3);
        let view = engine.view_orders("MSFT", false, None).unwrap();
        assert!(view.asks.is_empty());
    }

    #[test]
    fn test_cancel_fully_filled_is_benign() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Bid, 185.0, 5)).unwrap();

        // both sides fully consumed; the incoming never rested
        let cancelled = engine.cancel_order(OrderId::new(2)).unwrap();
        assert_eq!(cancelled.volume, 0);
        assert_matches!(
            engine.cancel_order(OrderId::new(2)),
            Err(EngineError::UnknownOrderId(_))
        );
    }

    #[test]
    fn test_cancel_unknown_id() {
        let engine = engine();
        assert_matches!(
            engine.cancel_order(OrderId::new(404)),
            Err(EngineError::UnknownOrderId(id)) if id == OrderId::new(404)
        );
    }

    #[test]
    fn test_view_is_idempotent() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 200.0, 3)).unwrap();
        engine.accept_order(order(2, Side::Bid, 150.0, 1)).unwrap();

        let first = engine.view_orders("MSFT", false, Some(5)).unwrap();
        let second = engine.view_orders("MSFT", false, Some(5)).unwrap();
        assert_eq!(row_keys(&first.asks), row_keys(&second.asks));
        assert_eq!(row_keys(&first.bids), row_keys(&second.bids));
    }

    #[test]
    fn test_view_respects_size() {
        let engine = engine();
        for id in 1..=5u64 {
            engine
                .accept_order(order(id, Side::Ask, 190.0 + id as f64, 1))
                .unwrap();
        }
        let view = engine.view_orders("MSFT", false, Some(2)).unwrap();
        // top two asks only, worst of the pair first
        assert_eq!(
            view.asks.iter().map(|r| r.price).collect::<Vec<_>>(),
            vec![192.0, 191.0]
        );
    }

    #[test]
    fn test_books_are_isolated_per_symbol() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        let apple = Order::new(OrderId::new(2), "AAPL", Side::Bid, 185.0, 2, "t", 600);
        engine.accept_order(apple).unwrap();

        // a crossing price on a different symbol never trades
        assert!(engine.view_history().is_empty());
        assert_eq!(
            engine.view_orders("AAPL", false, None).unwrap().bids.len(),
            1
        );
    }

    #[test]
    fn test_reload_symbol_resets_books() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.load_symbols(["MSFT"]);

        let view = engine.view_orders("MSFT", true, None).unwrap();
        assert!(view.asks.is_empty() && view.bids.is_empty());
        // the index record survives the reset; cancelling it is benign
        assert_eq!(engine.cancel_order(OrderId::new(1)).unwrap().volume, 5);
    }

    #[test]
    fn test_fill_conservation() {
        let engine = engine();
        let submissions = [
            (1u64, Side::Ask, 200.0, 3u64),
            (2, Side::Ask, 180.0, 5),
            (3, Side::Bid, 170.0, 4),
            (4, Side::Bid, 185.0, 5),
            (5, Side::Bid, 250.0, 4),
        ];
        let mut initial_total = 0u64;
        for (id, side, price, volume) in submissions {
            initial_total += volume;
            engine.accept_order(order(id, side, price, volume)).unwrap();
        }

        let filled_total: u64 = engine
            .view_history()
            .iter()
            .map(|t| t.volume_filled)
            .sum();
        let remaining_total: u64 = (1..=5u64)
            .filter_map(|id| engine.find_order(OrderId::new(id)))
            .map(|o| o.volume)
            .sum();

        // every fill consumes volume on both sides
        assert_eq!(initial_total - remaining_total, 2 * filled_total);
        assert_eq!(filled_total, 8);
    }

    #[test]
    fn test_history_is_append_only() {
        let engine = engine();
        let mut last = engine.view_history().len();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Bid, 185.0, 2)).unwrap();
        assert!(engine.view_history().len() >= last);
        last = engine.view_history().len();
        engine.cancel_order(OrderId::new(1)).unwrap();
        engine.accept_order(order(3, Side::Bid, 185.0, 2)).unwrap();
        assert!(engine.view_history().len() >= last);
    }

    #[test]
    fn test_cancel_accept_race_has_one_outcome() {
        for _ in 0..20 {
            let engine = Arc::new(MatchingEngine::with_symbols(["MSFT"]));
            engine.accept_order(order(1, Side::Bid, 150.0, 1)).unwrap();

            let canceller = {
                let engine = Arc::clone(&engine);
                thread::spawn(move || engine.cancel_order(OrderId::new(1)))
            };
            let submitter = {
                let engine = Arc::clone(&engine);
                thread::spawn(move || engine.accept_order(order(2, Side::Ask, 150.0, 1)))
            };

            canceller.join().unwrap().unwrap();
            submitter.join().unwrap().unwrap();

            let trades = engine.view_history();
            let view = engine.view_orders("MSFT", true, None).unwrap();
            assert!(view.bids.is_empty());
            match trades.len() {
                // cancel won: no trade, the ask rests
                0 => assert_eq!(row_keys(&view.asks), vec![(2, 1)]),
                // accept won: one trade, the ask was consumed
                1 => assert!(view.asks.is_empty()),
                n => panic!("expected at most one trade, got {n}"),
            }
        }
    }

    #[test]
    fn test_snapshots_stay_ordered_under_concurrent_inserts() {
        let engine = Arc::new(MatchingEngine::with_symbols(["MSFT"]));

        let writer = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..200u64 {
                    let price = 100.0 + (i % 50) as f64;
                    engine
                        .accept_order(order(1000 + i, Side::Bid, price, 1))
                        .unwrap();
                }
            })
        };

        for _ in 0..100 {
            let view = engine.view_orders("MSFT", true, Some(3)).unwrap();
            let prices: Vec<f64> = view.bids.iter().map(|r| r.price).collect();
            assert!(
                prices.windows(2).all(|w| w[0] >= w[1]),
                "bids out of order: {prices:?}"
            );
            for row in &view.bids {
                let id = row.order_id.raw();
                assert!((1000..1200).contains(&id), "unknown order id {id}");
            }
        }

        writer.join().unwrap();
        assert_eq!(
            engine.view_orders("MSFT", true, None).unwrap().bids.len(),
            200
        );
    }

    #[test]
    fn test_metrics_track_engine_activity() {
        let engine = engine();
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Bid, 185.0, 2)).unwrap();
        engine.cancel_order(OrderId::new(1)).unwrap();

        let snapshot = engine.metrics();
        assert_eq!(snapshot.orders_accepted, 2);
        assert_eq!(snapshot.trades_executed, 1);
        assert_eq!(snapshot.volume_filled, 2);
        assert_eq!(snapshot.orders_cancelled, 1);
    }

    #[test]
    fn test_render_history_serialises_trades() {
        let engine = engine();
        assert_eq!(engine.render_history(), "No transactions found\n");
        engine.accept_order(order(1, Side::Ask, 180.0, 5)).unwrap();
        engine.accept_order(order(2, Side::Bid, 185.0, 2)).unwrap();
        let rendered = engine.render_history();
        assert!(rendered.contains("\"volume_filled\": 2"));
        assert!(rendered.contains("\"final_price\": 180.0"));
    }
}
