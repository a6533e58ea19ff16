//! Order matching core for Crossbook
//!
//! This crate implements a continuous double auction over a set of
//! registered symbols.
//!
//! # Features
//!
//! - Price-time priority matching per symbol
//! - O(log n) cancellation by order id via an id-indexed heap
//! - Lazy expiry of stale orders
//! - Append-only trade history with pre-fill order snapshots
//! - Per-symbol, per-side locking; safe to call from parallel threads
//!
//! # Architecture
//!
//! Each registered symbol owns a [`book::Book`]: two [`priority_map::PriorityMap`]s,
//! a min-top ask queue and a max-top bid queue, each behind its own lock.
//! The [`engine::MatchingEngine`] admits orders, drains the opposite side
//! while the incoming price crosses its top, and rests residual volume on
//! the order's own side. The two side locks are never held at once.
//!
//! # Example
//!
//! ```rust
//! use common::{OrderId, Side};
//! use matching_engine::{MatchingEngine, Order};
//!
//! let engine = MatchingEngine::with_symbols(["MSFT"]);
//!
//! let ask = Order::new(OrderId::new(1), "MSFT", Side::Ask, 180.0, 5, "Trader_A", 600);
//! let bid = Order::new(OrderId::new(2), "MSFT", Side::Bid, 185.0, 2, "Trader_B", 600);
//!
//! engine.accept_order(ask).unwrap();
//! engine.accept_order(bid).unwrap();
//!
//! assert_eq!(engine.view_history().len(), 1);
//! ```

pub mod book;
pub mod domain;
pub mod engine;
pub mod error;
pub mod history;
pub mod metrics;
pub mod priority_map;

#[cfg(feature = "api")]
pub mod api;

pub use book::Book;
pub use domain::{BookRow, BookView, Order, Trade};
pub use engine::MatchingEngine;
pub use error::{EngineError, EngineResult};
pub use history::TradeLog;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use priority_map::{PriorityMap, PriorityMapError};
