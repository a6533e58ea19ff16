//! Domain types for the matching engine
//!
//! The order record, the trade record, and the rendered book view.
//! The ordering discipline that ranks orders within one side of a book
//! lives here as well, next to the data it orders.

use chrono::{DateTime, Duration, Utc};
use common::{OrderId, Side};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// Order
// ============================================================================

/// A limit order admitted to the engine.
///
/// `time` is stamped at engine admission, not at client send time, and is
/// the basis of time priority. `volume` strictly decreases through fills;
/// an order with zero volume is never present in a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub volume: u64,
    pub account: String,
    #[serde(with = "timestamp_micros")]
    pub time: DateTime<Utc>,
    pub expire_sec: u64,
}

impl Order {
    pub fn new(
        order_id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        price: f64,
        volume: u64,
        account: impl Into<String>,
        expire_sec: u64,
    ) -> Self {
        Self {
            order_id,
            symbol: symbol.into(),
            side,
            price,
            volume,
            account: account.into(),
            time: Utc::now(),
            expire_sec,
        }
    }

    /// Reduce volume after a fill
    pub fn fill(&mut self, volume: u64) {
        self.volume = self.volume.saturating_sub(volume);
    }

    /// True once the order has no volume left
    pub fn is_filled(&self) -> bool {
        self.volume == 0
    }

    /// Instant at which the order stops being matchable
    pub fn expires_at(&self) -> DateTime<Utc> {
        let secs = i64::try_from(self.expire_sec).unwrap_or(i64::MAX);
        Duration::try_seconds(secs)
            .and_then(|window| self.time.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// An order is valid while `time + expire_sec >= now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() >= now
    }

    /// Remaining validity as `H:MM:SS`, clamped at zero
    pub fn time_left(&self, now: DateTime<Utc>) -> String {
        let left = if self.is_valid_at(now) {
            (self.expires_at() - now).num_seconds().max(0)
        } else {
            0
        };
        format!("{}:{:02}:{:02}", left / 3600, (left % 3600) / 60, left % 60)
    }

    /// Total order within one side of a book. `Less` means `self` ranks
    /// closer to the top of that side than `other`.
    ///
    /// Price first (ask: lower is better, bid: higher is better), then the
    /// earlier admission time on both sides, then volume (bid: larger is
    /// better, ask: smaller is better), then the order id so that orders
    /// identical in all three keys still compare strictly.
    pub fn rank(&self, other: &Order, side: Side) -> Ordering {
        let by_key = match side {
            Side::Ask => OrderedFloat(self.price)
                .cmp(&OrderedFloat(other.price))
                .then_with(|| self.time.cmp(&other.time))
                .then_with(|| self.volume.cmp(&other.volume)),
            Side::Bid => OrderedFloat(other.price)
                .cmp(&OrderedFloat(self.price))
                .then_with(|| self.time.cmp(&other.time))
                .then_with(|| other.volume.cmp(&self.volume)),
        };
        by_key.then_with(|| self.order_id.cmp(&other.order_id))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{order_id: {}, symbol: {}, side: {}, price: {}, volume: {}, account: {}}}",
            self.order_id, self.symbol, self.side, self.price, self.volume, self.account
        )
    }
}

// ============================================================================
// Trade
// ============================================================================

/// A matched execution between an incoming and a resting order.
///
/// Both order snapshots are taken before the fill is subtracted, so the
/// record shows the volumes the two orders brought into the match. The
/// executed price is always the resting order's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub accepted_order: Order,
    pub matched_order: Order,
    pub volume_filled: u64,
    pub final_price: f64,
    pub price_gap: f64,
    #[serde(with = "timestamp_micros")]
    pub time: DateTime<Utc>,
}

// ============================================================================
// Book view
// ============================================================================

/// One rendered row of a book view
#[derive(Debug, Clone, Serialize)]
pub struct BookRow {
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub volume: u64,
    pub order_id: OrderId,
    pub created: String,
    pub time_left: String,
}

impl BookRow {
    pub fn from_order(order: &Order, now: DateTime<Utc>) -> Self {
        Self {
            symbol: order.symbol.clone(),
            side: order.side,
            price: order.price,
            volume: order.volume,
            order_id: order.order_id,
            created: order.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            time_left: order.time_left(now),
        }
    }
}

/// Top-of-book snapshot for one symbol.
///
/// Asks are listed worst to best and bids best to worst, so the rendered
/// book reads top to bottom like a conventional depth display with the
/// touch in the middle.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub symbol: String,
    pub asks: Vec<BookRow>,
    pub bids: Vec<BookRow>,
}

impl fmt::Display for BookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_row(f: &mut fmt::Formatter<'_>, row: &BookRow) -> fmt::Result {
            writeln!(
                f,
                "{:<8} {:<4} {:>10.2} {:>8} {:>10}  {:<19} {:>9}",
                row.symbol,
                row.side.to_string(),
                row.price,
                row.volume,
                row.order_id.to_string(),
                row.created,
                row.time_left
            )
        }

        writeln!(
            f,
            "{:<8} {:<4} {:>10} {:>8} {:>10}  {:<19} {:>9}",
            "Symbol", "Side", "Price", "Volume", "Order ID", "Created", "Time Left"
        )?;
        for row in &self.asks {
            write_row(f, row)?;
        }
        writeln!(f, "{}", "-".repeat(76))?;
        for row in &self.bids {
            write_row(f, row)?;
        }
        Ok(())
    }
}

// ============================================================================
// Timestamp format
// ============================================================================

/// ISO-8601 with microsecond precision, the format of every timestamp the
/// engine writes into trade records and order snapshots.
pub mod timestamp_micros {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
