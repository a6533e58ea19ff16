//! Append-only trade history
//!
//! Every fill the engine produces lands here, in execution order.
//! Entries are never mutated or reordered; the log lives for the
//! lifetime of the engine that owns it.

use parking_lot::Mutex;

use crate::domain::Trade;

/// Process-wide trade log
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: Mutex<Vec<Trade>>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self {
            trades: Mutex::new(Vec::new()),
        }
    }

    /// Append one trade to the end of the log
    pub fn append(&self, trade: Trade) {
        self.trades.lock().push(trade);
    }

    /// Chronological copy of the full log
    pub fn snapshot(&self) -> Vec<Trade> {
        self.trades.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.trades.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.lock().is_empty()
    }

    /// The log as one JSON document per trade, in order
    pub fn render(&self) -> String {
        let trades = self.snapshot();
        if trades.is_empty() {
            return "No transactions found\n".to_string();
        }
        let mut out = String::new();
        for trade in &trades {
            if let Ok(line) = serde_json::to_string_pretty(trade) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}
