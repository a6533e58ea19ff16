//! Matching engine error types

use common::OrderId;
use thiserror::Error;

/// Errors surfaced to callers of the engine.
///
/// Expired resting orders, cancellations of already-consumed orders and
/// non-crossing submissions are normal operation and are logged, not
/// errored.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The symbol was never registered
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// No order with this id in the engine
    #[error("order id {0} not found")]
    UnknownOrderId(OrderId),

    /// An order with this id was already admitted
    #[error("duplicate order id: {0}")]
    DuplicateOrderId(OrderId),

    /// A field failed validation at admission
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// Internal queue corruption; fatal for the request, not the engine
    #[error("order queue invariant violated: {0}")]
    QueueInvariant(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
