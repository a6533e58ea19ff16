//! Observability infrastructure for Crossbook
//!
//! Structured logging via tracing, initialised once at process start.
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("crossbook", LogFormat::Pretty, "info")?;
//! tracing::info!("Service started");
//! ```

pub mod logging;

pub use logging::{init_logging, LogFormat};
