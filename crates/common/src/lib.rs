//! Common types for Crossbook
//!
//! This crate provides the shared domain types used across
//! all Crossbook crates.

pub mod types;

pub use types::{OrderId, Side};
