//! HTTP server infrastructure for Crossbook
//!
//! A thin lifecycle layer over axum: the [`Server`] trait gives every
//! listener the same run/observe interface, and shutdown coordination
//! uses `CancellationToken` from `tokio_util`, so cancelling the
//! controller's token stops the listener gracefully.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, Server, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> server::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 8080);
//!     let server = HttpServer::new(config, my_router());
//!
//!     server.run_with_ctrl_c().await
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Listener configuration
//! - [`traits`] - `Server` and `ServerExt` traits
//! - [`http`] - HTTP server using Axum
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod http;
pub mod shutdown;
pub mod traits;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use http::HttpServer;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
