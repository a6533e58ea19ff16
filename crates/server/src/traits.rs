//! Server traits for polymorphic server handling
//!
//! The core [`Server`] trait gives every listener a consistent run and
//! observe interface; [`ServerExt`] adds the common spawn and Ctrl+C
//! patterns on top.

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Core server trait that all server implementations must implement.
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Returns the server's name for logging and identification
    fn name(&self) -> &str;

    /// Returns the address the server is bound to, if running
    fn address(&self) -> Option<SocketAddr>;

    /// Returns true if the server is currently running
    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// Implementations bind, accept connections until `shutdown` is
    /// cancelled, drain gracefully, and return `Ok(())` on clean exit.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}

/// Extension trait providing convenience methods for servers
pub trait ServerExt: Server + Sized {
    /// Spawn the server on a new task; returns the join handle and a
    /// token that triggers shutdown when cancelled
    fn spawn(self) -> (tokio::task::JoinHandle<Result<()>>, CancellationToken) {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let handle = tokio::spawn(async move { self.run(token_clone).await });
        (handle, token)
    }

    /// Run the server until Ctrl+C (SIGINT) triggers graceful shutdown
    fn run_with_ctrl_c(self) -> impl std::future::Future<Output = Result<()>> + Send {
        async move {
            let shutdown = crate::shutdown::ShutdownController::with_ctrl_c();
            self.run(shutdown.token()).await
        }
    }
}

// Blanket implementation for all Server types
impl<T: Server + Sized> ServerExt for T {}
