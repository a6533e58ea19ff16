//! Graceful shutdown utilities using CancellationToken
//!
//! Shutdown coordination uses `tokio_util::sync::CancellationToken`:
//! tokens can be cloned and shared across tasks, and cancellation can be
//! checked without consuming anything.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Hands out the cancellation token that stops the server.
///
/// ```ignore
/// let shutdown = ShutdownController::with_ctrl_c();
/// server.run(shutdown.token()).await?;
/// ```
#[derive(Clone)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Create a controller whose token is cancelled when Ctrl+C arrives
    pub fn with_ctrl_c() -> Self {
        let controller = Self::new();
        let token = controller.token.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown...");
                    token.cancel();
                }
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                }
            }
        });

        controller
    }

    /// A clone of the main token
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_clones_share_cancellation() {
        let controller = ShutdownController::new();
        let token = controller.token();
        assert!(!token.is_cancelled());

        controller.token().cancel();

        assert!(token.is_cancelled());
        assert!(controller.token().is_cancelled());
    }
}
