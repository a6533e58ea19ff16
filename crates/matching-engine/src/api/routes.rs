//! HTTP routes for the matching engine API

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::*;

/// Create the matching engine router
///
/// Routes:
/// - POST   /api/v1/orders                  - Submit order
/// - DELETE /api/v1/orders/:order_id        - Cancel order
/// - GET    /api/v1/books/:symbol           - Book view (JSON)
/// - GET    /api/v1/books/:symbol/table     - Book view (plain-text table)
/// - GET    /api/v1/history                 - Full trade history
/// - GET    /api/v1/matching/health         - Health check
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/matching/health", get(health))
        .route("/api/v1/orders", post(submit_order))
        .route("/api/v1/orders/:order_id", delete(cancel_order))
        .route("/api/v1/books/:symbol", get(get_book))
        .route("/api/v1/books/:symbol/table", get(get_book_table))
        .route("/api/v1/history", get(get_history))
        .with_state(state)
}
