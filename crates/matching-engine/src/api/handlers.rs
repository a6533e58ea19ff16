//! HTTP API handlers for the matching engine

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use common::{OrderId, Side};

use crate::domain::{BookView, Order, Trade};
use crate::engine::MatchingEngine;
use crate::error::EngineError;

/// Shared state for the API
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<MatchingEngine>,
    /// Book view depth used when a request gives no size
    pub view_depth: usize,
}

impl ApiState {
    pub fn new(engine: Arc<MatchingEngine>, view_depth: usize) -> Self {
        Self { engine, view_depth }
    }
}

/// Request to submit an order
#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub order_id: u64,
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub volume: u64,
    pub account: String,
    #[serde(default)]
    pub expire_sec: u64,
}

/// Response for order submission
#[derive(Debug, serde::Serialize)]
pub struct SubmitOrderResponse {
    pub success: bool,
    pub order: Option<Order>,
    pub message: Option<String>,
}

/// Response for order cancellation
#[derive(Debug, serde::Serialize)]
pub struct CancelOrderResponse {
    pub success: bool,
    pub order: Option<Order>,
    pub message: Option<String>,
}

/// Query parameters for book views
#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    pub size: Option<usize>,
    #[serde(default)]
    pub include_expired: bool,
}

/// Response for a book view
#[derive(Debug, serde::Serialize)]
pub struct BookViewResponse {
    pub success: bool,
    pub view: Option<BookView>,
    pub message: Option<String>,
}

/// Response for the trade history
#[derive(Debug, serde::Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub trades: Vec<Trade>,
}

/// Submit an order to the matching engine
pub async fn submit_order(
    State(state): State<ApiState>,
    Json(req): Json<SubmitOrderRequest>,
) -> Json<SubmitOrderResponse> {
    let order = Order::new(
        OrderId::new(req.order_id),
        req.symbol,
        req.side,
        req.price,
        req.volume,
        req.account,
        req.expire_sec,
    );

    match state.engine.accept_order(order) {
        Ok(accepted) => Json(SubmitOrderResponse {
            success: true,
            order: Some(accepted),
            message: None,
        }),
        Err(e) => Json(SubmitOrderResponse {
            success: false,
            order: None,
            message: Some(e.to_string()),
        }),
    }
}

/// Cancel an order by id
pub async fn cancel_order(
    State(state): State<ApiState>,
    Path(order_id): Path<u64>,
) -> Json<CancelOrderResponse> {
    match state.engine.cancel_order(OrderId::new(order_id)) {
        Ok(cancelled) => Json(CancelOrderResponse {
            success: true,
            order: Some(cancelled),
            message: None,
        }),
        Err(e) => Json(CancelOrderResponse {
            success: false,
            order: None,
            message: Some(e.to_string()),
        }),
    }
}

/// Get the book view for a symbol
pub async fn get_book(
    State(state): State<ApiState>,
    Path(symbol): Path<String>,
    Query(params): Query<BookQuery>,
) -> Json<BookViewResponse> {
    let size = params.size.or(Some(state.view_depth));
    match state.engine.view_orders(&symbol, params.include_expired, size) {
        Ok(view) => Json(BookViewResponse {
            success: true,
            view: Some(view),
            message: None,
        }),
        Err(e) => Json(BookViewResponse {
            success: false,
            view: None,
            message: Some(e.to_string()),
        }),
    }
}

/// Get the book view for a symbol, rendered as a plain-text table
pub async fn get_book_table(
    State(state): State<ApiState>,
    Path(symbol): Path<String>,
    Query(params): Query<BookQuery>,
) -> (StatusCode, String) {
    let size = params.size.or(Some(state.view_depth));
    match state.engine.view_orders(&symbol, params.include_expired, size) {
        Ok(view) => (StatusCode::OK, view.to_string()),
        Err(e @ EngineError::UnknownSymbol(_)) => (StatusCode::NOT_FOUND, format!("{e}\n")),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}\n")),
    }
}

/// Get the full trade history
pub async fn get_history(State(state): State<ApiState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        success: true,
        trades: state.engine.view_history(),
    })
}

/// Health check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "matching-engine"
    }))
}
