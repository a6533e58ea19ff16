//! HTTP API for the matching engine

pub mod handlers;
pub mod routes;

pub use handlers::ApiState;
pub use routes::create_router;
