//! Axum-based HTTP server for the prompt2img gateway.
//!
//! # Components
//!
//! - `handlers`: the per-request gateway state machine plus health and
//!   metrics endpoints.
//! - `middleware`: request ID layers.
//! - `routes`: the router and shared application state.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
