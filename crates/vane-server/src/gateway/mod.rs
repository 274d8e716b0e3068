//! HTTP gateway (Axum) for headline scoring.
//!
//! Two routes: `GET /status` for liveness and `POST /score_headlines` for
//! the scoring contract.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::score_headlines_handler;
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/score_headlines", post(score_headlines_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse { status: "OK" })
}
