//! API module
//!
//! Contains HTTP request handlers and the router that wires them together.

pub mod contact;
pub mod health;
pub mod hire;
pub mod messages;
pub mod middleware;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        // Submissions
        .route("/contact/", post(contact::submit_contact))
        .route("/hire-requests", post(hire::submit_hire_request))
        // Listing
        .route("/api/messages/", get(messages::list_messages))
        .route("/messages/", get(messages::list_messages))
        .route("/messages-page/", get(messages::messages_page))
        .route("/api/hire-requests/", get(hire::list_hire_requests))
        // Health check
        .route("/api/health", get(health::health_check))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
