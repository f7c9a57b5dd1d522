//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: picks and opens the customer store
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use mechanic_shop_infra::CustomerStore;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around an already-opened store.
pub fn build_app(store: Arc<dyn CustomerStore>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(store))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
