//! Route definitions for the API.

use std::sync::Arc;

use axum::{Router, routing::post};
use netgate::DeviceAdapter;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the router with every endpoint bound to `adapter`.
pub fn create_router<A: DeviceAdapter>(adapter: Arc<A>) -> Router {
    Router::new()
        .route("/network_interaction", post(handlers::network_interaction::<A>))
        .route("/configure_loopback", post(handlers::configure_loopback::<A>))
        .route("/delete_loopback", post(handlers::delete_loopback::<A>))
        .route("/device_interfaces", post(handlers::device_interfaces::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { adapter })
}
