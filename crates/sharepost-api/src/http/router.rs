//! Axum router configuration with middleware.
//!
//! Every route lives under `/plugins/{PLUGIN_ID}`, the path the host forwards
//! plugin traffic to. Routes under `/api/v1` require the host-provided user
//! id header.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use sharepost_core::dialog::route::PLUGIN_ID;
use sharepost_core::host::api::HostApi;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<H: HostApi + 'static>(state: AppState<H>) -> Router {
    let api_routes = Router::new().route("/share", post(handlers::share::submit_share::<H>));

    let plugin_routes = Router::new()
        .route("/", get(handlers::health::installed))
        .route("/health", get(handlers::health::health_check))
        .route("/actions/share", post(handlers::action::trigger_share::<H>))
        .route(
            "/hooks/message_will_be_posted",
            post(handlers::hook::message_will_be_posted::<H>),
        )
        .nest("/api/v1", api_routes);

    Router::new()
        .nest(&format!("/plugins/{PLUGIN_ID}"), plugin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
