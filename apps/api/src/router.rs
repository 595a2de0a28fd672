use std::sync::Arc;

use axum::{
    Json, Router,
    routing::get,
};
use serde_json::json;

use analytics_cell::router::analytics_routes;
use auth_cell::router::auth_routes;
use booking_cell::router::booking_routes;
use forum_cell::router::forum_routes;
use notice_cell::router::notice_routes;
use reservation_cell::router::reservation_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Connecto API is running!" }))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .nest("/auth", auth_routes(state.clone()))
        .nest("/bookings", booking_routes(state.clone()))
        .nest("/reservations", reservation_routes(state.clone()))
        .nest("/notices", notice_routes(state.clone()))
        .nest("/forum", forum_routes(state.clone()))
        .nest("/analytics", analytics_routes(state))
}
