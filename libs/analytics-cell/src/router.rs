// =====================================================================================
// ANALYTICS CELL ROUTER
// =====================================================================================

use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{
    get_daily_bookings, get_dashboard, get_peak_hours, get_recent_bookings, get_service_distribution,
    get_summary,
};

pub fn analytics_routes(state: Arc<AppState>) -> Router {
    // Every route needs a session; admin checks happen per handler.
    Router::new()
        .route("/summary", get(get_summary))
        .route("/services", get(get_service_distribution))
        .route("/daily", get(get_daily_bookings))
        .route("/peak-hours", get(get_peak_hours))
        .route("/recent", get(get_recent_bookings))
        .route("/dashboard", get(get_dashboard))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
