use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn booking_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_booking).get(handlers::list_bookings))
        .route("/preview-slots", post(handlers::preview_slots))
        .route(
            "/{booking_id}",
            get(handlers::get_booking)
                .put(handlers::update_booking)
                .delete(handlers::delete_booking),
        )
        .route("/{booking_id}/slots", get(handlers::get_booking_slots))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
