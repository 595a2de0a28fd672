use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn reservation_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::book_slot).get(handlers::search_reservations))
        .route("/mine", get(handlers::get_my_reservations))
        .route("/token/{token_number}", get(handlers::get_reservation_by_token))
        .route("/{reservation_id}", get(handlers::get_reservation))
        .route("/{reservation_id}/cancel", post(handlers::cancel_reservation))
        .route("/{reservation_id}/complete", post(handlers::complete_reservation))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
