use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn notice_routes(state: Arc<AppState>) -> Router {
    // Citizens read notices without signing in.
    let public_routes = Router::new()
        .route("/", get(handlers::list_notices))
        .route("/{notice_id}", get(handlers::get_notice));

    let protected_routes = Router::new()
        .route("/", post(handlers::create_notice))
        .route("/{notice_id}", delete(handlers::delete_notice))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
