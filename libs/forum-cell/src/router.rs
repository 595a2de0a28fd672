use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn forum_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/categories", get(handlers::list_categories))
        .route("/posts", get(handlers::list_posts));

    let protected_routes = Router::new()
        .route("/posts", post(handlers::create_post))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
