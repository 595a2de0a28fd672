use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::forum::{ForumPost, ServiceCategory};

use crate::models::{CreatePostRequest, ForumError, PostQuery};
use crate::services::ForumService;

impl From<ForumError> for AppError {
    fn from(e: ForumError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

pub async fn list_categories() -> Json<Value> {
    let categories: Vec<String> = ServiceCategory::ALL.iter().map(|c| c.to_string()).collect();
    Json(json!({ "categories": categories }))
}

#[axum::debug_handler]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Value>, AppError> {
    let posts = ForumService::new(&state).list_posts(query.category).await;

    Ok(Json(json!({
        "posts": posts,
        "total": posts.len()
    })))
}

#[axum::debug_handler]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ForumPost>), AppError> {
    let post = ForumService::new(&state).create_post(&user, request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}
