use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_database::AppState;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::notice::Notice;
use shared_utils::extractor::require_admin;

use crate::models::{CreateNoticeRequest, NoticeError, NoticeQuery};
use crate::services::NoticeService;

impl From<NoticeError> for AppError {
    fn from(e: NoticeError) -> Self {
        match e {
            NoticeError::MissingFields => AppError::ValidationError(e.to_string()),
            NoticeError::NotFound => AppError::NotFound(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_notice(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    require_admin(&user)?;

    let notice = NoticeService::new(&state).create_notice(&user, request).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

#[axum::debug_handler]
pub async fn list_notices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NoticeQuery>,
) -> Result<Json<Value>, AppError> {
    let notices = NoticeService::new(&state).list_notices(query.limit).await;

    Ok(Json(json!({
        "notices": notices,
        "total": notices.len()
    })))
}

#[axum::debug_handler]
pub async fn get_notice(
    State(state): State<Arc<AppState>>,
    Path(notice_id): Path<Uuid>,
) -> Result<Json<Notice>, AppError> {
    let notice = NoticeService::new(&state).get_notice(notice_id).await?;
    Ok(Json(notice))
}

#[axum::debug_handler]
pub async fn delete_notice(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(notice_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    NoticeService::new(&state).delete_notice(notice_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Notice deleted successfully"
    })))
}
