use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;

use shared_database::AppState;
use shared_models::account::AccountProfile;
use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_utils::jwt;

use crate::models::{
    AuthError, AuthResponse, LoginRequest, RegisterCitizenRequest, RegisterDepartmentRequest,
    UpdateProfileRequest,
};
use crate::services::AccountService;

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => AppError::ValidationError(msg),
            AuthError::EmailTaken => AppError::Conflict(e.to_string()),
            AuthError::InvalidCredentials | AuthError::RoleMismatch(_) => AppError::Auth(e.to_string()),
            AuthError::AccountNotFound => AppError::NotFound(e.to_string()),
            AuthError::Token(_) | AuthError::PasswordHash(_) => AppError::Internal(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn register_citizen(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterCitizenRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    debug!("Registering citizen account");
    let response = AccountService::new(&state).register_citizen(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn register_department(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterDepartmentRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    debug!("Registering department account");
    let response = AccountService::new(&state).register_department(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    debug!("Login attempt as {}", request.role);
    let response = AccountService::new(&state).login(request).await?;
    Ok(Json(response))
}

type BearerHeader = TypedHeader<Authorization<Bearer>>;

fn require_bearer(header: Option<BearerHeader>) -> Result<String, AppError> {
    header
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))
}

pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    header: Option<BearerHeader>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = require_bearer(header)?;
    let user = jwt::validate_token(&token, &state.config.jwt_secret).map_err(AppError::Auth)?;

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        email: user.email,
        role: user.role,
    }))
}

pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    header: Option<BearerHeader>,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    let token = require_bearer(header)?;
    let valid = jwt::validate_token(&token, &state.config.jwt_secret).is_ok();

    Ok(Json(json!({ "valid": valid })))
}

/// Tokens are stateless; the client drops its copy.
pub async fn logout(Extension(user): Extension<User>) -> Json<Value> {
    debug!("Logout for user: {}", user.id);
    Json(json!({ "success": true, "message": "Logged out" }))
}

pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<AccountProfile>, AppError> {
    debug!("Getting profile for user: {}", user.id);
    let profile = AccountService::new(&state).get_profile(&user).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = AccountService::new(&state).update_profile(&user, request).await?;

    Ok(Json(json!({
        "success": true,
        "user": profile,
        "message": "Profile updated successfully"
    })))
}
