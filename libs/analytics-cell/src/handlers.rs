// =====================================================================================
// ANALYTICS CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use shared_database::AppState;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::require_admin;

use crate::models::{AnalyticsError, AnalyticsSummary, DailyQuery, DashboardSummary, RecentBookingsPage, RecentQuery};
use crate::services::AnalyticsService;

impl From<AnalyticsError> for AppError {
    fn from(e: AnalyticsError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

// =====================================================================================
// ADMIN REPORTS
// =====================================================================================

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    require_admin(&user)?;
    Ok(Json(AnalyticsService::new(&state).summary().await))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_service_distribution(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let services = AnalyticsService::new(&state).service_distribution().await;
    Ok(Json(json!({ "services": services })))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_daily_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let days = AnalyticsService::new(&state).daily(query.days).await?;
    Ok(Json(json!({ "days": days })))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_peak_hours(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    let hours = AnalyticsService::new(&state).peak_hours().await;
    Ok(Json(json!({ "hours": hours })))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_recent_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentBookingsPage>, AppError> {
    require_admin(&user)?;
    let page = AnalyticsService::new(&state).recent(&query).await?;
    Ok(Json(page))
}

// =====================================================================================
// CITIZEN DASHBOARD
// =====================================================================================

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(AnalyticsService::new(&state).dashboard(&user).await))
}
