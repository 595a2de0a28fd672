use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_database::AppState;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::{require_admin, require_citizen};

use crate::models::{
    CreateReservationRequest, MyReservations, MyReservationsQuery, ReservationDetails, ReservationError,
    ReservationSearchQuery,
};
use crate::services::ReservationService;

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        match e {
            ReservationError::BookingNotFound
            | ReservationError::SlotNotFound
            | ReservationError::NotFound => AppError::NotFound(e.to_string()),
            ReservationError::SlotAlreadyBooked => AppError::Conflict(e.to_string()),
            ReservationError::Unauthorized => AppError::Forbidden(e.to_string()),
            ReservationError::InvalidStatusTransition(_) => AppError::BadRequest(e.to_string()),
            ReservationError::TokenExhausted => AppError::Internal(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    require_citizen(&user)?;
    debug!("User {} booking slot {}", user.id, request.slot_id);

    let details = ReservationService::new(&state).book_slot(&user, request).await?;
    let token_number = details.reservation.token_number.clone();

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "reservation": details,
            "token_number": token_number,
            "message": "Slot booked successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn get_my_reservations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<MyReservationsQuery>,
) -> Result<Json<MyReservations>, AppError> {
    let reservations = ReservationService::new(&state)
        .my_reservations(&user, query.status)
        .await;
    debug!("User {} has {} reservations", user.id, reservations.total());
    Ok(Json(reservations))
}

#[axum::debug_handler]
pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ReservationDetails>, AppError> {
    let details = ReservationService::new(&state)
        .get_reservation(&user, reservation_id)
        .await?;
    Ok(Json(details))
}

#[axum::debug_handler]
pub async fn get_reservation_by_token(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(token_number): Path<String>,
) -> Result<Json<ReservationDetails>, AppError> {
    require_admin(&user)?;

    let details = ReservationService::new(&state).find_by_token(&token_number).await?;
    Ok(Json(details))
}

#[axum::debug_handler]
pub async fn search_reservations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Query(query): Query<ReservationSearchQuery>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let reservations = ReservationService::new(&state).search(&query).await;

    Ok(Json(json!({
        "reservations": reservations,
        "total": reservations.len()
    })))
}

#[axum::debug_handler]
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let details = ReservationService::new(&state).cancel(&user, reservation_id).await?;

    Ok(Json(json!({
        "success": true,
        "reservation": details,
        "message": "Reservation cancelled"
    })))
}

#[axum::debug_handler]
pub async fn complete_reservation(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let details = ReservationService::new(&state).complete(reservation_id).await?;

    Ok(Json(json!({
        "success": true,
        "reservation": details,
        "message": "Reservation marked as completed"
    })))
}
