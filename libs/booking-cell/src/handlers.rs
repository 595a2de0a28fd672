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
use shared_utils::extractor::require_admin;

use crate::models::{
    BookingDetails, BookingError, BookingListQuery, BookingUpdateOutcome, CreateBookingRequest,
    SlotQuery, SlotTemplate, UpdateBookingRequest,
};
use crate::services::BookingService;

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Validation(msg) => AppError::ValidationError(msg),
            BookingError::NotFound => AppError::NotFound(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingDetails>), AppError> {
    require_admin(&user)?;

    let booking = BookingService::new(&state).create_booking(&user, request).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Value>, AppError> {
    let bookings: Vec<BookingDetails> = BookingService::new(&state)
        .list_bookings(&query)
        .await
        .into_iter()
        .map(BookingDetails::from)
        .collect();

    Ok(Json(json!({
        "bookings": bookings,
        "total": bookings.len()
    })))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingDetails>, AppError> {
    let booking = BookingService::new(&state).get_booking(booking_id).await?;
    Ok(Json(booking.into()))
}

#[axum::debug_handler]
pub async fn get_booking_slots(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let days = BookingService::new(&state).get_slots(booking_id, &query).await?;
    let total: usize = days.iter().map(|d| d.slots.len()).sum();

    Ok(Json(json!({
        "booking_id": booking_id,
        "days": days,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<BookingUpdateOutcome>, AppError> {
    require_admin(&user)?;
    debug!("User {} updating booking {}", user.id, booking_id);

    let (booking, cancelled) = BookingService::new(&state).update_booking(booking_id, request).await?;

    Ok(Json(BookingUpdateOutcome {
        booking: booking.into(),
        cancelled_reservations: cancelled,
    }))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;
    debug!("User {} deleting booking {}", user.id, booking_id);

    let removed = BookingService::new(&state).delete_booking(booking_id).await?;

    Ok(Json(json!({
        "success": true,
        "removed_reservations": removed,
        "message": "Booking deleted successfully"
    })))
}

#[axum::debug_handler]
pub async fn preview_slots(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(template): Json<SlotTemplate>,
) -> Result<Json<Value>, AppError> {
    require_admin(&user)?;

    let slots = BookingService::new(&state).preview_slots(&template)?;

    Ok(Json(json!({
        "slots": slots,
        "total": slots.len()
    })))
}
