use std::sync::Arc;

use assert_matches::assert_matches;
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use booking_cell::handlers::{
    create_booking, delete_booking, get_booking, get_booking_slots, list_bookings, preview_slots, update_booking,
};
use booking_cell::models::{BookingListQuery, CreateBookingRequest, SlotQuery, SlotTemplate, UpdateBookingRequest};
use shared_database::AppState;
use shared_models::booking::DurationType;
use shared_models::error::AppError;
use shared_models::reservation::{UserBooking, UserBookingStatus};
use shared_models::auth::User;
use shared_utils::test_utils::{TestConfig, TestUser};

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(TestConfig::default().to_app_config()))
}

fn admin() -> User {
    TestUser::admin("immigration@gov.lk").to_user()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn passport_request() -> CreateBookingRequest {
    CreateBookingRequest {
        name: "Passport Renewal".to_string(),
        description: "Bring your old passport".to_string(),
        location: "Colombo Office".to_string(),
        available_dates: vec![date(2), date(3)],
        start_time: time(9, 0),
        end_time: time(10, 0),
        duration_per_person: 30,
        duration_type: DurationType::Minutes,
    }
}

/// Marks a slot booked and stores the matching reservation, as the reservation flow would.
async fn reserve(state: &AppState, booking_id: Uuid, slot_id: &str, user_id: &str) -> UserBooking {
    let booking = state
        .db
        .bookings
        .update(booking_id, |b| {
            let slot = b.slot_mut(slot_id).unwrap();
            slot.is_booked = true;
            slot.booked_by = Some(user_id.to_string());
            slot.token_number = Some("TOKABCDEFGH".to_string());
        })
        .await
        .unwrap();
    let slot = booking.slot(slot_id).unwrap();

    state
        .db
        .user_bookings
        .insert(UserBooking {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            booking_id,
            slot_id: slot_id.to_string(),
            token_number: "TOKABCDEFGH".to_string(),
            booking_date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            status: UserBookingStatus::Upcoming,
            created_at: Utc::now(),
        })
        .await
}

#[tokio::test]
async fn test_create_booking_generates_slots() {
    let state = test_state();
    let user = admin();

    let (status, Json(details)) = create_booking(State(state.clone()), Extension(user.clone()), Json(passport_request()))
        .await
        .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(details.total_slots, 4);
    assert_eq!(details.available_slots, 4);
    assert_eq!(details.booking.created_by, user.id);
    assert_eq!(state.db.bookings.len().await, 1);
}

#[tokio::test]
async fn test_citizen_cannot_create_booking() {
    let state = test_state();
    let citizen = TestUser::citizen("jane@example.com").to_user();

    let result = create_booking(State(state), Extension(citizen), Json(passport_request())).await;
    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_booking_validation() {
    let state = test_state();

    let blank_name = CreateBookingRequest { name: "  ".to_string(), ..passport_request() };
    let result = create_booking(State(state.clone()), Extension(admin()), Json(blank_name)).await;
    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg == "Service name is required");

    let inverted = CreateBookingRequest { start_time: time(11, 0), ..passport_request() };
    let result = create_booking(State(state), Extension(admin()), Json(inverted)).await;
    assert_matches!(result, Err(AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_list_bookings_filters() {
    let state = test_state();
    let (_, Json(passport)) = create_booking(State(state.clone()), Extension(admin()), Json(passport_request()))
        .await
        .unwrap();
    let licence = CreateBookingRequest {
        name: "Driving Licence".to_string(),
        location: "Werahera".to_string(),
        available_dates: vec![date(2)],
        start_time: time(9, 0),
        end_time: time(9, 30),
        ..passport_request()
    };
    let (_, Json(licence)) = create_booking(State(state.clone()), Extension(admin()), Json(licence)).await.unwrap();

    let Json(all) = list_bookings(State(state.clone()), Query(BookingListQuery::default())).await.unwrap();
    assert_eq!(all["total"], 2);
    assert_eq!(all["bookings"][0]["name"], "Passport Renewal");

    let Json(found) = list_bookings(State(state.clone()), Query(BookingListQuery {
        available_only: None,
        search: Some("colombo".to_string()),
    })).await.unwrap();
    assert_eq!(found["total"], 1);

    let only_slot = licence.booking.slots[0].id.clone();
    reserve(&state, licence.booking.id, &only_slot, "citizen-1").await;

    let Json(available) = list_bookings(State(state), Query(BookingListQuery {
        available_only: Some(true),
        search: None,
    })).await.unwrap();
    assert_eq!(available["total"], 1);
    assert_eq!(available["bookings"][0]["id"], passport.booking.id.to_string());
}

#[tokio::test]
async fn test_get_booking_and_slots() {
    let state = test_state();
    let (_, Json(created)) = create_booking(State(state.clone()), Extension(admin()), Json(passport_request()))
        .await
        .unwrap();
    let id = created.booking.id;

    let Json(details) = get_booking(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(details.booking.name, "Passport Renewal");

    let Json(slots) = get_booking_slots(State(state.clone()), Path(id), Query(SlotQuery::default())).await.unwrap();
    assert_eq!(slots["days"].as_array().unwrap().len(), 2);
    assert_eq!(slots["total"], 4);

    let Json(one_day) = get_booking_slots(State(state.clone()), Path(id), Query(SlotQuery {
        date: Some(date(3)),
        available_only: None,
    })).await.unwrap();
    assert_eq!(one_day["days"][0]["date"], "2025-06-03");
    assert_eq!(one_day["days"][0]["slots"][1]["start_time"], "09:30");

    let missing = get_booking(State(state), Path(Uuid::new_v4())).await;
    assert_matches!(missing, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_keeps_matching_reservations_and_cancels_lost_ones() {
    let state = test_state();
    let (_, Json(created)) = create_booking(State(state.clone()), Extension(admin()), Json(passport_request()))
        .await
        .unwrap();
    let id = created.booking.id;

    let kept_slot = created.booking.slots[0].id.clone();
    let lost_slot = created.booking.slots[3].id.clone();
    let kept = reserve(&state, id, &kept_slot, "citizen-1").await;
    let lost = reserve(&state, id, &lost_slot, "citizen-2").await;

    // Dropping the second date removes the slots reserved on it.
    let request = UpdateBookingRequest {
        available_dates: Some(vec![date(2)]),
        ..UpdateBookingRequest::default()
    };
    let Json(outcome) = update_booking(State(state.clone()), Extension(admin()), Path(id), Json(request))
        .await
        .unwrap();

    assert_eq!(outcome.cancelled_reservations, 1);
    assert_eq!(outcome.booking.total_slots, 2);
    assert_eq!(outcome.booking.booked_slots, 1);
    assert!(outcome.booking.booking.slot(&kept_slot).unwrap().is_booked);

    let kept = state.db.user_bookings.get(kept.id).await.unwrap();
    let lost = state.db.user_bookings.get(lost.id).await.unwrap();
    assert_eq!(kept.status, UserBookingStatus::Upcoming);
    assert_eq!(lost.status, UserBookingStatus::Cancelled);
}

#[tokio::test]
async fn test_update_rejects_invalid_window() {
    let state = test_state();
    let (_, Json(created)) = create_booking(State(state.clone()), Extension(admin()), Json(passport_request()))
        .await
        .unwrap();

    let request = UpdateBookingRequest {
        end_time: Some(time(8, 0)),
        ..UpdateBookingRequest::default()
    };
    let result = update_booking(State(state.clone()), Extension(admin()), Path(created.booking.id), Json(request)).await;
    assert_matches!(result, Err(AppError::ValidationError(_)));

    let unchanged = state.db.bookings.get(created.booking.id).await.unwrap();
    assert_eq!(unchanged.end_time, time(10, 0));
}

#[tokio::test]
async fn test_delete_booking_cascades() {
    let state = test_state();
    let (_, Json(created)) = create_booking(State(state.clone()), Extension(admin()), Json(passport_request()))
        .await
        .unwrap();
    let id = created.booking.id;
    reserve(&state, id, &created.booking.slots[1].id, "citizen-1").await;

    let Json(body) = delete_booking(State(state.clone()), Extension(admin()), Path(id)).await.unwrap();
    assert_eq!(body["removed_reservations"], 1);
    assert!(state.db.bookings.is_empty().await);
    assert!(state.db.user_bookings.is_empty().await);

    let again = delete_booking(State(state), Extension(admin()), Path(id)).await;
    assert_matches!(again, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_preview_slots_does_not_store() {
    let state = test_state();
    let template = SlotTemplate {
        available_dates: vec![date(2)],
        start_time: time(8, 0),
        end_time: time(12, 0),
        duration_per_person: 1,
        duration_type: DurationType::Hours,
    };

    let Json(body) = preview_slots(State(state.clone()), Extension(admin()), Json(template)).await.unwrap();
    assert_eq!(body["total"], 4);
    assert_eq!(body["slots"][3]["end_time"], "12:00");
    assert!(state.db.bookings.is_empty().await);
}
