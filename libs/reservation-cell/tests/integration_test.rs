use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use tower::ServiceExt;

use booking_cell::models::CreateBookingRequest;
use booking_cell::services::BookingService;
use reservation_cell::router::reservation_routes;
use shared_database::AppState;
use shared_models::booking::{Booking, DurationType};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

async fn create_test_app() -> (Router, Booking) {
    let state = Arc::new(AppState::new(TestConfig::default().to_app_config()));
    let booking = BookingService::new(&state)
        .create_booking(&TestUser::admin("health@gov.lk").to_user(), CreateBookingRequest {
            name: "Medical Certificate".to_string(),
            description: String::new(),
            location: "General Hospital".to_string(),
            available_dates: vec![NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()],
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            duration_per_person: 30,
            duration_type: DurationType::Minutes,
        })
        .await
        .unwrap();
    (reservation_routes(state), booking)
}

fn request(method: &str, uri: &str, user: &TestUser, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", JwtTestUtils::bearer(user, &TestConfig::default()));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_book_then_view_receipt() {
    let (app, booking) = create_test_app().await;
    let citizen = TestUser::citizen("jane@example.com");
    let body = json!({ "booking_id": booking.id, "slot_id": booking.slots[0].id });

    let response = app.clone().oneshot(request("POST", "/", &citizen, Some(body.clone()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["reservation"]["id"].as_str().unwrap().to_string();

    let response = app.clone().oneshot(request("POST", "/", &citizen, Some(body))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.clone().oneshot(request("GET", &format!("/{}", id), &citizen, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let receipt = body_json(response).await;
    assert_eq!(receipt["qr_payload"], format!("booking:{}", id));
    assert_eq!(receipt["service_name"], "Medical Certificate");

    let response = app.oneshot(request("GET", "/mine", &citizen, None)).await.unwrap();
    let mine = body_json(response).await;
    assert_eq!(mine["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(mine["past"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_listing_and_status_filter() {
    let (app, booking) = create_test_app().await;
    let citizen = TestUser::citizen("jane@example.com");
    let admin = TestUser::admin("health@gov.lk");
    let body = json!({ "booking_id": booking.id, "slot_id": booking.slots[1].id });
    app.clone().oneshot(request("POST", "/", &citizen, Some(body))).await.unwrap();

    let response = app
        .clone()
        .oneshot(request("GET", "/?status=upcoming", &admin, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], 1);

    let response = app.oneshot(request("GET", "/", &citizen, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_reservation_is_not_found() {
    let (app, _) = create_test_app().await;
    let citizen = TestUser::citizen("jane@example.com");

    let response = app
        .oneshot(request("POST", &format!("/{}/cancel", uuid::Uuid::new_v4()), &citizen, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
