use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use analytics_cell::router::analytics_routes;
use booking_cell::models::CreateBookingRequest;
use booking_cell::services::BookingService;
use reservation_cell::models::CreateReservationRequest;
use reservation_cell::services::ReservationService;
use shared_config::AppConfig;
use shared_database::AppState;
use shared_models::account::Account;
use shared_models::auth::Role;
use shared_models::booking::DurationType;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

struct Fixture {
    app: Router,
    admin: TestUser,
    citizen: TestUser,
}

fn booking_request(name: &str, start_hour: u32) -> CreateBookingRequest {
    CreateBookingRequest {
        name: name.to_string(),
        description: String::new(),
        location: "Battaramulla".to_string(),
        available_dates: vec![NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()],
        start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(start_hour + 1, 0, 0).unwrap(),
        duration_per_person: 30,
        duration_type: DurationType::Minutes,
    }
}

/// Two services; the citizen holds both slots of the first, one of which is cancelled.
async fn fixture() -> Fixture {
    let state = AppState::bootstrap(AppConfig {
        seed_demo_data: true,
        ..TestConfig::default().to_app_config()
    })
    .await;
    let admin = TestUser::admin("stats@gov.lk");
    let citizen = TestUser::new("kamala@example.com", "user", "Kamala Silva");

    state.db.accounts.insert(Account {
        id: citizen.id.parse().unwrap(),
        email: citizen.email.clone(),
        full_name: citizen.full_name.clone(),
        nic: None,
        address: None,
        date_of_birth: None,
        photo_url: None,
        role: Role::Citizen,
        department_id: None,
        password_hash: None,
        created_at: Utc::now(),
    }).await;

    let bookings = BookingService::new(&state);
    let nic = bookings.create_booking(&admin.to_user(), booking_request("NIC Issuance", 9)).await.unwrap();
    bookings.create_booking(&admin.to_user(), booking_request("Pension Enquiry", 14)).await.unwrap();

    let reservations = ReservationService::new(&state);
    let citizen_user = citizen.to_user();
    for slot in &nic.slots {
        reservations
            .book_slot(&citizen_user, CreateReservationRequest { booking_id: nic.id, slot_id: slot.id.clone() })
            .await
            .unwrap();
    }
    let first = state.db.user_bookings.all().await[0].id;
    reservations.cancel(&citizen_user, first).await.unwrap();

    Fixture {
        app: analytics_routes(Arc::new(state)),
        admin,
        citizen,
    }
}

async fn get_json(app: &Router, uri: &str, user: &TestUser) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", JwtTestUtils::bearer(user, &TestConfig::default()))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_summary() {
    let f = fixture().await;
    let (status, body) = get_json(&f.app, "/summary", &f.admin).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_bookings"], 2);
    assert_eq!(body["total_slots"], 4);
    assert_eq!(body["booked_slots"], 1);
    assert_eq!(body["available_slots"], 3);
    assert_eq!(body["active_notices"], 2);
    assert_eq!(body["total_reservations"], 2);
    assert_eq!(body["upcoming_reservations"], 1);
}

#[tokio::test]
async fn test_reports_are_admin_only() {
    let f = fixture().await;
    for uri in ["/summary", "/services", "/daily", "/peak-hours", "/recent"] {
        let (status, _) = get_json(&f.app, uri, &f.citizen).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn test_services_and_peak_hours() {
    let f = fixture().await;

    let (_, services) = get_json(&f.app, "/services", &f.admin).await;
    assert_eq!(services["services"][0]["name"], "NIC Issuance");
    assert_eq!(services["services"][0]["reservations"], 2);
    assert_eq!(services["services"][1]["reservations"], 0);

    let (_, hours) = get_json(&f.app, "/peak-hours", &f.admin).await;
    assert_eq!(hours["hours"].as_array().unwrap().len(), 1);
    assert_eq!(hours["hours"][0]["label"], "09:00");
    assert_eq!(hours["hours"][0]["count"], 2);
}

#[tokio::test]
async fn test_daily_window() {
    let f = fixture().await;

    let (_, body) = get_json(&f.app, "/daily", &f.admin).await;
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    assert_eq!(days[29]["date"], Utc::now().date_naive().to_string());
    assert_eq!(days[29]["count"], 2);

    let (_, body) = get_json(&f.app, "/daily?days=7", &f.admin).await;
    assert_eq!(body["days"].as_array().unwrap().len(), 7);

    let (status, _) = get_json(&f.app, "/daily?days=0", &f.admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recent_bookings_page() {
    let f = fixture().await;

    let (_, page) = get_json(&f.app, "/recent", &f.admin).await;
    assert_eq!(page["per_page"], 5);
    assert_eq!(page["total"], 2);
    assert_eq!(page["rows"][0]["user_name"], "Kamala Silva");
    assert_eq!(page["rows"][0]["service"], "NIC Issuance");

    let (_, cancelled) = get_json(&f.app, "/recent?search=cancelled", &f.admin).await;
    assert_eq!(cancelled["total"], 1);

    let (status, _) = get_json(&f.app, "/recent?per_page=7", &f.admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_for_citizen() {
    let f = fixture().await;
    let (status, body) = get_json(&f.app, "/dashboard", &f.citizen).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming_reservations"], 1);
    assert_eq!(body["available_services"], 2);
    assert_eq!(body["latest_notices"].as_array().unwrap().len(), 2);
}
