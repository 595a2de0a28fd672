use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use forum_cell::router::forum_routes;
use shared_config::AppConfig;
use shared_database::AppState;
use shared_models::account::Account;
use shared_models::auth::Role;
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

async fn create_test_app() -> Router {
    let state = AppState::bootstrap(AppConfig {
        seed_demo_data: true,
        ..TestConfig::default().to_app_config()
    })
    .await;
    forum_routes(Arc::new(state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_as(user: &TestUser, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/posts")
        .header("authorization", JwtTestUtils::bearer(user, &TestConfig::default()))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_categories() {
    let app = create_test_app().await;

    let body = body_json(app.oneshot(get("/categories")).await.unwrap()).await;
    assert_eq!(
        body["categories"],
        json!(["Visa Services", "Healthcare", "Transport", "Education", "Housing", "Other"])
    );
}

#[tokio::test]
async fn test_seeded_posts_newest_first_and_filtered() {
    let app = create_test_app().await;

    let all = body_json(app.clone().oneshot(get("/posts")).await.unwrap()).await;
    assert_eq!(all["total"], 2);
    assert_eq!(all["posts"][0]["name"], "Jane Citizen");

    let transport = body_json(app.oneshot(get("/posts?category=Transport")).await.unwrap()).await;
    assert_eq!(transport["total"], 1);
    assert_eq!(transport["posts"][0]["name"], "John Doe");
}

#[tokio::test]
async fn test_post_uses_callers_name() {
    let app = create_test_app().await;
    let user = TestUser::new("amal@example.com", "user", "Amal Perera");

    let response = app
        .clone()
        .oneshot(post_as(&user, json!({ "category": "Visa Services", "feedback": "Queue moved quickly." })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    assert_eq!(post["name"], "Amal Perera");
    assert_eq!(post["category"], "Visa Services");

    let visa = body_json(app.oneshot(get("/posts?category=visa_services")).await.unwrap()).await;
    assert_eq!(visa["total"], 1);
}

#[tokio::test]
async fn test_post_uses_current_account_name_over_token() {
    let state = AppState::bootstrap(TestConfig::default().to_app_config()).await;
    let user = TestUser::new("nimal@example.com", "user", "John Doe");
    state.db.accounts.insert(Account {
        id: user.id.parse().unwrap(),
        email: user.email.clone(),
        full_name: "Nimal Perera".to_string(),
        nic: None,
        address: None,
        date_of_birth: None,
        photo_url: None,
        role: Role::Citizen,
        department_id: None,
        password_hash: None,
        created_at: Utc::now(),
    }).await;
    let app = forum_routes(Arc::new(state));

    let response = app
        .oneshot(post_as(&user, json!({ "category": "Transport", "feedback": "Buses were on time." })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["name"], "Nimal Perera");
}

#[tokio::test]
async fn test_post_without_name_is_citizen() {
    let app = create_test_app().await;
    let user = TestUser::new("anon@example.com", "user", "");

    let response = app
        .oneshot(post_as(&user, json!({ "category": "Housing", "feedback": "More listings please" })))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["name"], "Citizen");
}

#[tokio::test]
async fn test_post_requires_feedback_and_auth() {
    let app = create_test_app().await;
    let user = TestUser::citizen("jane@example.com");

    let response = app
        .clone()
        .oneshot(post_as(&user, json!({ "category": "Education", "feedback": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_as(&user, json!({ "feedback": "no category" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let anonymous = Request::builder()
        .method("POST")
        .uri("/posts")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "category": "Other", "feedback": "hi" }).to_string()))
        .unwrap();
    let response = app.oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
