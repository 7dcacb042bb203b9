#![cfg(feature = "http-server")]

mod support;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use dealership::api::CarId;
use dealership::db::repository::ViewRepository;
use support::{admin_token, send, test_app};

fn new_car() -> serde_json::Value {
    json!({
        "modelo": "Onix",
        "marca": "Chevrolet",
        "imagemUrl": "https://example.com/onix.jpg",
        "imagens": ["https://example.com/onix-2.jpg"],
        "cor": "Vermelho",
        "valor": 85000.0
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let (app, _) = test_app().await;

    let token = admin_token(&app).await;
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "admin", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_response_never_leaks_hash() {
    let (app, _) = test_app().await;
    let (_, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin123"})),
    )
    .await;
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["id"], 1);
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_public_catalog_reads() {
    let (app, repo) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/cars", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 3);
    assert_eq!(cars[0]["modelo"], "Civic");
    assert_eq!(cars[0]["marca"], "Honda");
    assert_eq!(cars[0]["valor"], 120000.0);
    assert_eq!(repo.view_count().await.unwrap(), 0);

    let (status, body) = send(&app, Method::GET, "/cars/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modelo"], "Corolla");
    assert_eq!(repo.view_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_car_is_404_and_records_nothing() {
    let (app, repo) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/cars/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(repo.view_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/cars/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_mutations_require_auth() {
    let (app, _) = test_app().await;

    let (status, _) = send(&app, Method::POST, "/cars", None, Some(new_car())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::DELETE, "/cars/1", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/cars/analytics", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_car_crud_flow() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;

    let (status, created) = send(&app, Method::POST, "/cars", Some(&token), Some(new_car())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 4);
    assert_eq!(created["imagens"][0], "https://example.com/onix-2.jpg");

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/cars/4",
        Some(&token),
        Some(json!({"valor": 80000.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["valor"], 80000.0);
    assert_eq!(updated["modelo"], "Onix");

    let empty = Some(json!({}));
    let (status, body) = send(&app, Method::PATCH, "/cars/4", Some(&token), empty).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, removed) = send(&app, Method::DELETE, "/cars/4", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["message"], "Car removed successfully");

    let (status, _) = send(&app, Method::GET, "/cars/4", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/cars/4", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_car_payload_is_rejected() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;

    let mut car = new_car();
    car["imagemUrl"] = json!("not a url");
    let (status, body) = send(&app, Method::POST, "/cars", Some(&token), Some(car)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("imagemUrl"));

    let mut car = new_car();
    car["valor"] = json!(-5);
    let (status, _) = send(&app, Method::POST, "/cars", Some(&token), Some(car)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/cars",
        Some(&token),
        Some(json!({"modelo": "Only a model"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_counts_detail_views() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;

    for _ in 0..3 {
        send(&app, Method::GET, "/cars/1", None, None).await;
    }
    send(&app, Method::GET, "/cars/3", None, None).await;

    let (status, body) = send(&app, Method::GET, "/cars/analytics", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCars"], 3);
    assert_eq!(body["avgPrice"], 325000.0 / 3.0);
    assert_eq!(body["totalViews"], 4);
    assert_eq!(body["brandStats"][0], json!({"marca": "Honda", "quantidade": 1}));
    assert_eq!(body["popularCars"][0]["car"]["id"], 1);
    assert_eq!(body["popularCars"][0]["views"], 3);
    assert_eq!(body["popularCars"][1]["car"]["id"], 3);
    assert_eq!(body["viewsByPeriod"].as_array().unwrap().len(), 31);
}

#[tokio::test]
async fn test_analytics_date_params() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;
    send(&app, Method::GET, "/cars/2", None, None).await;

    let today = Utc::now().date_naive();
    let start = today - Duration::days(2);
    let uri = format!("/cars/analytics?startDate={}&endDate={}", start, today);
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let series = body["viewsByPeriod"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[2]["date"], today.to_string());
    assert_eq!(series[2]["views"], 1);
    assert_eq!(body["totalViews"], 1);

    // Inverted window: empty series, no error.
    let uri = format!("/cars/analytics?startDate={}&endDate={}", today, start);
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["viewsByPeriod"], json!([]));
    assert_eq!(body["totalViews"], 0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/cars/analytics?startDate=last-week",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_analytics_window_too_long() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/cars/analytics?startDate=0001-01-01&endDate=9999-12-31",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let today = Utc::now().date_naive();
    let start = today - Duration::days(365);
    let uri = format!("/cars/analytics?startDate={}&endDate={}", start, today);
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["viewsByPeriod"].as_array().unwrap().len(), 366);
}

#[tokio::test]
async fn test_deleted_car_disappears_from_analytics() {
    let (app, repo) = test_app().await;
    let token = admin_token(&app).await;
    send(&app, Method::GET, "/cars/1", None, None).await;
    send(&app, Method::GET, "/cars/2", None, None).await;

    send(&app, Method::DELETE, "/cars/1", Some(&token), None).await;
    assert_eq!(repo.view_count().await.unwrap(), 1);

    let (_, body) = send(&app, Method::GET, "/cars/analytics", Some(&token), None).await;
    assert_eq!(body["totalCars"], 2);
    assert_eq!(body["totalViews"], 1);
    assert_eq!(body["popularCars"].as_array().unwrap().len(), 1);
    assert_eq!(body["popularCars"][0]["car"]["id"], 2);
}

#[tokio::test]
async fn test_empty_catalog_analytics_has_null_average() {
    let (app, repo) = test_app().await;
    let token = admin_token(&app).await;
    for id in 1..=3 {
        send(&app, Method::DELETE, &format!("/cars/{}", id), Some(&token), None).await;
    }
    assert_eq!(repo.car_count(), 0);

    let (status, body) = send(&app, Method::GET, "/cars/analytics", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCars"], 0);
    assert!(body["avgPrice"].is_null());
    assert_eq!(body["brandStats"], json!([]));
}

#[tokio::test]
async fn test_user_management_flow() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/users",
        Some(&token),
        Some(json!({"username": "vendedor", "password": "senha123"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["username"], "vendedor");
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        Some(&token),
        Some(json!({"username": "vendedor", "password": "outra123"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, list) = send(&app, Method::GET, "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({"username": "gerente"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["username"], "gerente");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/users/{}", id),
        Some(&token),
        Some(json!({"username": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_be_deleted() {
    let (app, _) = test_app().await;
    let token = admin_token(&app).await;
    let (status, body) = send(&app, Method::DELETE, "/users/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let (app, _) = test_app().await;
    let admin = admin_token(&app).await;
    send(
        &app,
        Method::POST,
        "/users",
        Some(&admin),
        Some(json!({"username": "temp", "password": "temp1234"})),
    )
    .await;
    let (_, login) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({"username": "temp", "password": "temp1234"})),
    )
    .await;
    let temp_token = login["access_token"].as_str().unwrap().to_string();
    let temp_id = login["user"]["id"].as_i64().unwrap();

    send(&app, Method::DELETE, &format!("/users/{}", temp_id), Some(&admin), None).await;

    let (status, _) = send(&app, Method::GET, "/users", Some(&temp_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_views_recorded_through_http_are_queryable() {
    let (app, repo) = test_app().await;
    let before = Utc::now() - Duration::seconds(1);
    send(&app, Method::GET, "/cars/3", None, None).await;
    let after = Utc::now() + Duration::seconds(1);

    let events = repo.query_range(before, after).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].car_id, CarId(3));
}
