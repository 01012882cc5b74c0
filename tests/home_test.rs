mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

#[tokio::test]
async fn test_home_page_for_visitors() {
    let test_app = common::create_test_app();

    let response = test_app
        .router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Transform Your Life with GymPro"));
    assert!(body.contains("href=\"/login\""));
    assert!(body.contains("href=\"/register\""));
    assert!(!body.contains("Logout"));
}

#[tokio::test]
async fn test_navbar_for_signed_in_member() {
    let test_app = common::create_test_app();
    let member =
        common::create_member(&test_app.backend, "jane@example.com", "Jane Doe", "basic").await;

    let response = test_app
        .router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &member.cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("href=\"/dashboard\""));
    assert!(body.contains("href=\"/exercises\""));
    assert!(body.contains("Logout"));
    assert!(!body.contains("href=\"/login\""));
}

#[tokio::test]
async fn test_stale_cookie_renders_as_signed_out() {
    let test_app = common::create_test_app();

    let response = test_app
        .router
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "session=revoked-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("href=\"/login\""));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let test_app = common::create_test_app();

    let response = test_app
        .router
        .oneshot(
            Request::builder()
                .uri("/nowhere")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let test_app = common::create_test_app();

    let response = test_app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend"], "reachable");
    assert!(json["git_version"].is_string());
}

#[tokio::test]
async fn test_health_check_reports_failing_backend() {
    let test_app = common::create_test_app();
    test_app.backend.fail_table("exercises").await;

    let response = test_app
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = common::body_string(response).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["backend"], "unreachable");
}
