mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use gympro::config::Config;
use gympro::routes;
use tower::ServiceExt;

#[tokio::test]
async fn test_unconfigured_backend_serves_placeholder_everywhere() {
    let config = Config::from_lookup(|_| None);
    assert!(!config.is_backend_configured());

    for path in ["/", "/login", "/register", "/dashboard", "/exercises"] {
        let response = routes::create_setup_router()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = common::body_string(response).await;
        assert!(body.contains("Welcome to GymPro"));
        assert!(body.contains("BACKEND_URL"));
        assert!(body.contains("BACKEND_ANON_KEY"));
        // No navigation is offered
        assert!(!body.contains("href=\"/login\""));
    }
}

#[tokio::test]
async fn test_placeholder_ignores_form_posts() {
    let response = routes::create_setup_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .body(Body::from("email=a%40b.c&password=secret"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
