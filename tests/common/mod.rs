#![allow(dead_code)]

use std::sync::Arc;

use axum::{response::Response, Router};
use http_body_util::BodyExt;
use serde_json::json;

use gympro::backend::{InMemoryBackend, SharedBackend};
use gympro::routes;
use gympro::session::AuthEvents;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<InMemoryBackend>,
    pub events: AuthEvents,
}

pub fn create_test_app() -> TestApp {
    let backend = Arc::new(InMemoryBackend::new());
    let events = AuthEvents::new();
    let shared: SharedBackend = backend.clone();
    let router = routes::create_app(shared, events.clone());

    TestApp {
        router,
        backend,
        events,
    }
}

pub struct Member {
    pub id: String,
    pub cookie: String,
}

/// Creates a user with a profile row and a live session cookie.
pub async fn create_member(
    backend: &InMemoryBackend,
    email: &str,
    full_name: &str,
    membership_type: &str,
) -> Member {
    let user = backend.create_user(email, PASSWORD).await;
    backend
        .seed(
            "profiles",
            vec![json!({
                "id": user.id,
                "full_name": full_name,
                "membership_type": membership_type,
            })],
        )
        .await;
    let token = backend.issue_token(&user.id).await;

    Member {
        id: user.id,
        cookie: format!("session={}", token),
    }
}

pub async fn seed_catalog(backend: &InMemoryBackend) {
    backend
        .seed(
            "exercises",
            vec![
                json!({
                    "id": "ex-squat",
                    "name": "Squat",
                    "description": "Barbell back squat",
                    "difficulty": "intermediate",
                    "target_muscle": "Legs",
                }),
                json!({
                    "id": "ex-bench",
                    "name": "Bench Press",
                    "description": "Flat barbell bench press",
                    "difficulty": "beginner",
                    "target_muscle": "Chest",
                }),
                json!({
                    "id": "ex-deadlift",
                    "name": "Deadlift",
                    "description": null,
                    "difficulty": "advanced",
                    "target_muscle": "Back",
                }),
            ],
        )
        .await;
}

pub async fn body_string(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&body).to_string()
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}
