use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::backend::SharedBackend;
use crate::handlers::{auth, dashboard, exercises, health, home, setup};
use crate::repositories::{ExerciseRepository, ProfileRepository, RoutineRepository};
use crate::session::AuthEvents;

pub fn create_router(
    auth_state: auth::AuthState,
    dashboard_state: dashboard::DashboardState,
    exercises_state: exercises::ExercisesState,
    backend: SharedBackend,
) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route(
            "/register",
            get(auth::register_page).post(auth::register_submit),
        )
        .route("/logout", post(auth::logout))
        .with_state(auth_state)
        // Dashboard
        .route("/dashboard", get(dashboard::index))
        .with_state(dashboard_state)
        // Exercise catalog and routine
        .route(
            "/exercises",
            get(exercises::list).post(exercises::add_to_routine),
        )
        .with_state(exercises_state)
        .fallback(home::not_found)
        // Session lookups resolve users through the shared backend
        .layer(Extension(backend))
        .layer(TraceLayer::new_for_http())
}

/// Router used until the backend connection is configured: every path
/// renders the setup instructions.
pub fn create_setup_router() -> Router {
    Router::new()
        .fallback(setup::placeholder)
        .layer(TraceLayer::new_for_http())
}

/// Wires repositories and handler states around one backend handle.
pub fn create_app(backend: SharedBackend, events: AuthEvents) -> Router {
    let profile_repo = ProfileRepository::new(backend.clone());
    let exercise_repo = ExerciseRepository::new(backend.clone());
    let routine_repo = RoutineRepository::new(backend.clone());

    let auth_state = auth::AuthState {
        backend: backend.clone(),
        profile_repo: profile_repo.clone(),
        events,
    };
    let dashboard_state = dashboard::DashboardState {
        profile_repo,
        routine_repo: routine_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo,
        routine_repo,
    };

    create_router(auth_state, dashboard_state, exercises_state, backend)
}
