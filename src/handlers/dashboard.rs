use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use super::render;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{Profile, RoutineEntry};
use crate::repositories::{ProfileRepository, RoutineRepository};

const RECENT_ENTRIES: usize = 5;

#[derive(Clone)]
pub struct DashboardState {
    pub profile_repo: ProfileRepository,
    pub routine_repo: RoutineRepository,
}

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    signed_in: bool,
    profile: Option<Profile>,
    recent_entries: Vec<RoutineEntry>,
}

/// Fetch failures are logged and the page renders with whatever loaded.
pub async fn index(State(state): State<DashboardState>, auth_user: AuthUser) -> Result<Response> {
    let profile = match state
        .profile_repo
        .find_by_id(&auth_user.access_token, &auth_user.id)
        .await
    {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::error!("Error fetching profile: {}", e);
            None
        }
    };

    let recent_entries = state
        .routine_repo
        .find_recent(&auth_user.access_token, &auth_user.id, RECENT_ENTRIES)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching routine entries: {}", e);
            Vec::new()
        });

    let template = DashboardTemplate {
        signed_in: true,
        profile,
        recent_entries,
    };

    Ok(render(&template)?.into_response())
}
