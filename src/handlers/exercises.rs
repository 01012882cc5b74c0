use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::render;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{AddToRoutine, Exercise};
use crate::repositories::{ExerciseRepository, RoutineRepository};

const ADDED_NOTICE: &str = "Exercise added to your routine!";
const ADD_FAILED: &str = "Failed to add exercise. Please try again.";

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
    pub routine_repo: RoutineRepository,
}

#[derive(Template)]
#[template(path = "exercises/list.html")]
struct ExercisesTemplate {
    signed_in: bool,
    exercises: Vec<Exercise>,
    form: AddToRoutine,
    notice: Option<&'static str>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    added: Option<String>,
}

impl ExercisesState {
    async fn load_catalog(&self, auth_user: &AuthUser) -> Vec<Exercise> {
        self.exercise_repo
            .find_all(&auth_user.access_token)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Error fetching exercises: {}", e);
                Vec::new()
            })
    }
}

pub async fn list(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let template = ExercisesTemplate {
        signed_in: true,
        exercises: state.load_catalog(&auth_user).await,
        form: AddToRoutine::default(),
        notice: params.added.map(|_| ADDED_NOTICE),
        error: None,
    };

    Ok(render(&template)?.into_response())
}

pub async fn add_to_routine(
    State(state): State<ExercisesState>,
    auth_user: AuthUser,
    Form(form): Form<AddToRoutine>,
) -> Result<Response> {
    if !form.has_selection() {
        return Ok(Redirect::to("/exercises").into_response());
    }

    let error = match form.to_entry(&auth_user.id) {
        Err(message) => message,
        Ok(entry) => match state.routine_repo.add(&auth_user.access_token, &entry).await {
            Ok(()) => {
                tracing::info!(
                    exercise_id = %entry.exercise_id,
                    sets = entry.sets,
                    reps = entry.reps,
                    "Exercise added to routine"
                );
                return Ok(Redirect::to("/exercises?added=1").into_response());
            }
            Err(e) => {
                tracing::error!("Error adding exercise: {}", e);
                ADD_FAILED.to_string()
            }
        },
    };

    let template = ExercisesTemplate {
        signed_in: true,
        exercises: state.load_catalog(&auth_user).await,
        form,
        notice: None,
        error: Some(error),
    };

    Ok(render(&template)?.into_response())
}
