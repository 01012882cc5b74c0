use askama::Template;
use axum::response::Html;

use crate::error::{AppError, Result};

pub mod auth;
pub mod dashboard;
pub mod exercises;
pub mod health;
pub mod home;
pub mod setup;

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(e.to_string()))
}
