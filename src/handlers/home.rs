use askama::Template;
use axum::response::{IntoResponse, Response};

use super::render;
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuthUser;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    signed_in: bool,
}

pub async fn index(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    let template = HomeTemplate {
        signed_in: auth_user.is_some(),
    };
    Ok(render(&template)?.into_response())
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
