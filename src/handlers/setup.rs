use askama::Template;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::render;
use crate::error::Result;

#[derive(Template)]
#[template(path = "setup.html")]
struct SetupTemplate {
    variables: &'static [&'static str],
}

/// Shown for every path while the backend connection is not configured.
pub async fn placeholder() -> Result<Response> {
    let template = SetupTemplate {
        variables: &["BACKEND_URL", "BACKEND_ANON_KEY"],
    };
    Ok((StatusCode::SERVICE_UNAVAILABLE, render(&template)?).into_response())
}
