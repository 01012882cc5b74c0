use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::backend::{BackendError, SharedBackend};
use crate::error::AppError;
use crate::session::{get_session_token, remove_session_cookie};

/// The signed-in member, resolved through the backend on every request.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub access_token: String,
}

/// `Ok(None)` when there is no session cookie or the backend rejects it.
async fn lookup(parts: &mut Parts) -> Result<Option<AuthUser>, BackendError> {
    let Some(backend) = parts.extensions.get::<SharedBackend>().cloned() else {
        tracing::error!("Backend extension is not installed on the router");
        return Err(BackendError::Unavailable);
    };

    let jar = CookieJar::from_headers(&parts.headers);
    let Some(token) = get_session_token(&jar) else {
        return Ok(None);
    };

    let user = backend.get_user(&token).await?;
    Ok(user.map(|user| AuthUser {
        id: user.id,
        email: user.email,
        access_token: token,
    }))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match lookup(parts).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AuthRedirect.into_response()),
            Err(e) => Err(AppError::Backend(e).into_response()),
        }
    }
}

/// Sends the visitor to the login page and drops any stale session cookie.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let jar = CookieJar::new().add(remove_session_cookie());
        (jar, Redirect::to("/login")).into_response()
    }
}

// Optional auth - doesn't redirect, just returns None if not logged in
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match lookup(parts).await {
            Ok(user) => Ok(OptionalAuthUser(user)),
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                Ok(OptionalAuthUser(None))
            }
        }
    }
}
