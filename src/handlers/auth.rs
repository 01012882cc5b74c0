use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;

use super::render;
use crate::backend::{AuthSession, BackendError, SharedBackend};
use crate::error::Result;
use crate::middleware::OptionalAuthUser;
use crate::models::{LoginCredentials, RegisterUser};
use crate::repositories::ProfileRepository;
use crate::session::{
    create_session_cookie, get_session_token, remove_session_cookie, AuthEvent, AuthEvents,
};

#[derive(Clone)]
pub struct AuthState {
    pub backend: SharedBackend,
    pub profile_repo: ProfileRepository,
    pub events: AuthEvents,
}

// Templates
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    signed_in: bool,
    email: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    signed_in: bool,
    full_name: String,
    email: String,
    error: Option<String>,
    notice: Option<String>,
}

impl LoginTemplate {
    fn new(email: &str, error: Option<&str>) -> Self {
        Self {
            signed_in: false,
            email: email.to_string(),
            error: error.map(str::to_string),
        }
    }
}

impl RegisterTemplate {
    fn new(form: Option<&RegisterUser>) -> Self {
        Self {
            signed_in: false,
            full_name: form.map(|f| f.full_name.clone()).unwrap_or_default(),
            email: form.map(|f| f.email.clone()).unwrap_or_default(),
            error: None,
            notice: None,
        }
    }
}

impl AuthState {
    /// Stores the session cookie and announces the sign-in.
    fn start_session(&self, jar: CookieJar, session: &AuthSession) -> CookieJar {
        self.events.publish(AuthEvent::SignedIn {
            user_id: session.user.id.clone(),
        });
        jar.add(create_session_cookie(&session.access_token))
    }
}

// Handlers
pub async fn login_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    Ok(render(&LoginTemplate::new("", None))?.into_response())
}

pub async fn login_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(credentials): Form<LoginCredentials>,
) -> Result<Response> {
    let email = credentials.email.trim();

    match state
        .backend
        .sign_in_with_password(email, &credentials.password)
        .await
    {
        Ok(session) => {
            let jar = state.start_session(jar, &session);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(BackendError::InvalidCredentials) => {
            let template = LoginTemplate::new(email, Some("Invalid login credentials"));
            Ok(render(&template)?.into_response())
        }
        Err(BackendError::Api { status, message }) if (400..500).contains(&status) => {
            let template = LoginTemplate::new(email, Some(message.as_str()));
            Ok(render(&template)?.into_response())
        }
        Err(e) => {
            tracing::error!("Error signing in: {}", e);
            let template = LoginTemplate::new(
                email,
                Some("Unable to sign in right now. Please try again."),
            );
            Ok(render(&template)?.into_response())
        }
    }
}

pub async fn register_page(OptionalAuthUser(auth_user): OptionalAuthUser) -> Result<Response> {
    if auth_user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    Ok(render(&RegisterTemplate::new(None))?.into_response())
}

pub async fn register_submit(
    State(state): State<AuthState>,
    jar: CookieJar,
    Form(form): Form<RegisterUser>,
) -> Result<Response> {
    if let Err(message) = form.validate() {
        let template = RegisterTemplate {
            error: Some(message.to_string()),
            ..RegisterTemplate::new(Some(&form))
        };
        return Ok(render(&template)?.into_response());
    }

    let email = form.email.trim();
    let full_name = form.full_name.trim();

    match state.backend.sign_up(email, &form.password, full_name).await {
        Ok(Some(session)) => {
            if let Err(e) = state
                .profile_repo
                .create(&session.access_token, &session.user.id, full_name)
                .await
            {
                tracing::error!("Error creating profile: {}", e);
            }

            let jar = state.start_session(jar, &session);
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Ok(None) => {
            let template = RegisterTemplate {
                notice: Some(
                    "Check your email to confirm your account, then log in.".to_string(),
                ),
                ..RegisterTemplate::new(None)
            };
            Ok(render(&template)?.into_response())
        }
        Err(BackendError::Api { status, message }) if (400..500).contains(&status) => {
            let template = RegisterTemplate {
                error: Some(message),
                ..RegisterTemplate::new(Some(&form))
            };
            Ok(render(&template)?.into_response())
        }
        Err(e) => {
            tracing::error!("Error registering: {}", e);
            let template = RegisterTemplate {
                error: Some("Unable to register right now. Please try again.".to_string()),
                ..RegisterTemplate::new(Some(&form))
            };
            Ok(render(&template)?.into_response())
        }
    }
}

pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> Response {
    if let Some(token) = get_session_token(&jar) {
        if let Err(e) = state.backend.sign_out(&token).await {
            tracing::error!("Error signing out: {}", e);
        }
    }
    state.events.publish(AuthEvent::SignedOut);

    let jar = jar.add(remove_session_cookie());
    (jar, Redirect::to("/login")).into_response()
}
