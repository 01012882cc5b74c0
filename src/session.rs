use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use tokio::sync::broadcast;

pub const SESSION_COOKIE_NAME: &str = "session";

const EVENT_CAPACITY: usize = 64;

pub fn create_session_cookie(access_token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, access_token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(7))
        .build()
}

pub fn get_session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

pub fn remove_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// A change in who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn { user_id: String },
    SignedOut,
}

/// Fan-out of auth state changes. Subscribers stop receiving once they drop
/// their receiver.
#[derive(Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl AuthEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: AuthEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs every auth change until the channel closes.
pub async fn observe_auth_events(mut receiver: broadcast::Receiver<AuthEvent>) {
    loop {
        match receiver.recv().await {
            Ok(AuthEvent::SignedIn { user_id }) => {
                tracing::info!(user_id = %user_id, "User signed in");
            }
            Ok(AuthEvent::SignedOut) => tracing::info!("User signed out"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Auth event observer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
