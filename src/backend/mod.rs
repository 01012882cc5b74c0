//! Client binding for the hosted data/auth service.
//!
//! Everything the application persists or authenticates goes through the
//! [`Backend`] trait. [`HttpBackend`] talks to the real service over its REST
//! API; [`InMemoryBackend`] evaluates the same operations in process.

mod http;
mod memory;
mod query;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use query::{Order, Query};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type SharedBackend = Arc<dyn Backend>;

/// The authenticated user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: BackendUser,
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("service unavailable")]
    Unavailable,

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable
        } else {
            BackendError::Request(e)
        }
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[async_trait]
pub trait Backend: Send + Sync {
    /// Registers a new account. Returns `None` when the service issues no
    /// session until the e-mail address is confirmed.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> BackendResult<Option<AuthSession>>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
        -> BackendResult<AuthSession>;

    /// Resolves an access token. `Ok(None)` means the token was rejected.
    async fn get_user(&self, access_token: &str) -> BackendResult<Option<BackendUser>>;

    async fn sign_out(&self, access_token: &str) -> BackendResult<()>;

    async fn select(&self, access_token: Option<&str>, query: &Query)
        -> BackendResult<Vec<Value>>;

    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &str,
        rows: Vec<Value>,
    ) -> BackendResult<()>;
}
