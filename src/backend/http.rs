use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};

use super::{AuthSession, Backend, BackendError, BackendResult, BackendUser, Query};
use crate::config::BackendConfig;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// REST client for the hosted service: auth under `/auth/v1`, tables under
/// `/rest/v1`.
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(BackendError::Request)?;

        Ok(Self { client, config })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    /// Every call carries the public key; the bearer is the user's access
    /// token when there is one.
    fn request(&self, method: Method, url: &str, access_token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token.unwrap_or(&self.config.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Response> {
        request.send().await.map_err(BackendError::from_reqwest)
    }

    async fn read_json(response: Response) -> BackendResult<Value> {
        let bytes = response.bytes().await.map_err(BackendError::from_reqwest)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn api_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::Api {
            status,
            message: error_message(&body),
        }
    }
}

/// Pulls the human-readable message out of an auth or PostgREST error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}

/// The token endpoint answers 400 for several failures; only a wrong email or
/// password counts as bad credentials.
fn is_invalid_credentials(body: &str) -> bool {
    let error_code = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error_code").and_then(Value::as_str).map(str::to_string));
    if let Some(code) = error_code {
        return code == "invalid_credentials";
    }

    let message = error_message(body);
    message.eq_ignore_ascii_case("Invalid login credentials") || message == "invalid_grant"
}

#[async_trait]
impl Backend for HttpBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> BackendResult<Option<AuthSession>> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });
        let response = self
            .send(
                self.request(Method::POST, &self.auth_url("signup"), None)
                    .json(&body),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let value = Self::read_json(response).await?;
        if value.get("access_token").is_some() {
            Ok(Some(serde_json::from_value(value)?))
        } else {
            tracing::debug!("Sign-up accepted, awaiting e-mail confirmation");
            Ok(None)
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<AuthSession> {
        let response = self
            .send(
                self.request(
                    Method::POST,
                    &self.auth_url("token?grant_type=password"),
                    None,
                )
                .json(&PasswordCredentials { email, password }),
            )
            .await?;

        match response.status() {
            s if s.is_success() => Ok(serde_json::from_value(Self::read_json(response).await?)?),
            StatusCode::UNAUTHORIZED => Err(BackendError::InvalidCredentials),
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                if is_invalid_credentials(&body) {
                    Err(BackendError::InvalidCredentials)
                } else {
                    Err(BackendError::Api {
                        status: StatusCode::BAD_REQUEST.as_u16(),
                        message: error_message(&body),
                    })
                }
            }
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn get_user(&self, access_token: &str) -> BackendResult<Option<BackendUser>> {
        let response = self
            .send(self.request(Method::GET, &self.auth_url("user"), Some(access_token)))
            .await?;

        match response.status() {
            s if s.is_success() => Ok(Some(serde_json::from_value(
                Self::read_json(response).await?,
            )?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> BackendResult<()> {
        let response = self
            .send(self.request(Method::POST, &self.auth_url("logout"), Some(access_token)))
            .await?;

        match response.status() {
            // An already expired token has nothing left to revoke
            s if s.is_success() || s == StatusCode::UNAUTHORIZED => Ok(()),
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn select(&self, access_token: Option<&str>, query: &Query) -> BackendResult<Vec<Value>> {
        let mut request = self
            .request(Method::GET, &self.rest_url(query.table()), access_token)
            .query(&query.to_query_pairs());
        if query.is_single() {
            request = request.header(header::ACCEPT, SINGLE_OBJECT);
        }

        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        match Self::read_json(response).await? {
            Value::Array(rows) => Ok(rows),
            row @ Value::Object(_) if query.is_single() => Ok(vec![row]),
            other => Err(BackendError::Api {
                status: 200,
                message: format!("unexpected response shape: {}", other),
            }),
        }
    }

    async fn insert(
        &self,
        access_token: Option<&str>,
        table: &str,
        rows: Vec<Value>,
    ) -> BackendResult<()> {
        let response = self
            .send(
                self.request(Method::POST, &self.rest_url(table), access_token)
                    .header("Prefer", "return=minimal")
                    .json(&rows),
            )
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }
}
