use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the hosted data/auth service.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` until both the service URL and the public key are set.
    pub backend: Option<BackendConfig>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = non_blank("BACKEND_URL").or_else(|| non_blank("SUPABASE_URL"));
        let anon_key = non_blank("BACKEND_ANON_KEY").or_else(|| non_blank("SUPABASE_ANON_KEY"));
        let timeout_secs = non_blank("BACKEND_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let backend = match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                request_timeout: Duration::from_secs(timeout_secs),
            }),
            _ => None,
        };

        Self {
            backend,
            host: non_blank("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: non_blank("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    pub fn is_backend_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
