use std::env;

use gridgate_core::{AppError, AppResult};
use url::Url;

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub remote_api_base: String,
    pub request_timeout_secs: u64,
    pub retry_max_attempts: u8,
    pub retry_backoff_ms: u64,
}

impl ApiConfig {
    /// Loads configuration from environment variables, applying defaults for
    /// anything unset.
    pub fn load() -> AppResult<Self> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8050);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let remote_api_base = env::var("REMOTE_API_BASE")
            .unwrap_or_else(|_| "https://api.trends.earth/api/v1".to_owned());
        Url::parse(&remote_api_base)
            .map_err(|error| AppError::Validation(format!("invalid REMOTE_API_BASE: {error}")))?;

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30);
        let retry_max_attempts = env::var("RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(3);
        let retry_backoff_ms = env::var("RETRY_BACKOFF_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(200);

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            remote_api_base,
            request_timeout_secs,
            retry_max_attempts,
            retry_backoff_ms,
        })
    }
}
