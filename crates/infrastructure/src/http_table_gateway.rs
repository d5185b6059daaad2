use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use gridgate_application::{TableDataGateway, TablePage};
use gridgate_core::{AccessToken, AppError, AppResult};
use gridgate_domain::{RequestParams, TableKind};

/// HTTP gateway fetching table rows from the remote tabular API.
pub struct HttpTableGateway {
    http_client: reqwest::Client,
    base_url: String,
    max_attempts: u8,
    retry_backoff_ms: u64,
}

/// Response envelope used by the remote API for all list endpoints.
#[derive(Debug, Deserialize)]
struct TableEnvelope {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    total: Option<u64>,
}

impl HttpTableGateway {
    /// Creates a new table gateway.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        max_attempts: u8,
        retry_backoff_ms: u64,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts: max_attempts.max(1),
            retry_backoff_ms: retry_backoff_ms.max(50),
        }
    }

    fn endpoint_url(&self, table: TableKind) -> String {
        format!("{}/{}", self.base_url, table.endpoint())
    }

    async fn fetch_with_retry(
        &self,
        url: &str,
        pairs: &[(String, String)],
        token: &AccessToken,
    ) -> AppResult<TableEnvelope> {
        let mut attempt = 0_u8;
        let mut last_error: Option<String> = None;

        while attempt < self.max_attempts {
            attempt = attempt.saturating_add(1);
            let response = self
                .http_client
                .get(url)
                .query(pairs)
                .bearer_auth(token.as_str())
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    return response.json::<TableEnvelope>().await.map_err(|error| {
                        AppError::Internal(format!(
                            "remote API returned an unreadable row payload: {error}"
                        ))
                    });
                }
                Ok(response)
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS =>
                {
                    last_error = Some(format!(
                        "transient HTTP status {} from {url}",
                        response.status()
                    ));
                    warn!(%url, attempt, status = %response.status(), "retrying table fetch");
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
                    return Err(map_status(status, &body));
                }
                Err(error) => {
                    last_error = Some(format!("table fetch transport error: {error}"));
                    warn!(%url, attempt, %error, "retrying table fetch");
                }
            }

            if attempt < self.max_attempts {
                let delay = self.retry_backoff_ms.saturating_mul(u64::from(attempt));
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        Err(AppError::Internal(last_error.unwrap_or_else(|| {
            "table fetch exhausted retries".to_owned()
        })))
    }
}

/// Flattens translated params into query pairs. Strings pass through
/// unquoted; everything else uses its JSON rendering.
fn query_pairs(params: &RequestParams) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

fn map_status(status: reqwest::StatusCode, body: &str) -> AppError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            AppError::Unauthorized("remote API rejected the access token".to_owned())
        }
        reqwest::StatusCode::FORBIDDEN => {
            AppError::Forbidden("remote API denied access to this table".to_owned())
        }
        reqwest::StatusCode::NOT_FOUND => {
            AppError::NotFound("remote API endpoint not found".to_owned())
        }
        _ => AppError::Internal(format!("table fetch failed with status {status}: {body}")),
    }
}

#[async_trait]
impl TableDataGateway for HttpTableGateway {
    async fn fetch_rows(
        &self,
        table: TableKind,
        params: &RequestParams,
        token: &AccessToken,
    ) -> AppResult<TablePage> {
        let url = self.endpoint_url(table);
        let pairs = query_pairs(params);
        let envelope = self.fetch_with_retry(&url, &pairs, token).await?;

        Ok(TablePage {
            rows: envelope.data,
            total: envelope.total,
        })
    }
}
