use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gridgate_domain::TableState;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// One fetched grid page plus the snapshot the client replays on refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRowsResponse {
    pub row_data: Vec<Value>,
    pub row_count: Option<u64>,
    pub table_state: TableState,
    pub fetched_at: DateTime<Utc>,
}

/// Incoming payload for a table refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTableRequest {
    #[serde(default)]
    pub table_state: TableState,
}

/// Refreshed first page of a table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRowsResponse {
    pub row_data: Vec<Value>,
    pub row_count: Option<u64>,
    pub fetched_at: DateTime<Utc>,
}
