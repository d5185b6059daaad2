use async_trait::async_trait;
use serde_json::Value;

use gridgate_core::{AccessToken, AppResult};
use gridgate_domain::{RequestParams, TableKind};

/// One page of rows from the remote tabular API.
#[derive(Debug, Clone, Default)]
pub struct TablePage {
    /// Raw row objects, passed through untouched.
    pub rows: Vec<Value>,
    /// Total matching row count, when the remote API reports one.
    pub total: Option<u64>,
}

/// Outbound port for fetching table rows from the remote API.
#[async_trait]
pub trait TableDataGateway: Send + Sync {
    /// Fetches one page of rows for `table` using the translated `params`.
    async fn fetch_rows(
        &self,
        table: TableKind,
        params: &RequestParams,
        token: &AccessToken,
    ) -> AppResult<TablePage>;
}
