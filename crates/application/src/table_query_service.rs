
use std::sync::Arc;

use serde_json::Value;

use gridgate_core::{AccessToken, AppResult};
use gridgate_domain::{GridRowRequest, TableKind, TableState};

use crate::grid_query::{build_grid_request_params, build_refresh_request_params};
use crate::ports::{TableDataGateway, TablePage};
use crate::table_policy::TableQueryPolicy;

/// Orchestrates grid request translation and row fetching for the dashboard
/// tables.
#[derive(Clone)]
pub struct TableQueryService {
    table_gateway: Arc<dyn TableDataGateway>,
}

impl TableQueryService {
    /// Creates the service with its outbound gateway.
    #[must_use]
    pub fn new(table_gateway: Arc<dyn TableDataGateway>) -> Self {
        Self { table_gateway }
    }

    /// Fetches one page of rows for a fresh grid request.
    ///
    /// Returns the page together with the replayable snapshot the client must
    /// hand back on refresh. The snapshot records the effective page size so a
    /// refresh reproduces the same window.
    pub async fn fetch_rows(
        &self,
        table: TableKind,
        request: &GridRowRequest,
        token: &AccessToken,
    ) -> AppResult<(TablePage, TableState)> {
        let policy = TableQueryPolicy::for_table(table);
        let (params, mut table_state) = build_grid_request_params(request, &policy);

        table_state.page_size = params
            .get("per_page")
            .and_then(Value::as_u64)
            .or(Some(policy.default_page_size()));

        let page = self.table_gateway.fetch_rows(table, &params, token).await?;
        Ok((page, table_state))
    }

    /// Re-fetches the first page for a previously captured snapshot.
    pub async fn refresh_rows(
        &self,
        table: TableKind,
        table_state: &TableState,
        token: &AccessToken,
    ) -> AppResult<TablePage> {
        let policy = TableQueryPolicy::for_table(table);
        let mut params = build_refresh_request_params(&policy, Some(table_state), None);

        let page_size = table_state
            .page_size
            .unwrap_or_else(|| policy.default_page_size());
        params.insert("page".to_owned(), Value::from(1));
        params.insert("per_page".to_owned(), Value::from(page_size));

        self.table_gateway.fetch_rows(table, &params, token).await
    }
}
