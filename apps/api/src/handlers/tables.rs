use axum::extract::{Extension, Path, State};
use axum::Json;
use chrono::Utc;

use gridgate_core::AccessToken;
use gridgate_domain::{GridRowRequest, TableKind};

use crate::dto::{GridRowsResponse, RefreshRowsResponse, RefreshTableRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn table_rows_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Extension(token): Extension<AccessToken>,
    Json(request): Json<GridRowRequest>,
) -> ApiResult<Json<GridRowsResponse>> {
    let table = TableKind::parse_transport(&table)?;
    let (page, table_state) = state
        .table_query_service
        .fetch_rows(table, &request, &token)
        .await?;

    Ok(Json(GridRowsResponse {
        row_data: page.rows,
        row_count: page.total,
        table_state,
        fetched_at: Utc::now(),
    }))
}

pub async fn refresh_table_handler(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Extension(token): Extension<AccessToken>,
    Json(request): Json<RefreshTableRequest>,
) -> ApiResult<Json<RefreshRowsResponse>> {
    let table = TableKind::parse_transport(&table)?;
    let page = state
        .table_query_service
        .refresh_rows(table, &request.table_state, &token)
        .await?;

    Ok(Json(RefreshRowsResponse {
        row_data: page.rows,
        row_count: page.total,
        fetched_at: Utc::now(),
    }))
}
