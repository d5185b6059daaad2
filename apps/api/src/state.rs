use gridgate_application::TableQueryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub table_query_service: TableQueryService,
}
