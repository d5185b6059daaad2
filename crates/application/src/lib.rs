//! Application services for grid request translation and row fetching.

#![forbid(unsafe_code)]

mod grid_query;
mod ports;
mod table_policy;
mod table_query_service;

pub use grid_query::{
    CLAUSE_JOINER, FilterHandler, FilterHandlerOutput, FilterHandlerRegistry, Pagination,
    build_filter_clause, build_grid_request_params, build_refresh_request_params,
    build_sort_clause, build_table_state, compute_pagination, sanitize_like_pattern,
    sanitize_value,
};
pub use ports::{TableDataGateway, TablePage};
pub use table_policy::{DEFAULT_PAGE_SIZE, TableQueryPolicy};
pub use table_query_service::TableQueryService;
