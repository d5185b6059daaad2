//! Translation of grid row requests into remote API query parameters.
//!
//! The functions here are pure and never fail: malformed input degrades to a
//! default or a dropped fragment, because one bad filter field must not abort
//! the whole page's data fetch. Refresh flows replay a previously captured
//! [`TableState`] instead of re-deriving the query from live grid state.

mod filter;
mod handler;
mod pagination;
mod sanitize;
mod sort;
mod state;


use serde_json::{Map, Value};

use gridgate_domain::{ExtraParams, GridRowRequest, RequestParams, TableState};

use crate::table_policy::TableQueryPolicy;

pub use filter::{CLAUSE_JOINER, build_filter_clause};
pub use handler::{FilterHandler, FilterHandlerOutput, FilterHandlerRegistry};
pub use pagination::{Pagination, compute_pagination};
pub use sanitize::{sanitize_like_pattern, sanitize_value};
pub use sort::build_sort_clause;
pub use state::build_table_state;

/// Builds remote API params and a replayable snapshot from a fresh grid
/// request.
///
/// Pagination keys are applied after the policy's base params so they win on
/// conflict. Filter overrides from the policy are applied on top of the
/// client's filter model before translation, and the snapshot captures that
/// effective model, so a later refresh replays the authorization-safe
/// version, not the raw client request.
#[must_use]
pub fn build_grid_request_params(
    request: &GridRowRequest,
    policy: &TableQueryPolicy,
) -> (RequestParams, TableState) {
    let pagination = compute_pagination(request, policy.default_page_size());

    let mut params = policy.base_params().clone();
    params.insert("page".to_owned(), Value::from(pagination.page));
    params.insert("per_page".to_owned(), Value::from(pagination.page_size));

    let sort_sql = build_sort_clause(&request.sort_model, policy.allowed_sort_columns());
    if let Some(sort) = &sort_sql {
        params.insert("sort".to_owned(), Value::from(sort.clone()));
    }

    let mut filter_model = request.filter_model.clone();
    for (column, descriptor) in policy.filter_model_overrides() {
        filter_model.insert(column.clone(), descriptor.clone());
    }

    let mut filter_sql = None;
    let mut extra_params = ExtraParams::new();
    if policy.allow_filters() && !filter_model.is_empty() {
        let (clause, extras) = build_filter_clause(
            &filter_model,
            policy.allowed_filter_columns(),
            CLAUSE_JOINER,
            policy.custom_filter_handlers(),
        );
        if let Some(clause) = &clause {
            params.insert("filter".to_owned(), Value::from(clause.clone()));
        }
        for (key, value) in &extras {
            params.insert(key.clone(), value.clone());
        }
        filter_sql = clause;
        extra_params = extras;
    }

    let empty_model = Map::new();
    let snapshot_model = if policy.allow_filters() {
        &filter_model
    } else {
        &empty_model
    };
    let table_state = build_table_state(
        &request.sort_model,
        snapshot_model,
        sort_sql.as_deref(),
        filter_sql.as_deref(),
        &extra_params,
    );

    (params, table_state)
}

/// Rebuilds remote API params from a stored snapshot for refresh flows.
///
/// The filter clause is recomputed from the snapshot's filter model merged
/// with `additional_filters` rather than replayed verbatim, since the merge
/// may change the effective model. Extra params recorded at snapshot time are
/// removed first and only re-applied if the fresh rebuild still emits them,
/// so stale handler output cannot leak into the refreshed query.
#[must_use]
pub fn build_refresh_request_params(
    policy: &TableQueryPolicy,
    table_state: Option<&TableState>,
    additional_filters: Option<&Map<String, Value>>,
) -> RequestParams {
    let mut params = policy.base_params().clone();
    let mut filter_model: Map<String, Value> = Map::new();

    if let Some(state) = table_state {
        if let Some(sort_sql) = state.sort_sql.as_deref().filter(|sql| !sql.is_empty()) {
            params.insert("sort".to_owned(), Value::from(sort_sql));
        }
        if policy.allow_filters()
            && let Some(filter_sql) = state.filter_sql.as_deref().filter(|sql| !sql.is_empty())
        {
            params.insert("filter".to_owned(), Value::from(filter_sql));
        }
        if let Some(keys) = &state.extra_param_keys {
            for key in keys {
                params.remove(key);
            }
        }
        if policy.allow_filters() {
            if let Some(extras) = &state.extra_params {
                for (key, value) in extras {
                    params.insert(key.clone(), value.clone());
                }
            }
            filter_model = state.filter_model.clone();
        }
    }

    if !policy.allow_filters() {
        return params;
    }

    if let Some(additional) = additional_filters {
        for (column, descriptor) in additional {
            filter_model.insert(column.clone(), descriptor.clone());
        }
    }

    if filter_model.is_empty() {
        params.remove("filter");
        return params;
    }

    let (filter_sql, extra_params) = build_filter_clause(
        &filter_model,
        policy.allowed_filter_columns(),
        CLAUSE_JOINER,
        policy.custom_filter_handlers(),
    );

    match &filter_sql {
        Some(clause) => {
            params.insert("filter".to_owned(), Value::from(clause.clone()));
        }
        None => {
            params.remove("filter");
        }
    }

    if let Some(state) = table_state
        && let Some(keys) = &state.extra_param_keys
    {
        for key in keys {
            if !extra_params.contains_key(key) {
                params.remove(key);
            }
        }
    }

    for (key, value) in &extra_params {
        params.insert(key.clone(), value.clone());
    }

    params
}
