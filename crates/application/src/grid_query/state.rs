use serde_json::{Map, Value};

use gridgate_domain::{ExtraParams, TableState};

/// Captures the translated query context for later refresh replay.
///
/// Models are deep-copied so later in-place mutation by the caller's UI
/// framework cannot corrupt the snapshot; clause strings are stored verbatim
/// without recomputation. When extra params are present their sorted key list
/// is stored alongside, so a refresh can strip entries that a fresh rebuild
/// no longer emits.
#[must_use]
pub fn build_table_state(
    sort_model: &[Value],
    filter_model: &Map<String, Value>,
    sort_sql: Option<&str>,
    filter_sql: Option<&str>,
    extra_params: &ExtraParams,
) -> TableState {
    let mut state = TableState {
        sort_model: sort_model.to_vec(),
        filter_model: filter_model.clone(),
        sort_sql: sort_sql.map(str::to_owned),
        filter_sql: filter_sql.map(str::to_owned),
        ..TableState::default()
    };

    if !extra_params.is_empty() {
        let mut keys: Vec<String> = extra_params.keys().cloned().collect();
        keys.sort();
        state.extra_params = Some(extra_params.clone());
        state.extra_param_keys = Some(keys);
    }

    state
}
