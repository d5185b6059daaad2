use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ExtraParams;

/// Snapshot of one table's translated query context.
///
/// Captured on every grid-driven fetch and handed back by refresh flows so an
/// equivalent query can be replayed without the grid re-issuing its request.
/// A snapshot is pure data: no behavior, no external references, and only
/// field values matter for replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
    /// Deep copy of the sort model the clause was derived from.
    pub sort_model: Vec<Value>,
    /// Deep copy of the effective (override-applied) filter model.
    pub filter_model: Map<String, Value>,
    /// Sort clause exactly as sent to the remote API, if any.
    pub sort_sql: Option<String>,
    /// Filter clause exactly as sent to the remote API, if any.
    pub filter_sql: Option<String>,
    /// Extra parameters emitted by custom handlers at snapshot time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_params: Option<ExtraParams>,
    /// Sorted keys of `extra_params`, kept so a refresh can remove stale
    /// entries before re-applying fresh handler output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_param_keys: Option<Vec<String>>,
    /// Page size of the fetch that produced this snapshot; attached post-hoc
    /// by callers that know the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}
