use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-side row fetch request emitted by the dashboard grid widget.
///
/// Field names and casing are fixed by the grid component's wire format. The
/// window fields stay raw [`Value`]s on purpose: a malformed field must
/// degrade to a default during translation instead of failing the whole
/// request at the deserialization boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridRowRequest {
    /// First row of the requested window (inclusive).
    pub start_row: Option<Value>,
    /// Last row of the requested window (exclusive); may be absent.
    pub end_row: Option<Value>,
    /// Ordered sort descriptors; the first entry is the primary sort key.
    pub sort_model: Vec<Value>,
    /// Column name to raw filter descriptor mapping, in UI insertion order.
    pub filter_model: Map<String, Value>,
}

/// Sort direction for one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parses a raw direction string; anything other than `desc`
    /// (case-insensitive) normalizes to ascending.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// Returns the remote API sort keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One parsed entry of the grid sort model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescriptor {
    /// Column identifier as submitted by the grid.
    pub col_id: String,
    /// Normalized sort direction.
    pub direction: SortDirection,
}

impl SortDescriptor {
    /// Lenient extraction from one raw sort model entry.
    ///
    /// Returns `None` when the entry is not an object or carries no usable
    /// column id; a missing direction defaults to ascending.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        let entry = raw.as_object()?;
        let col_id = entry
            .get("colId")
            .and_then(Value::as_str)
            .filter(|col_id| !col_id.is_empty())?
            .to_owned();
        let direction = entry
            .get("sort")
            .and_then(Value::as_str)
            .map_or(SortDirection::Asc, SortDirection::parse_lenient);

        Some(Self { col_id, direction })
    }
}

/// Coerces a raw grid row index, accepting integers, floats, and numeric
/// strings; anything else yields `None` so the caller can fall back to a
/// default instead of erroring.
#[must_use]
pub fn coerce_row_index(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(index) = value.as_i64() {
        return Some(index);
    }
    if let Some(index) = value.as_f64() {
        return Some(index as i64);
    }

    value.as_str()?.trim().parse::<i64>().ok()
}
