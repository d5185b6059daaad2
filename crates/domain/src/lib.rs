//! Domain model for server-side grid requests and table snapshots.

#![forbid(unsafe_code)]

mod filter;
mod grid;
mod table;
mod table_state;

pub use filter::{
    DateCondition, DateFilter, FilterDescriptor, NumberCondition, NumberFilter, SetFilter,
    TextCondition, TextFilter,
};
pub use grid::{GridRowRequest, SortDescriptor, SortDirection, coerce_row_index};
pub use table::TableKind;
pub use table_state::TableState;

/// Final flat parameter mapping handed to the HTTP layer.
///
/// Backed by an insertion-ordered map so parameters appear on the wire in the
/// order they were produced.
pub type RequestParams = serde_json::Map<String, serde_json::Value>;

/// Additional query parameters emitted by custom filter handlers, for fields
/// whose remote semantics use a dedicated parameter instead of a filter
/// clause.
pub type ExtraParams = serde_json::Map<String, serde_json::Value>;
