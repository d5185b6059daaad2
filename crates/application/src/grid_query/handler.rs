use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde_json::Value;

use gridgate_domain::ExtraParams;

/// Output of a custom per-column filter handler: an optional clause fragment
/// and/or dedicated query parameters.
#[derive(Debug, Clone, Default)]
pub struct FilterHandlerOutput {
    /// Clause fragment to join into the filter string, if any.
    pub clause: Option<String>,
    /// Dedicated query parameters to merge into the request, if any.
    pub extra_params: ExtraParams,
}

impl FilterHandlerOutput {
    /// Output with a single clause fragment.
    #[must_use]
    pub fn clause(clause: impl Into<String>) -> Self {
        Self {
            clause: Some(clause.into()),
            extra_params: ExtraParams::new(),
        }
    }
}

/// Shared handler closure translating one column's raw filter descriptor.
pub type FilterHandler = Arc<dyn Fn(&Value) -> FilterHandlerOutput + Send + Sync>;

/// Column-keyed registry of custom filter handlers.
///
/// Handlers are the escape hatch for fields whose remote semantics do not fit
/// the generic clause grammar, such as enum fields backed by a dedicated
/// query parameter. A registered handler takes over translation of its column
/// entirely.
#[derive(Clone, Default)]
pub struct FilterHandlerRegistry {
    handlers: BTreeMap<String, FilterHandler>,
}

impl FilterHandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `column`, replacing any previous one.
    pub fn register(
        &mut self,
        column: impl Into<String>,
        handler: impl Fn(&Value) -> FilterHandlerOutput + Send + Sync + 'static,
    ) {
        self.handlers.insert(column.into(), Arc::new(handler));
    }

    /// Returns the handler registered for `column`, if any.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FilterHandler> {
        self.handlers.get(column)
    }

    /// Returns whether the registry has no handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Debug for FilterHandlerRegistry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FilterHandlerRegistry")
            .field("columns", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
