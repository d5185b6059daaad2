use std::collections::BTreeSet;

use serde_json::{Map, Value};

use gridgate_domain::{DateCondition, FilterDescriptor, RequestParams, TableKind};

use crate::grid_query::{FilterHandlerOutput, FilterHandlerRegistry};

/// Page size used when a grid request carries no usable row window.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

const EXECUTION_STATUSES: [&str; 5] = ["PENDING", "RUNNING", "FINISHED", "FAILED", "CANCELLED"];
const USER_ROLES: [&str; 3] = ["USER", "ADMIN", "SUPERADMIN"];

const EXECUTION_COLUMNS: [&str; 8] = [
    "id",
    "script_name",
    "user_name",
    "user_email",
    "status",
    "start_date",
    "end_date",
    "duration",
];
const SCRIPT_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "slug",
    "status",
    "access_control",
    "user_name",
    "created_at",
];
const USER_COLUMNS: [&str; 7] = [
    "id",
    "email",
    "name",
    "institution",
    "country",
    "role",
    "created_at",
];

/// Per-table translation policy: base parameters, sort/filter allow-lists,
/// and custom filter handlers.
///
/// Allow-lists are an authorization boundary, not an error path: columns a
/// table chooses not to expose are silently dropped from sort and filter
/// translation. Filter overrides let a caller force a filter regardless of
/// what the grid submitted.
#[derive(Debug, Clone, Default)]
pub struct TableQueryPolicy {
    default_page_size: Option<u64>,
    base_params: RequestParams,
    allowed_sort_columns: Option<BTreeSet<String>>,
    disallow_filters: bool,
    allowed_filter_columns: Option<BTreeSet<String>>,
    filter_model_overrides: Map<String, Value>,
    custom_filter_handlers: FilterHandlerRegistry,
}

impl TableQueryPolicy {
    /// Creates a permissive policy: default page size, filters allowed, no
    /// allow-lists, no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the standard policy for one dashboard table.
    #[must_use]
    pub fn for_table(table: TableKind) -> Self {
        match table {
            TableKind::Executions => Self::new()
                .with_base_param("exclude", "params,results")
                .with_base_param("include", "user_name,script_name,user_email,duration")
                .with_allowed_sort_columns(EXECUTION_COLUMNS)
                .with_allowed_filter_columns(EXECUTION_COLUMNS)
                .with_filter_handler("status", enum_clause_handler("status", &EXECUTION_STATUSES))
                .with_filter_handler("start_date", date_param_handler("start_date"))
                .with_filter_handler("end_date", date_param_handler("end_date")),
            TableKind::Scripts => Self::new()
                .with_allowed_sort_columns(SCRIPT_COLUMNS)
                .with_allowed_filter_columns(SCRIPT_COLUMNS),
            TableKind::Users => Self::new()
                .with_allowed_sort_columns(USER_COLUMNS)
                .with_allowed_filter_columns(USER_COLUMNS)
                .with_filter_handler("role", enum_clause_handler("role", &USER_ROLES)),
        }
    }

    /// Overrides the fallback page size.
    #[must_use]
    pub fn with_default_page_size(mut self, page_size: u64) -> Self {
        self.default_page_size = Some(page_size);
        self
    }

    /// Adds a base query parameter; pagination keys win on conflict.
    #[must_use]
    pub fn with_base_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.base_params.insert(key.into(), value.into());
        self
    }

    /// Restricts server-side sorting to the given columns.
    #[must_use]
    pub fn with_allowed_sort_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_sort_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts server-side filtering to the given columns.
    #[must_use]
    pub fn with_allowed_filter_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_filter_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Disables filter translation entirely, regardless of what the client
    /// request or a stored snapshot carries.
    #[must_use]
    pub fn without_filters(mut self) -> Self {
        self.disallow_filters = true;
        self
    }

    /// Forces a filter descriptor for `column`, overriding whatever the grid
    /// submitted for it.
    #[must_use]
    pub fn with_filter_override(mut self, column: impl Into<String>, descriptor: Value) -> Self {
        self.filter_model_overrides.insert(column.into(), descriptor);
        self
    }

    /// Registers a custom filter handler for `column`.
    #[must_use]
    pub fn with_filter_handler(
        mut self,
        column: impl Into<String>,
        handler: impl Fn(&Value) -> FilterHandlerOutput + Send + Sync + 'static,
    ) -> Self {
        self.custom_filter_handlers.register(column, handler);
        self
    }

    /// Returns the fallback page size.
    #[must_use]
    pub fn default_page_size(&self) -> u64 {
        self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Returns the base query parameters.
    #[must_use]
    pub fn base_params(&self) -> &RequestParams {
        &self.base_params
    }

    /// Returns the sort allow-list, if one is configured.
    #[must_use]
    pub fn allowed_sort_columns(&self) -> Option<&BTreeSet<String>> {
        self.allowed_sort_columns.as_ref()
    }

    /// Returns whether filter translation is enabled.
    #[must_use]
    pub fn allow_filters(&self) -> bool {
        !self.disallow_filters
    }

    /// Returns the filter allow-list, if one is configured.
    #[must_use]
    pub fn allowed_filter_columns(&self) -> Option<&BTreeSet<String>> {
        self.allowed_filter_columns.as_ref()
    }

    /// Returns the forced filter descriptors.
    #[must_use]
    pub fn filter_model_overrides(&self) -> &Map<String, Value> {
        &self.filter_model_overrides
    }

    /// Returns the custom filter handler registry.
    #[must_use]
    pub fn custom_filter_handlers(&self) -> &FilterHandlerRegistry {
        &self.custom_filter_handlers
    }
}

/// Handler for enum-valued columns: uppercases and validates candidates
/// against the known value set, emitting an equality or OR clause. Values
/// outside the set produce no fragment at all.
fn enum_clause_handler(
    field: &'static str,
    allowed: &'static [&'static str],
) -> impl Fn(&Value) -> FilterHandlerOutput + Send + Sync + 'static {
    move |config| match FilterDescriptor::from_value(config) {
        Some(FilterDescriptor::Text(text)) => {
            let candidate = text.value.trim().to_uppercase();
            if allowed.contains(&candidate.as_str()) {
                FilterHandlerOutput::clause(format!("{field}='{candidate}'"))
            } else {
                FilterHandlerOutput::default()
            }
        }
        Some(FilterDescriptor::Set(set)) => {
            let fragments: Vec<String> = set
                .values
                .iter()
                .map(|value| value.trim().to_uppercase())
                .filter(|value| allowed.contains(&value.as_str()))
                .map(|value| format!("{field}='{value}'"))
                .collect();
            if fragments.is_empty() {
                FilterHandlerOutput::default()
            } else {
                FilterHandlerOutput::clause(format!("({})", fragments.join(" OR ")))
            }
        }
        _ => FilterHandlerOutput::default(),
    }
}

/// Handler for date columns backed by dedicated `{field}_gte`/`{field}_lte`
/// parameters on the remote API instead of filter-grammar fragments.
fn date_param_handler(
    field: &'static str,
) -> impl Fn(&Value) -> FilterHandlerOutput + Send + Sync + 'static {
    move |config| {
        let mut output = FilterHandlerOutput::default();
        let Some(FilterDescriptor::Date(date)) = FilterDescriptor::from_value(config) else {
            return output;
        };

        match date.condition {
            DateCondition::GreaterThan | DateCondition::GreaterThanOrEqual => {
                if let Some(from) = date.date_from {
                    output
                        .extra_params
                        .insert(format!("{field}_gte"), Value::from(from));
                }
            }
            DateCondition::LessThan | DateCondition::LessThanOrEqual => {
                if let Some(from) = date.date_from {
                    output
                        .extra_params
                        .insert(format!("{field}_lte"), Value::from(from));
                }
            }
            DateCondition::InRange => {
                if let Some(from) = date.date_from {
                    output
                        .extra_params
                        .insert(format!("{field}_gte"), Value::from(from));
                }
                if let Some(to) = date.date_to {
                    output
                        .extra_params
                        .insert(format!("{field}_lte"), Value::from(to));
                }
            }
            // The dedicated parameters cannot express equality windows or
            // exclusion; those shapes are dropped.
            DateCondition::Equals | DateCondition::NotEqual => {}
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use gridgate_domain::TableKind;

    use super::TableQueryPolicy;

    #[test]
    fn executions_policy_carries_base_params() {
        let policy = TableQueryPolicy::for_table(TableKind::Executions);
        assert_eq!(
            policy.base_params().get("exclude"),
            Some(&Value::from("params,results"))
        );
        assert!(policy.base_params().contains_key("include"));
    }

    #[test]
    fn status_handler_validates_and_uppercases() {
        let policy = TableQueryPolicy::for_table(TableKind::Executions);
        let handler = policy.custom_filter_handlers().get("status");
        let Some(handler) = handler else {
            panic!("executions policy must register a status handler");
        };

        let valid = handler(&json!({"filterType": "text", "type": "equals", "filter": "finished"}));
        assert_eq!(valid.clause.as_deref(), Some("status='FINISHED'"));

        let invalid = handler(&json!({"filterType": "text", "type": "equals", "filter": "BOGUS"}));
        assert_eq!(invalid.clause, None);
    }

    #[test]
    fn role_handler_accepts_set_filters() {
        let policy = TableQueryPolicy::for_table(TableKind::Users);
        let Some(handler) = policy.custom_filter_handlers().get("role") else {
            panic!("users policy must register a role handler");
        };

        let output = handler(&json!({"filterType": "set", "values": ["ADMIN", "intruder", "USER"]}));
        assert_eq!(
            output.clause.as_deref(),
            Some("(role='ADMIN' OR role='USER')")
        );
    }

    #[test]
    fn date_handler_emits_dedicated_params() {
        let policy = TableQueryPolicy::for_table(TableKind::Executions);
        let Some(handler) = policy.custom_filter_handlers().get("start_date") else {
            panic!("executions policy must register a start_date handler");
        };

        let range = handler(&json!({
            "filterType": "date",
            "type": "inRange",
            "dateFrom": "2024-01-01",
            "dateTo": "2024-06-30"
        }));
        assert_eq!(range.clause, None);
        assert_eq!(
            range.extra_params.get("start_date_gte"),
            Some(&Value::from("2024-01-01"))
        );
        assert_eq!(
            range.extra_params.get("start_date_lte"),
            Some(&Value::from("2024-06-30"))
        );

        let lower = handler(&json!({
            "filterType": "date",
            "type": "greaterThan",
            "dateFrom": "2024-01-01"
        }));
        assert_eq!(
            lower.extra_params.get("start_date_gte"),
            Some(&Value::from("2024-01-01"))
        );
        assert!(!lower.extra_params.contains_key("start_date_lte"));
    }

    #[test]
    fn scripts_policy_has_no_custom_handlers() {
        let policy = TableQueryPolicy::for_table(TableKind::Scripts);
        assert!(policy.custom_filter_handlers().is_empty());
    }
}
