use serde_json::Value;

/// Comparison condition for text filters.
///
/// Unknown condition strings fall back to [`TextCondition::Contains`], which
/// is the grid widget's default text predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCondition {
    /// Exact match.
    Equals,
    /// Exact mismatch.
    NotEquals,
    /// Prefix match.
    StartsWith,
    /// Suffix match.
    EndsWith,
    /// Substring match.
    Contains,
}

impl TextCondition {
    /// Parses a raw condition string, defaulting to `contains`.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("equals") => Self::Equals,
            Some("notEquals") => Self::NotEquals,
            Some("startsWith") => Self::StartsWith,
            Some("endsWith") => Self::EndsWith,
            _ => Self::Contains,
        }
    }
}

/// Comparison condition for number filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCondition {
    /// `=`
    Equals,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
}

impl NumberCondition {
    /// Parses a raw condition string.
    ///
    /// A missing condition defaults to equality; an unrecognized one (for
    /// example `inRange`, which the remote grammar cannot express for
    /// numbers) yields `None` and the whole descriptor is dropped.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("equals") => Some(Self::Equals),
            Some("notEqual") => Some(Self::NotEqual),
            Some("greaterThan") => Some(Self::GreaterThan),
            Some("greaterThanOrEqual") => Some(Self::GreaterThanOrEqual),
            Some("lessThan") => Some(Self::LessThan),
            Some("lessThanOrEqual") => Some(Self::LessThanOrEqual),
            Some(_) => None,
        }
    }

    /// Returns the remote comparison operator.
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }
}

/// Comparison condition for date filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCondition {
    /// Day-window match (inclusive double bound on the same value).
    Equals,
    /// Lower bound (strict form; collapses to inclusive on the wire).
    GreaterThan,
    /// Lower bound.
    GreaterThanOrEqual,
    /// Upper bound (strict form; collapses to inclusive on the wire).
    LessThan,
    /// Upper bound.
    LessThanOrEqual,
    /// Bounded range from `dateFrom` to `dateTo`.
    InRange,
    /// Exclusion of one value.
    NotEqual,
}

impl DateCondition {
    /// Parses a raw condition string; missing defaults to equality,
    /// unrecognized yields `None`.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("equals") => Some(Self::Equals),
            Some("greaterThan") => Some(Self::GreaterThan),
            Some("greaterThanOrEqual") => Some(Self::GreaterThanOrEqual),
            Some("lessThan") => Some(Self::LessThan),
            Some("lessThanOrEqual") => Some(Self::LessThanOrEqual),
            Some("inRange") => Some(Self::InRange),
            Some("notEqual") => Some(Self::NotEqual),
            Some(_) => None,
        }
    }
}

/// Enumerated-set filter: match any of the listed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFilter {
    /// Display values to match; empty and null entries are already dropped.
    pub values: Vec<String>,
}

/// Free-text filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    /// Comparison condition.
    pub condition: TextCondition,
    /// Raw filter text; trimming and escaping happen at clause build time.
    pub value: String,
}

/// Numeric filter.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFilter {
    /// Comparison condition.
    pub condition: NumberCondition,
    /// Raw filter value, kept as submitted for fallback formatting.
    pub value: Value,
}

/// Date filter carrying day-granular bounds as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    /// Comparison condition.
    pub condition: DateCondition,
    /// Lower bound or single comparison value.
    pub date_from: Option<String>,
    /// Upper bound, only meaningful for `inRange`.
    pub date_to: Option<String>,
}

/// One column's filter predicate, tagged by the grid's `filterType` field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDescriptor {
    /// `filterType: "set"`
    Set(SetFilter),
    /// `filterType: "text"`
    Text(TextFilter),
    /// `filterType: "number"`
    Number(NumberFilter),
    /// `filterType: "date"`
    Date(DateFilter),
}

impl FilterDescriptor {
    /// Lenient parse of one raw filter model entry.
    ///
    /// Unknown filter types (including `boolean`) and unsupported condition
    /// strings yield `None`: one malformed descriptor must never abort the
    /// translation of the remaining columns.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        let config = raw.as_object()?;
        let condition = config.get("type").and_then(Value::as_str);

        match config.get("filterType").and_then(Value::as_str)? {
            "set" => {
                let values = config
                    .get("values")
                    .and_then(Value::as_array)
                    .map(|values| values.iter().filter_map(display_value).collect())
                    .unwrap_or_default();
                Some(Self::Set(SetFilter { values }))
            }
            "text" => {
                let value = config
                    .get("filter")
                    .and_then(display_value)
                    .unwrap_or_default();
                Some(Self::Text(TextFilter {
                    condition: TextCondition::parse_lenient(condition),
                    value,
                }))
            }
            "number" => Some(Self::Number(NumberFilter {
                condition: NumberCondition::parse_lenient(condition)?,
                value: config.get("filter").cloned().unwrap_or(Value::Null),
            })),
            "date" => Some(Self::Date(DateFilter {
                condition: DateCondition::parse_lenient(condition)?,
                date_from: bound_value(config.get("dateFrom")),
                date_to: bound_value(config.get("dateTo")),
            })),
            _ => None,
        }
    }
}

/// Renders a scalar filter value for display in a clause; null, empty, and
/// composite values are dropped.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn bound_value(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|bound| !bound.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::{DateCondition, FilterDescriptor, NumberCondition, TextCondition};

    #[test]
    fn unknown_filter_types_are_dropped() {
        assert_eq!(
            FilterDescriptor::from_value(&json!({"filterType": "boolean", "filter": true})),
            None
        );
        assert_eq!(FilterDescriptor::from_value(&json!("not an object")), None);
        assert_eq!(FilterDescriptor::from_value(&json!({"type": "equals"})), None);
    }

    #[test]
    fn text_conditions_default_to_contains() {
        let descriptor = FilterDescriptor::from_value(
            &json!({"filterType": "text", "type": "fuzzyish", "filter": "abc"}),
        );
        assert!(matches!(
            descriptor,
            Some(FilterDescriptor::Text(text)) if text.condition == TextCondition::Contains
        ));
    }

    #[test]
    fn unsupported_number_conditions_drop_the_descriptor() {
        let descriptor = FilterDescriptor::from_value(
            &json!({"filterType": "number", "type": "inRange", "filter": 10}),
        );
        assert_eq!(descriptor, None);
    }

    #[test]
    fn missing_conditions_default_to_equality() {
        let number =
            FilterDescriptor::from_value(&json!({"filterType": "number", "filter": 3}));
        assert!(matches!(
            number,
            Some(FilterDescriptor::Number(filter)) if filter.condition == NumberCondition::Equals
        ));

        let date = FilterDescriptor::from_value(
            &json!({"filterType": "date", "dateFrom": "2024-01-02"}),
        );
        assert!(matches!(
            date,
            Some(FilterDescriptor::Date(filter)) if filter.condition == DateCondition::Equals
        ));
    }

    #[test]
    fn set_values_drop_null_and_empty_entries() {
        let descriptor = FilterDescriptor::from_value(
            &json!({"filterType": "set", "values": ["Active", "", null, 7]}),
        );
        assert!(matches!(
            descriptor,
            Some(FilterDescriptor::Set(set)) if set.values == vec!["Active".to_owned(), "7".to_owned()]
        ));
    }

    #[test]
    fn empty_date_bounds_are_treated_as_absent() {
        let descriptor = FilterDescriptor::from_value(
            &json!({"filterType": "date", "type": "inRange", "dateFrom": "", "dateTo": "2024-06-30"}),
        );
        assert!(matches!(
            descriptor,
            Some(FilterDescriptor::Date(date))
                if date.date_from.is_none() && date.date_to.as_deref() == Some("2024-06-30")
        ));
    }

    proptest! {
        #[test]
        fn unknown_filter_type_strings_never_parse(kind in "[a-zA-Z]{1,12}", value in ".*") {
            prop_assume!(!matches!(kind.as_str(), "set" | "text" | "number" | "date"));
            let raw = json!({"filterType": kind, "filter": value});
            prop_assert!(FilterDescriptor::from_value(&raw).is_none());
        }

        #[test]
        fn arbitrary_condition_strings_never_panic(condition in ".*") {
            let raw = json!({"filterType": "date", "type": condition, "dateFrom": "2024-01-01"});
            let _ = FilterDescriptor::from_value(&raw);
            let raw = json!({"filterType": "number", "type": condition, "filter": 1});
            let _ = FilterDescriptor::from_value(&raw);
        }
    }
}
