use std::collections::BTreeSet;

use serde_json::{Map, Value};

use gridgate_domain::{
    DateCondition, DateFilter, ExtraParams, FilterDescriptor, NumberFilter, SetFilter, TextCondition,
    TextFilter,
};

use super::handler::FilterHandlerRegistry;
use super::sanitize::{sanitize_like_pattern, sanitize_value};

/// Default fragment joiner. The remote API treats comma-joined clauses as an
/// implicit conjunction; this is not a literal list separator.
pub const CLAUSE_JOINER: &str = ",";

/// Translates a filter model into a joined clause string plus any dedicated
/// parameters emitted by custom handlers.
///
/// Columns are visited in the model's insertion order. Non-object
/// descriptors, columns outside the allow-list, and unsupported predicate
/// shapes are dropped without error. A registered custom handler takes over
/// its column entirely; everything else dispatches on the parsed descriptor
/// kind.
///
/// Returns `(None, {})` when nothing was produced; callers must omit the
/// filter parameter rather than send an empty string.
#[must_use]
pub fn build_filter_clause(
    filter_model: &Map<String, Value>,
    allowed_columns: Option<&BTreeSet<String>>,
    joiner: &str,
    custom_handlers: &FilterHandlerRegistry,
) -> (Option<String>, ExtraParams) {
    let mut clauses: Vec<String> = Vec::new();
    let mut extra_params = ExtraParams::new();

    for (field, config) in filter_model {
        if !config.is_object() {
            continue;
        }
        if allowed_columns.is_some_and(|allowed| !allowed.contains(field)) {
            continue;
        }

        if let Some(handler) = custom_handlers.get(field) {
            let output = handler(config);
            if let Some(clause) = output.clause {
                clauses.push(clause);
            }
            for (key, value) in &output.extra_params {
                extra_params.insert(key.clone(), value.clone());
            }
            continue;
        }

        let Some(descriptor) = FilterDescriptor::from_value(config) else {
            continue;
        };
        match descriptor {
            FilterDescriptor::Set(set) => {
                if let Some(clause) = set_clause(field, &set) {
                    clauses.push(clause);
                }
            }
            FilterDescriptor::Text(text) => {
                if let Some(clause) = text_clause(field, &text) {
                    clauses.push(clause);
                }
            }
            FilterDescriptor::Number(number) => {
                if let Some(clause) = number_clause(field, &number) {
                    clauses.push(clause);
                }
            }
            FilterDescriptor::Date(date) => {
                date_clauses(field, &date, &mut clauses);
            }
        }
    }

    let clause_string = if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(joiner))
    };
    (clause_string, extra_params)
}

fn set_clause(field: &str, set: &SetFilter) -> Option<String> {
    let fragments: Vec<String> = set
        .values
        .iter()
        .map(|value| format!("{field}='{}'", sanitize_value(value)))
        .collect();
    if fragments.is_empty() {
        return None;
    }

    Some(format!("({})", fragments.join(" OR ")))
}

fn text_clause(field: &str, text: &TextFilter) -> Option<String> {
    let trimmed = text.value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let clause = match text.condition {
        TextCondition::Equals => format!("{field}='{}'", sanitize_value(trimmed)),
        TextCondition::NotEquals => format!("{field}!='{}'", sanitize_value(trimmed)),
        TextCondition::StartsWith => {
            format!("{field} like '{}%'", sanitize_like_pattern(trimmed))
        }
        TextCondition::EndsWith => {
            format!("{field} like '%{}'", sanitize_like_pattern(trimmed))
        }
        TextCondition::Contains => {
            format!("{field} like '%{}%'", sanitize_like_pattern(trimmed))
        }
    };
    Some(clause)
}

fn number_clause(field: &str, number: &NumberFilter) -> Option<String> {
    let literal = number_literal(&number.value)?;
    Some(format!("{field}{}{literal}", number.condition.operator()))
}

/// Formats a numeric filter value, preserving integer formatting for whole
/// floats (`3.0` renders as `3`). A non-numeric string falls back to its
/// quote-escaped form; composite values are dropped.
fn number_literal(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                return Some(integer.to_string());
            }
            if let Some(unsigned) = number.as_u64() {
                return Some(unsigned.to_string());
            }
            number.as_f64().map(float_literal)
        }
        Value::String(text) => {
            if text.is_empty() {
                return None;
            }
            match text.trim().parse::<f64>() {
                Ok(parsed) => Some(float_literal(parsed)),
                Err(_) => Some(sanitize_value(text)),
            }
        }
        _ => None,
    }
}

fn float_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Appends up to two clause fragments for a date filter.
///
/// Equality becomes an inclusive double bound: the grid submits day-granular
/// values while the remote field is timestamp-granular, so `=` would match
/// nothing. Strict and non-strict bounds collapse to the inclusive operator:
/// the remote grammar only has inclusive date comparisons.
fn date_clauses(field: &str, date: &DateFilter, clauses: &mut Vec<String>) {
    let from = date.date_from.as_deref().map(sanitize_value);
    let to = date.date_to.as_deref().map(sanitize_value);

    match date.condition {
        DateCondition::Equals => {
            if let Some(from) = from {
                clauses.push(format!("{field}>='{from}'"));
                clauses.push(format!("{field}<='{from}'"));
            }
        }
        DateCondition::GreaterThan | DateCondition::GreaterThanOrEqual => {
            if let Some(from) = from {
                clauses.push(format!("{field}>='{from}'"));
            }
        }
        DateCondition::LessThan | DateCondition::LessThanOrEqual => {
            if let Some(from) = from {
                clauses.push(format!("{field}<='{from}'"));
            }
        }
        DateCondition::InRange => {
            if let Some(from) = from {
                clauses.push(format!("{field}>='{from}'"));
            }
            if let Some(to) = to {
                clauses.push(format!("{field}<='{to}'"));
            }
        }
        DateCondition::NotEqual => {
            if let Some(from) = from {
                clauses.push(format!("{field}!='{from}'"));
            }
        }
    }
}
