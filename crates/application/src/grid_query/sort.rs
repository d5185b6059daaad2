use std::collections::BTreeSet;

use serde_json::Value;

use gridgate_domain::SortDescriptor;

/// Translates a raw grid sort model into the remote API sort string.
///
/// Entries without a usable column id are skipped, as are columns outside the
/// allow-list when one is supplied. Order is load-bearing: the first
/// surviving descriptor is the remote API's primary sort key, so this
/// function never reorders.
///
/// Returns `None` when nothing survives; callers must omit the sort
/// parameter entirely, which is distinct from sending an empty sort.
#[must_use]
pub fn build_sort_clause(
    sort_model: &[Value],
    allowed_columns: Option<&BTreeSet<String>>,
) -> Option<String> {
    let mut clauses = Vec::new();

    for entry in sort_model {
        let Some(descriptor) = SortDescriptor::from_value(entry) else {
            continue;
        };
        if allowed_columns.is_some_and(|allowed| !allowed.contains(&descriptor.col_id)) {
            continue;
        }
        clauses.push(format!(
            "{} {}",
            descriptor.col_id,
            descriptor.direction.as_str()
        ));
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(","))
    }
}
