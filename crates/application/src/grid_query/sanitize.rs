/// Escapes single quotes so user text can be embedded in the remote filter
/// grammar.
///
/// The scope is intentionally narrow: the remote endpoint is a trusted
/// internal service with its own input validation, and this layer only has to
/// keep user text from breaking the clause syntax.
#[must_use]
pub fn sanitize_value(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escapes quotes plus the `%`/`_` wildcards for LIKE pattern contexts.
#[must_use]
pub fn sanitize_like_pattern(value: &str) -> String {
    sanitize_value(value).replace('%', "\\%").replace('_', "\\_")
}
