use gridgate_core::{AppError, AppResult};

/// Dashboard tables served from the remote tabular API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Script execution history.
    Executions,
    /// Published analysis scripts.
    Scripts,
    /// Registered users.
    Users,
}

impl TableKind {
    /// Parses a transport value into a table kind.
    ///
    /// Unlike the translator core this is strict: an unknown table name is a
    /// routing error, not a degradable filter fragment.
    pub fn parse_transport(value: &str) -> AppResult<Self> {
        match value {
            "executions" => Ok(Self::Executions),
            "scripts" => Ok(Self::Scripts),
            "users" => Ok(Self::Users),
            _ => Err(AppError::NotFound(format!("unknown table '{value}'"))),
        }
    }

    /// Returns the stable transport value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Executions => "executions",
            Self::Scripts => "scripts",
            Self::Users => "users",
        }
    }

    /// Returns the path segment of the backing endpoint on the remote API.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Executions => "execution",
            Self::Scripts => "script",
            Self::Users => "user",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TableKind;

    #[test]
    fn transport_values_round_trip() {
        for table in [TableKind::Executions, TableKind::Scripts, TableKind::Users] {
            assert_eq!(TableKind::parse_transport(table.as_str()).ok(), Some(table));
        }
    }

    #[test]
    fn unknown_tables_are_rejected() {
        assert!(TableKind::parse_transport("invoices").is_err());
    }

    #[test]
    fn endpoints_are_singular_remote_paths() {
        assert_eq!(TableKind::Executions.endpoint(), "execution");
        assert_eq!(TableKind::Scripts.endpoint(), "script");
        assert_eq!(TableKind::Users.endpoint(), "user");
    }
}
