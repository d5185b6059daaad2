use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppResult, NonEmptyString};

/// Opaque bearer token forwarded verbatim to the remote tabular API.
///
/// Gridgate performs no credential handling of its own; the token is carried
/// through from the dashboard request to the upstream `Authorization` header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(NonEmptyString);

impl AccessToken {
    /// Creates a validated access token.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}
