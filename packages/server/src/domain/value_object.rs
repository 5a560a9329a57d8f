//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Client identifier value object.
///
/// Identifies one connection for as long as it is registered with the hub.
/// Always a UUID, so two connections never share an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a ClientId from an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a ClientId from its textual (hyphenated) form.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::ClientIdEmpty` for an empty string and
    /// `ValueObjectError::ClientIdInvalidFormat` when the input is not a UUID.
    pub fn parse(id: &str) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ClientIdEmpty);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| ValueObjectError::ClientIdInvalidFormat(id.to_string()))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
