//! UUID-backed identifiers for users and identities.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors returned when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// The identifier was empty.
    #[error("{kind} id must not be empty")]
    Empty {
        /// Which identifier was being parsed.
        kind: &'static str,
    },
    /// The identifier was not a canonical UUID string.
    #[error("{kind} id must be a valid UUID")]
    Invalid {
        /// Which identifier was being parsed.
        kind: &'static str,
    },
}

fn parse_uuid(kind: &'static str, raw: &str) -> Result<Uuid, IdParseError> {
    if raw.is_empty() {
        return Err(IdParseError::Empty { kind });
    }
    if raw.trim() != raw {
        return Err(IdParseError::Invalid { kind });
    }
    Uuid::parse_str(raw).map_err(|_| IdParseError::Invalid { kind })
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct the identifier from text.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdParseError> {
                parse_uuid($kind, id.as_ref()).map(Self)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

uuid_id!(
    /// Stable, immutable user identifier.
    UserId,
    "user"
);

uuid_id!(
    /// Identifier of a single authentication method record.
    IdentityId,
    "identity"
);
