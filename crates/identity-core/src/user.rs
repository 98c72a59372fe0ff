//! User data contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// A user of the identity platform.
///
/// ## Invariants
/// - `id` is unique across the system and never changes.
/// - The record carries no credential material; credentials live on the
///   [`Identity`](crate::Identity) records bound to the user.
///
/// Timestamps travel as ISO-8601 text on the wire.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use identity_core::{User, UserId};
///
/// let now = Utc::now();
/// let user = User::new(UserId::random(), "ada@example.com", now, now);
/// assert_eq!(user.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user record from its parts.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            created_at,
            updated_at,
        }
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address used for login or notifications.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// When the record was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last changed.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Wire format coverage for [`User`].

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn deserialises_camel_case_payload() {
        let user: User = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "ada@example.com",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T03:04:05Z",
        }))
        .expect("valid user payload");

        assert_eq!(user.email(), "ada@example.com");
        assert!(user.created_at() < user.updated_at());
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let result: Result<User, _> = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "ada@example.com",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-02T03:04:05Z",
            "passwordHash": "secret",
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn serialises_timestamps_as_iso_text() {
        let created = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let user = User::new(UserId::random(), "ada@example.com", created, created);
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value["createdAt"], json!("2024-01-02T03:04:05Z"));
    }
}
