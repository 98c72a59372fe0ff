//! Authentication method records bound to a user.
//!
//! Each [`Identity`] carries a fixed header (ids and timestamps) plus a closed
//! set of method-specific details selected by the `type` discriminator on the
//! wire. Adding a new authentication method means adding a variant to
//! [`IdentityDetails`], so every consumer is forced to handle it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{IdentityId, UserId};

/// One authentication method bound to a user.
///
/// ## Invariants
/// - `user_id` references the owning [`User`](crate::User); many identities
///   may point at the same user. Referential integrity is owned by the
///   persistence collaborator.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use identity_core::{Identity, IdentityDetails, IdentityId, PasswordIdentity, UserId};
///
/// let now = Utc::now();
/// let details = IdentityDetails::Password(PasswordIdentity::new("$argon2id$hash"));
/// let identity = Identity::new(IdentityId::random(), UserId::random(), details, now, now);
/// assert_eq!(identity.kind(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: IdentityId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    details: IdentityDetails,
}

impl Identity {
    /// Assemble an identity record from its parts.
    #[must_use]
    pub const fn new(
        id: IdentityId,
        user_id: UserId,
        details: IdentityDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            created_at,
            updated_at,
            details,
        }
    }

    /// Identity identifier.
    #[must_use]
    pub const fn id(&self) -> &IdentityId {
        &self.id
    }

    /// Identifier of the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
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

    /// Method-specific details.
    #[must_use]
    pub const fn details(&self) -> &IdentityDetails {
        &self.details
    }

    /// Wire discriminator of the authentication method.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.details.kind()
    }
}

/// Method-specific identity payloads keyed by the `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityDetails {
    /// Password credential with the identifiers used to look it up.
    Password(PasswordIdentity),
    /// Delegated login through an external OAuth provider.
    #[serde(rename = "oauth")]
    OAuth(OAuthIdentity),
}

impl IdentityDetails {
    /// Wire discriminator for this variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Password(_) => "password",
            Self::OAuth(_) => "oauth",
        }
    }
}

/// Password identity details.
///
/// The hash is held in a buffer that is wiped on drop and is redacted from
/// `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PasswordIdentityDto", into = "PasswordIdentityDto")]
pub struct PasswordIdentity {
    password_hash: Zeroizing<String>,
    email: Option<String>,
    username: Option<String>,
    phone: Option<String>,
}

impl PasswordIdentity {
    /// Create password details from an already-hashed secret.
    pub fn new(password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: Zeroizing::new(password_hash.into()),
            email: None,
            username: None,
            phone: None,
        }
    }

    /// Attach the email identifier.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach the username identifier.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attach the phone identifier.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Email identifier, when the identity was registered with one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Username identifier, when the identity was registered with one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Phone identifier, when the identity was registered with one.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl fmt::Debug for PasswordIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordIdentity")
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone", &self.phone)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordIdentityDto {
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl From<PasswordIdentityDto> for PasswordIdentity {
    fn from(value: PasswordIdentityDto) -> Self {
        let PasswordIdentityDto {
            password_hash,
            email,
            username,
            phone,
        } = value;
        Self {
            password_hash: Zeroizing::new(password_hash),
            email,
            username,
            phone,
        }
    }
}

impl From<PasswordIdentity> for PasswordIdentityDto {
    fn from(value: PasswordIdentity) -> Self {
        Self {
            password_hash: value.password_hash.as_str().to_owned(),
            email: value.email,
            username: value.username,
            phone: value.phone,
        }
    }
}

/// OAuth identity details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthIdentity {
    provider: String,
    subject: String,
}

impl OAuthIdentity {
    /// Create OAuth details for a provider-issued subject.
    pub fn new(provider: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            subject: subject.into(),
        }
    }

    /// Provider name, for example `google`.
    #[must_use]
    pub fn provider(&self) -> &str {
        self.provider.as_str()
    }

    /// Subject identifier issued by the provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }
}
