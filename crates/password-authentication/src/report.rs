//! Outcome of applying a signup schema to a payload.

use std::fmt;

use identity_core::ValidationResult;
use zeroize::Zeroizing;

use crate::rule::RuleViolation;
use crate::{IdentifierKind, SchemaField};

/// Why a field, or the payload as a whole, was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssueKind {
    /// The payload was not a JSON object.
    NotObject,
    /// A declared field was absent.
    Missing,
    /// A declared field held something other than a string.
    NotText,
    /// The field's rule rejected the value.
    Rule(RuleViolation),
}

/// A single rejection reported by a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    field: Option<SchemaField>,
    kind: FieldIssueKind,
}

impl FieldIssue {
    pub(crate) const fn payload(kind: FieldIssueKind) -> Self {
        Self { field: None, kind }
    }

    pub(crate) const fn field(field: SchemaField, kind: FieldIssueKind) -> Self {
        Self {
            field: Some(field),
            kind,
        }
    }

    /// Field the issue concerns; `None` when the whole payload was rejected.
    #[must_use]
    pub const fn schema_field(&self) -> Option<SchemaField> {
        self.field
    }

    /// Payload key of the field, or `""` for payload-level issues.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.field.map_or("", SchemaField::key)
    }

    /// Rejection reason.
    #[must_use]
    pub const fn kind(&self) -> &FieldIssueKind {
        &self.kind
    }

    /// Human-readable reason for the rejection.
    #[must_use]
    pub fn message(&self) -> &str {
        match &self.kind {
            FieldIssueKind::NotObject => "Expected an object",
            FieldIssueKind::Missing => "Required",
            FieldIssueKind::NotText => "Expected text",
            FieldIssueKind::Rule(violation) => violation.message(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{field}: {}", self.message()),
            None => f.write_str(self.message()),
        }
    }
}

/// Per-field outcome of a schema validation plus the aggregate verdict.
///
/// Issues are listed in the schema's canonical field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    issues: Vec<FieldIssue>,
}

impl SchemaReport {
    pub(crate) const fn from_issues(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Whether every declared field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// All reported issues.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Issue reported for the field stored under `key`, if any.
    #[must_use]
    pub fn issue_for(&self, key: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.key() == key)
    }

    /// Collapse the report into a [`ValidationResult`].
    ///
    /// Failures carry `generic_message` rather than the per-field reasons so
    /// callers do not leak which identifier tripped validation.
    #[must_use]
    pub fn to_validation_result(&self, generic_message: &str) -> ValidationResult {
        if self.is_valid() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(generic_message)
        }
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("valid");
        }
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Typed password signup payload produced by a successful schema parse.
///
/// Password values are wiped on drop and redacted from `Debug` output.
/// Identifier accessors return `None` for fields the schema did not declare.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordSignup {
    password: Zeroizing<String>,
    password_confirmation: Zeroizing<String>,
    email: Option<String>,
    username: Option<String>,
    phone: Option<String>,
}

impl PasswordSignup {
    pub(crate) fn new(password: String, password_confirmation: String) -> Self {
        Self {
            password: Zeroizing::new(password),
            password_confirmation: Zeroizing::new(password_confirmation),
            email: None,
            username: None,
            phone: None,
        }
    }

    pub(crate) fn with_identifier(mut self, kind: IdentifierKind, value: String) -> Self {
        let slot = match kind {
            IdentifierKind::Email => &mut self.email,
            IdentifierKind::Username => &mut self.username,
            IdentifierKind::Phone => &mut self.phone,
        };
        *slot = Some(value);
        self
    }

    /// Password as submitted.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Password confirmation as submitted.
    #[must_use]
    pub fn password_confirmation(&self) -> &str {
        self.password_confirmation.as_str()
    }

    /// Submitted value for `kind`, when the schema declared it.
    #[must_use]
    pub fn identifier(&self, kind: IdentifierKind) -> Option<&str> {
        match kind {
            IdentifierKind::Email => self.email.as_deref(),
            IdentifierKind::Username => self.username.as_deref(),
            IdentifierKind::Phone => self.phone.as_deref(),
        }
    }

    /// Submitted email, when declared.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Submitted username, when declared.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Submitted phone number, when declared.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl fmt::Debug for PasswordSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordSignup")
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone", &self.phone)
            .finish()
    }
}
