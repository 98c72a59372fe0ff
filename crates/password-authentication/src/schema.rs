//! Dynamic password signup schema.
//!
//! [`create_password_identity_schema`] turns an [`IdentifierSelection`] and
//! optional [`FieldOverrides`] into a [`PasswordIdentitySchema`]. The schema
//! always declares `password` and `passwordConfirmation`; each selected
//! identifier adds one more field whose rule is the caller's override or the
//! built-in default for that kind. Identifiers that were not selected are
//! absent from the schema altogether.
//!
//! The builder is pure: equal inputs produce schemas that accept and reject
//! exactly the same payloads, whatever order the identifiers were listed in.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde_json::{Map, Value};
use tracing::debug;

use crate::report::{FieldIssue, FieldIssueKind, PasswordSignup, SchemaReport};
use crate::{FieldRule, IdentifierKind, IdentifierSelection};

/// A field a signup schema can declare.
///
/// Variant order is the canonical field order used for shapes and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaField {
    /// The chosen password.
    Password,
    /// Repetition of the chosen password.
    PasswordConfirmation,
    /// A selected login identifier.
    Identifier(IdentifierKind),
}

impl SchemaField {
    /// Payload key for the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::PasswordConfirmation => "passwordConfirmation",
            Self::Identifier(kind) => kind.as_str(),
        }
    }
}

impl fmt::Display for SchemaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Caller-supplied replacement rules keyed by identifier kind.
///
/// Entries for kinds that are not part of the selection are ignored by the
/// builder.
///
/// # Examples
/// ```
/// use password_authentication::{FieldOverrides, FieldRule, IdentifierKind};
///
/// let overrides = FieldOverrides::new().with(IdentifierKind::Phone, FieldRule::min_length(10));
/// assert!(overrides.get(IdentifierKind::Phone).is_some());
/// assert!(overrides.get(IdentifierKind::Email).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    rules: BTreeMap<IdentifierKind, FieldRule>,
}

impl FieldOverrides {
    /// Empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the override for `kind`.
    #[must_use]
    pub fn with(mut self, kind: IdentifierKind, rule: FieldRule) -> Self {
        self.insert(kind, rule);
        self
    }

    /// Add or replace the override for `kind`, returning the previous rule.
    pub fn insert(&mut self, kind: IdentifierKind, rule: FieldRule) -> Option<FieldRule> {
        self.rules.insert(kind, rule)
    }

    /// Override registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: IdentifierKind) -> Option<&FieldRule> {
        self.rules.get(&kind)
    }

    /// Whether no overrides are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Built-in rule for every identifier kind, shared by all schemas.
struct DefaultRules {
    email: FieldRule,
    username: FieldRule,
    phone: FieldRule,
    password: FieldRule,
}

impl DefaultRules {
    const fn identifier(&self, kind: IdentifierKind) -> &FieldRule {
        match kind {
            IdentifierKind::Email => &self.email,
            IdentifierKind::Username => &self.username,
            IdentifierKind::Phone => &self.phone,
        }
    }
}

static DEFAULT_RULES: OnceLock<DefaultRules> = OnceLock::new();

fn default_rules() -> &'static DefaultRules {
    DEFAULT_RULES.get_or_init(|| DefaultRules {
        email: FieldRule::email(),
        username: FieldRule::text(),
        phone: FieldRule::phone(),
        password: FieldRule::non_empty(),
    })
}

/// Built-in rule used for `kind` when no override is supplied.
#[must_use]
pub fn default_identifier_rule(kind: IdentifierKind) -> &'static FieldRule {
    default_rules().identifier(kind)
}

/// Build the signup schema for `identifiers`, preferring `overrides` over the
/// built-in rule of each selected kind.
///
/// # Examples
/// ```
/// use password_authentication::{IdentifierKind, IdentifierSelection, create_password_identity_schema};
/// use serde_json::json;
///
/// let selection = IdentifierSelection::new([IdentifierKind::Phone]).expect("distinct kinds");
/// let schema = create_password_identity_schema(&selection, None);
///
/// let report = schema.validate(&json!({
///     "password": "hunter2",
///     "passwordConfirmation": "hunter2",
///     "phone": "0123",
/// }));
/// assert!(!report.is_valid());
/// assert_eq!(report.issue_for("phone").map(|issue| issue.message()), Some("Invalid phone number"));
/// ```
#[must_use]
pub fn create_password_identity_schema(
    identifiers: &IdentifierSelection,
    overrides: Option<&FieldOverrides>,
) -> PasswordIdentitySchema {
    let defaults = default_rules();
    let mut fields = BTreeMap::new();
    fields.insert(SchemaField::Password, defaults.password.clone());
    fields.insert(SchemaField::PasswordConfirmation, defaults.password.clone());

    for kind in identifiers.iter() {
        let rule = overrides
            .and_then(|set| set.get(kind))
            .unwrap_or_else(|| defaults.identifier(kind));
        fields.insert(SchemaField::Identifier(kind), rule.clone());
    }

    let schema = PasswordIdentitySchema { fields };
    let declared: Vec<&str> = schema.shape().collect();
    debug!(fields = ?declared, "built password identity schema");
    schema
}

/// Field set and per-field rules for a password signup payload.
///
/// The schema is immutable and cheap to clone; share it freely across
/// concurrent validations.
#[derive(Debug, Clone)]
pub struct PasswordIdentitySchema {
    fields: BTreeMap<SchemaField, FieldRule>,
}

impl PasswordIdentitySchema {
    /// Keys of the declared fields in canonical order.
    pub fn shape(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().map(|field| field.key())
    }

    /// Declared fields in canonical order.
    pub fn fields(&self) -> impl Iterator<Item = SchemaField> + '_ {
        self.fields.keys().copied()
    }

    /// Whether the schema declares a field under `key`.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Rule declared under `key`, or `None` when the field does not exist.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find_map(|(field, rule)| (field.key() == key).then_some(rule))
    }

    /// Rule declared for `field`.
    #[must_use]
    pub fn rule(&self, field: SchemaField) -> Option<&FieldRule> {
        self.fields.get(&field)
    }

    /// Identifier kinds declared by the schema in canonical order.
    pub fn identifier_kinds(&self) -> impl Iterator<Item = IdentifierKind> + '_ {
        self.fields.keys().filter_map(|field| match field {
            SchemaField::Identifier(kind) => Some(*kind),
            SchemaField::Password | SchemaField::PasswordConfirmation => None,
        })
    }

    /// Apply the schema to an untyped payload.
    ///
    /// Keys the schema does not declare are ignored.
    #[must_use]
    pub fn validate(&self, payload: &Value) -> SchemaReport {
        self.evaluate(payload).0
    }

    /// Validate `payload` and, when it passes, extract the typed signup.
    pub fn parse(&self, payload: &Value) -> Result<PasswordSignup, SchemaReport> {
        let (report, mut accepted) = self.evaluate(payload);
        if !report.is_valid() {
            return Err(report);
        }

        let password = accepted.remove(&SchemaField::Password).unwrap_or_default();
        let confirmation = accepted
            .remove(&SchemaField::PasswordConfirmation)
            .unwrap_or_default();
        let mut signup = PasswordSignup::new(password.to_owned(), confirmation.to_owned());
        for (field, value) in accepted {
            if let SchemaField::Identifier(kind) = field {
                signup = signup.with_identifier(kind, value.to_owned());
            }
        }
        Ok(signup)
    }

    /// Accepted values borrow from `payload`; only [`Self::parse`] copies
    /// them, straight into the zeroised signup.
    fn evaluate<'a>(&self, payload: &'a Value) -> (SchemaReport, BTreeMap<SchemaField, &'a str>) {
        let Some(object) = payload.as_object() else {
            debug!("rejected password identity payload: not an object");
            return (
                SchemaReport::from_issues(vec![FieldIssue::payload(FieldIssueKind::NotObject)]),
                BTreeMap::new(),
            );
        };

        let mut issues = Vec::new();
        let mut accepted = BTreeMap::new();
        for (field, rule) in &self.fields {
            match check_field(object, *field, rule) {
                Ok(value) => {
                    accepted.insert(*field, value);
                }
                Err(kind) => issues.push(FieldIssue::field(*field, kind)),
            }
        }

        if !issues.is_empty() {
            let failed: Vec<&str> = issues.iter().map(FieldIssue::key).collect();
            debug!(failed = ?failed, "rejected password identity payload");
        }
        (SchemaReport::from_issues(issues), accepted)
    }
}

fn check_field<'a>(
    object: &'a Map<String, Value>,
    field: SchemaField,
    rule: &FieldRule,
) -> Result<&'a str, FieldIssueKind> {
    match object.get(field.key()) {
        None => Err(FieldIssueKind::Missing),
        Some(Value::String(text)) => rule
            .check(text)
            .map(|()| text.as_str())
            .map_err(FieldIssueKind::Rule),
        Some(_) => Err(FieldIssueKind::NotText),
    }
}
