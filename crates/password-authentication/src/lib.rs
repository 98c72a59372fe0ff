//! Password signup schemas built from a selection of login identifiers.
//!
//! A deployment decides which identifiers (email, username, phone) users sign
//! up with. This crate turns that decision into a validation schema for the
//! password signup payload: the password fields are always present, each
//! selected identifier adds its own field, and unselected identifiers do not
//! exist in the schema at all.
//!
//! # Overview
//!
//! - [`IdentifierSelection`] names the chosen identifiers and rejects
//!   duplicates.
//! - [`FieldOverrides`] replaces the built-in rule for individual
//!   identifiers.
//! - [`create_password_identity_schema`] composes the
//!   [`PasswordIdentitySchema`].
//! - [`PasswordIdentitySchemaValidator`] and [`UserShapeValidator`] expose
//!   schema checks through the `identity_core` validator interfaces.
//! - [`PasswordSchemaSettings`] loads the selection from configuration.
//!
//! # Example
//!
//! ```
//! use password_authentication::{
//!     FieldOverrides, FieldRule, IdentifierKind, IdentifierSelection,
//!     create_password_identity_schema,
//! };
//! use serde_json::json;
//!
//! let selection = IdentifierSelection::new([IdentifierKind::Email, IdentifierKind::Phone])
//!     .expect("distinct kinds");
//! let overrides = FieldOverrides::new().with(IdentifierKind::Phone, FieldRule::min_length(10));
//! let schema = create_password_identity_schema(&selection, Some(&overrides));
//!
//! assert!(schema.has_field("phone"));
//! assert!(!schema.has_field("username"));
//!
//! let report = schema.validate(&json!({
//!     "password": "hunter2",
//!     "passwordConfirmation": "hunter2",
//!     "email": "ada@example.com",
//!     "phone": "123456789",
//! }));
//! assert!(!report.is_valid());
//! ```

mod identifier;
mod report;
mod rule;
mod schema;
mod settings;
mod validators;

pub use identifier::{IdentifierKind, IdentifierSelection, SelectionError};
pub use report::{FieldIssue, FieldIssueKind, PasswordSignup, SchemaReport};
pub use rule::{
    EMPTY_TEXT_MESSAGE, FieldRule, INVALID_EMAIL_MESSAGE, INVALID_PHONE_MESSAGE, RuleViolation,
    TextRule, is_valid_email,
};
pub use schema::{
    FieldOverrides, PasswordIdentitySchema, SchemaField, create_password_identity_schema,
    default_identifier_rule,
};
pub use settings::PasswordSchemaSettings;
pub use validators::{DEFAULT_GENERIC_ERROR, PasswordIdentitySchemaValidator, UserShapeValidator};
