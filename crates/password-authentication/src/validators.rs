//! Validators backed by the signup schema.
//!
//! Both validators judge untyped JSON payloads and only ever return
//! `Ok`: they perform no I/O, so there is no host fault to report.

use async_trait::async_trait;
use identity_core::{IdentityValidator, User, UserValidator, ValidationResult, ValidatorError};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{FieldRule, PasswordIdentitySchema};

/// Generic failure message used unless a caller supplies its own.
pub const DEFAULT_GENERIC_ERROR: &str = "Invalid signup details";

fn generic_or_default(message: String) -> String {
    if message.trim().is_empty() {
        DEFAULT_GENERIC_ERROR.to_owned()
    } else {
        message
    }
}

/// Identity validator that applies a [`PasswordIdentitySchema`].
///
/// Failures report a single generic message; per-field reasons stay
/// available through [`PasswordIdentitySchema::validate`] for callers that
/// may safely show them.
#[derive(Debug, Clone)]
pub struct PasswordIdentitySchemaValidator {
    schema: PasswordIdentitySchema,
    generic_error: String,
}

impl PasswordIdentitySchemaValidator {
    /// Wrap `schema`, reporting [`DEFAULT_GENERIC_ERROR`] on failure.
    #[must_use]
    pub fn new(schema: PasswordIdentitySchema) -> Self {
        Self {
            schema,
            generic_error: DEFAULT_GENERIC_ERROR.to_owned(),
        }
    }

    /// Replace the failure message. A blank message keeps
    /// [`DEFAULT_GENERIC_ERROR`].
    #[must_use]
    pub fn with_generic_error(mut self, message: impl Into<String>) -> Self {
        self.generic_error = generic_or_default(message.into());
        self
    }

    /// Schema applied to every payload.
    #[must_use]
    pub const fn schema(&self) -> &PasswordIdentitySchema {
        &self.schema
    }

    /// Message reported on failure.
    #[must_use]
    pub fn generic_error(&self) -> &str {
        self.generic_error.as_str()
    }
}

#[async_trait]
impl IdentityValidator for PasswordIdentitySchemaValidator {
    type Input = Value;

    async fn validate(&self, identity: &Value) -> Result<ValidationResult, ValidatorError> {
        let report = self.schema.validate(identity);
        Ok(report.to_validation_result(&self.generic_error))
    }
}

/// User validator checking that a payload is a well-formed [`User`].
///
/// The payload must decode into a user record, carry a syntactically valid
/// email, and must not be updated before it was created.
#[derive(Debug, Clone)]
pub struct UserShapeValidator {
    email_rule: FieldRule,
    generic_error: String,
}

impl UserShapeValidator {
    /// Validator using the built-in email rule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email_rule: FieldRule::email(),
            generic_error: DEFAULT_GENERIC_ERROR.to_owned(),
        }
    }

    /// Replace the rule applied to the user's email.
    #[must_use]
    pub fn with_email_rule(mut self, rule: FieldRule) -> Self {
        self.email_rule = rule;
        self
    }

    /// Replace the failure message. A blank message keeps
    /// [`DEFAULT_GENERIC_ERROR`].
    #[must_use]
    pub fn with_generic_error(mut self, message: impl Into<String>) -> Self {
        self.generic_error = generic_or_default(message.into());
        self
    }

    fn judge(&self, payload: &Value) -> Result<User, &'static str> {
        let record = User::deserialize(payload).map_err(|_| "payload is not a user record")?;
        self.email_rule
            .check(record.email())
            .map_err(|_| "email rejected")?;
        if record.updated_at() < record.created_at() {
            return Err("updated before created");
        }
        Ok(record)
    }
}

impl Default for UserShapeValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserValidator for UserShapeValidator {
    type Input = Value;

    async fn validate(&self, user: &Value) -> Result<ValidationResult, ValidatorError> {
        match self.judge(user) {
            Ok(_) => Ok(ValidationResult::valid()),
            Err(reason) => {
                debug!(reason, "rejected user payload");
                Ok(ValidationResult::invalid(self.generic_error.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Async validator behaviour.

    use super::*;
    use crate::{IdentifierKind, IdentifierSelection, create_password_identity_schema};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn email_validator() -> PasswordIdentitySchemaValidator {
        let selection =
            IdentifierSelection::new([IdentifierKind::Email]).expect("distinct kinds");
        PasswordIdentitySchemaValidator::new(create_password_identity_schema(&selection, None))
    }

    #[rstest]
    #[tokio::test]
    async fn identity_validator_accepts_well_formed_signup(
        email_validator: PasswordIdentitySchemaValidator,
    ) {
        let outcome = email_validator
            .validate(&json!({
                "password": "pw",
                "passwordConfirmation": "pw",
                "email": "ada@example.com",
            }))
            .await
            .expect("no host fault");
        assert_eq!(outcome, ValidationResult::valid());
    }

    #[rstest]
    #[tokio::test]
    async fn identity_validator_reports_generic_message(
        email_validator: PasswordIdentitySchemaValidator,
    ) {
        let outcome = email_validator
            .with_generic_error("Signup failed")
            .validate(&json!({
                "password": "pw",
                "passwordConfirmation": "pw",
                "email": "not-an-email",
            }))
            .await
            .expect("no host fault");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.error(), Some("Signup failed"));
    }

    #[rstest]
    #[case(json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "email": "ada@example.com",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z",
    }), true)]
    #[case(json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "email": "ada-at-example",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-02T00:00:00Z",
    }), false)]
    #[case(json!({
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "email": "ada@example.com",
        "createdAt": "2024-01-02T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
    }), false)]
    #[case(json!({ "id": "not-a-uuid", "email": "ada@example.com" }), false)]
    #[case(json!("ada@example.com"), false)]
    #[tokio::test]
    async fn user_validator_checks_shape(#[case] payload: Value, #[case] expected: bool) {
        let outcome = UserShapeValidator::new()
            .validate(&payload)
            .await
            .expect("no host fault");
        assert_eq!(outcome.is_valid(), expected);
        if !expected {
            assert_eq!(outcome.error(), Some(DEFAULT_GENERIC_ERROR));
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_generic_error_keeps_the_default(
        email_validator: PasswordIdentitySchemaValidator,
        #[case] message: &str,
    ) {
        let signup = json!({ "password": "pw", "passwordConfirmation": "pw" });
        let outcome = email_validator
            .with_generic_error(message)
            .validate(&signup)
            .await
            .expect("no host fault");
        assert_eq!(outcome.error(), Some(DEFAULT_GENERIC_ERROR));

        let outcome = UserShapeValidator::new()
            .with_generic_error(message)
            .validate(&json!("ada@example.com"))
            .await
            .expect("no host fault");
        assert_eq!(outcome.error(), Some(DEFAULT_GENERIC_ERROR));
    }
}
