//! Signup schema configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::validators::DEFAULT_GENERIC_ERROR;
use crate::{
    FieldOverrides, IdentifierKind, IdentifierSelection, PasswordIdentitySchema,
    PasswordIdentitySchemaValidator, SelectionError, create_password_identity_schema,
};

/// Configuration selecting which identifiers a signup payload carries.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PASSWORD_AUTH")]
pub struct PasswordSchemaSettings {
    /// Comma-separated identifier kinds, for example `email,phone`.
    pub identifiers: Option<String>,
    /// Failure message reported by schema-backed validators.
    pub generic_error: Option<String>,
}

impl PasswordSchemaSettings {
    /// Parse the configured identifiers, defaulting to email only.
    pub fn selection(&self) -> Result<IdentifierSelection, SelectionError> {
        match self.identifiers.as_deref() {
            Some(raw) => raw.parse(),
            None => IdentifierSelection::new([IdentifierKind::Email]),
        }
    }

    /// Configured failure message, falling back to the default when unset or
    /// blank.
    #[must_use]
    pub fn generic_error(&self) -> &str {
        self.generic_error
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(DEFAULT_GENERIC_ERROR)
    }

    /// Build the schema for the configured identifiers.
    pub fn schema(
        &self,
        overrides: Option<&FieldOverrides>,
    ) -> Result<PasswordIdentitySchema, SelectionError> {
        let selection = self.selection()?;
        Ok(create_password_identity_schema(&selection, overrides))
    }

    /// Build a validator for the configured identifiers and message.
    pub fn validator(
        &self,
        overrides: Option<&FieldOverrides>,
    ) -> Result<PasswordIdentitySchemaValidator, SelectionError> {
        let schema = self.schema(overrides)?;
        Ok(PasswordIdentitySchemaValidator::new(schema).with_generic_error(self.generic_error()))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for signup schema configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> PasswordSchemaSettings {
        PasswordSchemaSettings::load_from_iter([OsString::from("password-authentication")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_to_email_only() {
        let _guard = lock_env([
            ("PASSWORD_AUTH_IDENTIFIERS", None::<String>),
            ("PASSWORD_AUTH_GENERIC_ERROR", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let schema = settings.schema(None).expect("default selection");
        assert_eq!(
            schema.shape().collect::<Vec<_>>(),
            ["password", "passwordConfirmation", "email"]
        );
        assert_eq!(settings.generic_error(), DEFAULT_GENERIC_ERROR);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PASSWORD_AUTH_IDENTIFIERS", Some("phone, username".to_owned())),
            ("PASSWORD_AUTH_GENERIC_ERROR", Some("Signup failed".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let validator = settings.validator(None).expect("valid selection");
        assert_eq!(
            validator.schema().shape().collect::<Vec<_>>(),
            ["password", "passwordConfirmation", "username", "phone"]
        );
        assert_eq!(validator.generic_error(), "Signup failed");
    }

    #[rstest]
    fn misconfigured_identifiers_fail_loudly() {
        let _guard = lock_env([
            ("PASSWORD_AUTH_IDENTIFIERS", Some("email,email".to_owned())),
            ("PASSWORD_AUTH_GENERIC_ERROR", None::<String>),
        ]);

        let settings = load_from_empty_args();
        let err = settings.selection().expect_err("duplicate identifiers");
        assert_eq!(
            err,
            SelectionError::Duplicate {
                kind: IdentifierKind::Email
            }
        );
    }

    #[rstest]
    fn blank_generic_error_falls_back_to_default() {
        let settings = PasswordSchemaSettings {
            identifiers: Some(String::new()),
            generic_error: Some("  ".to_owned()),
        };
        assert_eq!(settings.generic_error(), DEFAULT_GENERIC_ERROR);
        assert!(settings.selection().expect("empty list").is_empty());
    }
}
