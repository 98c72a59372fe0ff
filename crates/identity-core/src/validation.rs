//! Outcome of a validation run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pass/fail outcome reported by validators.
///
/// ## Invariants
/// - `error` is only ever present when `is_valid` is `false`.
/// - A present `error` is non-empty once trimmed.
///
/// The message should stay generic in contexts such as signup, where a
/// detailed reason would let a caller enumerate accounts. The type carries
/// the message as given and never inspects it.
///
/// # Examples
/// ```
/// use identity_core::ValidationResult;
///
/// assert!(ValidationResult::valid().is_valid());
/// assert_eq!(ValidationResult::rejected().error(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ValidationResultDto", into = "ValidationResultDto")]
pub struct ValidationResult {
    is_valid: bool,
    error: Option<String>,
}

/// Inconsistent states rejected when decoding a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationResultError {
    /// A passing result carried an error message.
    #[error("a valid result must not carry an error message")]
    ErrorOnValid,
    /// The error message was blank.
    #[error("validation error message must not be empty")]
    EmptyError,
}

impl ValidationResult {
    /// Passing outcome.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// Failing outcome with a message.
    ///
    /// A blank message is dropped, leaving a failure without a message.
    pub fn invalid(error: impl Into<String>) -> Self {
        let error = error.into();
        if error.trim().is_empty() {
            return Self::rejected();
        }
        Self {
            is_valid: false,
            error: Some(error),
        }
    }

    /// Failing outcome without a message.
    #[must_use]
    pub const fn rejected() -> Self {
        Self {
            is_valid: false,
            error: None,
        }
    }

    /// Whether validation passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Failure message, if one was supplied.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationResultDto {
    is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ValidationResult> for ValidationResultDto {
    fn from(value: ValidationResult) -> Self {
        Self {
            is_valid: value.is_valid,
            error: value.error,
        }
    }
}

impl TryFrom<ValidationResultDto> for ValidationResult {
    type Error = ValidationResultError;

    fn try_from(value: ValidationResultDto) -> Result<Self, Self::Error> {
        match (value.is_valid, value.error) {
            (true, None) => Ok(Self::valid()),
            (true, Some(_)) => Err(ValidationResultError::ErrorOnValid),
            (false, None) => Ok(Self::rejected()),
            (false, Some(error)) if error.trim().is_empty() => {
                Err(ValidationResultError::EmptyError)
            }
            (false, Some(error)) => Ok(Self::invalid(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Construction and wire format of [`ValidationResult`].

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn invalid_keeps_message() {
        let outcome = ValidationResult::invalid("Invalid signup details");
        assert!(!outcome.is_valid());
        assert_eq!(outcome.error(), Some("Invalid signup details"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn invalid_drops_blank_messages(#[case] message: &str) {
        assert_eq!(ValidationResult::invalid(message), ValidationResult::rejected());
    }

    #[rstest]
    fn valid_result_omits_error_on_the_wire() {
        let value = serde_json::to_value(ValidationResult::valid()).expect("serialise");
        assert_eq!(value, json!({ "isValid": true }));
    }

    #[rstest]
    #[case(json!({ "isValid": true, "error": "boom" }))]
    #[case(json!({ "isValid": false, "error": " " }))]
    fn rejects_inconsistent_payloads(#[case] payload: serde_json::Value) {
        let result: Result<ValidationResult, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[rstest]
    fn accepts_failure_without_message() {
        let outcome: ValidationResult =
            serde_json::from_value(json!({ "isValid": false })).expect("valid payload");
        assert_eq!(outcome, ValidationResult::rejected());
    }
}
