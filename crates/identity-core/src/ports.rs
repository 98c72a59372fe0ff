//! Validator capability interfaces.
//!
//! Each validator declares the payload shape it accepts through its `Input`
//! associated type and judges it asynchronously, since implementations may
//! consult external state such as uniqueness lookups.
//!
//! A rejected payload is a returned [`ValidationResult`] with
//! `is_valid == false`. [`ValidatorError`] is reserved for host faults where
//! the check could not run at all; implementations must not fold such
//! faults into a failing result.

use async_trait::async_trait;
use thiserror::Error;

use crate::ValidationResult;

/// Faults that prevented a validator from reaching a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// A dependency needed for the check could not be reached.
    #[error("validator dependency unavailable: {message}")]
    Unavailable {
        /// Description of the unavailable dependency.
        message: String,
    },
    /// The check did not finish within its deadline.
    #[error("validation timed out after {elapsed_ms} ms")]
    TimedOut {
        /// Time spent before giving up.
        elapsed_ms: u64,
    },
    /// The check was cancelled before finishing.
    #[error("validation was cancelled")]
    Cancelled,
    /// Any other failure inside the validator.
    #[error("validator failed: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl ValidatorError {
    /// Convenience constructor for [`ValidatorError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ValidatorError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Judges candidate identity payloads, for example a signup request.
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    /// Payload shape this validator accepts.
    type Input: ?Sized + Sync;

    /// Validate the candidate identity.
    async fn validate(&self, identity: &Self::Input) -> Result<ValidationResult, ValidatorError>;
}

/// Judges candidate user payloads for shape and consistency.
#[async_trait]
pub trait UserValidator: Send + Sync {
    /// Payload shape this validator accepts.
    type Input: ?Sized + Sync;

    /// Validate the candidate user.
    async fn validate(&self, user: &Self::Input) -> Result<ValidationResult, ValidatorError>;
}

#[cfg(test)]
mod tests {
    //! Contract coverage using in-memory validators.

    use super::*;
    use rstest::rstest;

    /// Rejects usernames already present in a fixed list, or fails when the
    /// backing store is marked offline.
    struct UsernameUniqueness {
        taken: Vec<&'static str>,
        online: bool,
    }

    #[async_trait]
    impl IdentityValidator for UsernameUniqueness {
        type Input = str;

        async fn validate(&self, identity: &str) -> Result<ValidationResult, ValidatorError> {
            if !self.online {
                return Err(ValidatorError::unavailable("username index offline"));
            }
            if self.taken.iter().any(|taken| *taken == identity) {
                return Ok(ValidationResult::invalid("Invalid signup details"));
            }
            Ok(ValidationResult::valid())
        }
    }

    #[rstest]
    #[case("ada", true)]
    #[case("grace", false)]
    #[tokio::test]
    async fn shape_failures_are_returned_values(#[case] username: &str, #[case] expected: bool) {
        let validator = UsernameUniqueness {
            taken: vec!["grace"],
            online: true,
        };
        let outcome = validator.validate(username).await.expect("store online");
        assert_eq!(outcome.is_valid(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn host_faults_surface_as_errors() {
        let validator = UsernameUniqueness {
            taken: Vec::new(),
            online: false,
        };
        let err = validator
            .validate("ada")
            .await
            .expect_err("offline store must fail the call");
        assert_eq!(err, ValidatorError::unavailable("username index offline"));
    }

    #[rstest]
    fn error_messages_are_descriptive() {
        assert_eq!(
            ValidatorError::TimedOut { elapsed_ms: 250 }.to_string(),
            "validation timed out after 250 ms"
        );
    }
}
