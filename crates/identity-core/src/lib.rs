//! Shared identity contracts for the identity platform.
//!
//! This crate holds the vocabulary every other identity component speaks:
//! users, the authentication methods bound to them, and the outcome of a
//! validation run. It also defines the validator capability interfaces that
//! concrete validation strategies implement.
//!
//! Nothing here performs I/O. Persistence, hashing, and transport are owned
//! by collaborators that depend on these types.
//!
//! # Example
//!
//! ```
//! use identity_core::ValidationResult;
//!
//! let outcome = ValidationResult::invalid("Invalid signup details");
//! assert!(!outcome.is_valid());
//! assert_eq!(outcome.error(), Some("Invalid signup details"));
//! ```

mod ids;
mod identity;
mod ports;
mod user;
mod validation;

pub use identity::{Identity, IdentityDetails, OAuthIdentity, PasswordIdentity};
pub use ids::{IdParseError, IdentityId, UserId};
pub use ports::{IdentityValidator, UserValidator, ValidatorError};
pub use user::User;
pub use validation::{ValidationResult, ValidationResultError};
