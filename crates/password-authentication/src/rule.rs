//! Text validation rules applied to individual payload fields.
//!
//! A [`FieldRule`] is a shared handle to a [`TextRule`]. Cloning a rule
//! clones the handle, so a rule placed into a schema stays the very same
//! rule object the caller supplied; [`FieldRule::ptr_eq`] exposes that
//! identity.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use thiserror::Error;

/// Message reported by the default phone rule.
pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone number";
/// Message reported by the default email rule.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email";
/// Message reported when a required text value is empty.
pub const EMPTY_TEXT_MESSAGE: &str = "Must not be empty";

/// A single field value failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleViolation {
    message: Cow<'static, str>,
}

impl RuleViolation {
    /// Violation carrying `message`.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable reason.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Predicate over a text value.
pub trait TextRule: Send + Sync {
    /// Accept `value` or explain why it is rejected.
    fn check(&self, value: &str) -> Result<(), RuleViolation>;
}

impl<F> TextRule for F
where
    F: Fn(&str) -> Result<(), RuleViolation> + Send + Sync,
{
    fn check(&self, value: &str) -> Result<(), RuleViolation> {
        self(value)
    }
}

/// Shared, immutable handle to a text rule plus a short label for logs and
/// `Debug` output.
///
/// # Examples
/// ```
/// use password_authentication::FieldRule;
///
/// let rule = FieldRule::min_length(10);
/// assert!(rule.check("0123456789").is_ok());
/// assert!(rule.check("012345678").is_err());
/// ```
#[derive(Clone)]
pub struct FieldRule {
    label: Cow<'static, str>,
    rule: Arc<dyn TextRule>,
}

impl FieldRule {
    /// Wrap a custom rule under `label`.
    pub fn new(label: impl Into<Cow<'static, str>>, rule: impl TextRule + 'static) -> Self {
        Self {
            label: label.into(),
            rule: Arc::new(rule),
        }
    }

    /// Accept any text, including the empty string.
    #[must_use]
    pub fn text() -> Self {
        Self::from_fn("text", |_: &str| Ok(()))
    }

    /// Accept any text with at least one character.
    #[must_use]
    pub fn non_empty() -> Self {
        Self::from_fn("non_empty", |value: &str| {
            if value.is_empty() {
                Err(RuleViolation::new(EMPTY_TEXT_MESSAGE))
            } else {
                Ok(())
            }
        })
    }

    /// Accept syntactically valid email addresses.
    #[must_use]
    pub fn email() -> Self {
        Self::from_fn("email", |value: &str| {
            if is_valid_email(value) {
                Ok(())
            } else {
                Err(RuleViolation::new(INVALID_EMAIL_MESSAGE))
            }
        })
    }

    /// Accept E.164-style phone numbers: an optional leading `+`, then 2 to
    /// 15 digits with the first digit in `1..=9`.
    #[must_use]
    pub fn phone() -> Self {
        Self::matching(phone_regex().clone(), INVALID_PHONE_MESSAGE)
    }

    /// Accept values matched by `pattern`, reporting `message` otherwise.
    pub fn matching(pattern: Regex, message: impl Into<Cow<'static, str>>) -> Self {
        let message = message.into();
        let label = Cow::Owned(format!("matches {}", pattern.as_str()));
        Self::from_fn(label, move |value: &str| {
            if pattern.is_match(value) {
                Ok(())
            } else {
                Err(RuleViolation::new(message.clone()))
            }
        })
    }

    /// Accept values with at least `min` characters.
    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::from_fn(format!("min_length({min})"), move |value: &str| {
            if value.chars().count() >= min {
                Ok(())
            } else {
                Err(RuleViolation::new(format!(
                    "Must contain at least {min} character(s)"
                )))
            }
        })
    }

    /// Accept values with at most `max` characters.
    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::from_fn(format!("max_length({max})"), move |value: &str| {
            if value.chars().count() <= max {
                Ok(())
            } else {
                Err(RuleViolation::new(format!(
                    "Must contain at most {max} character(s)"
                )))
            }
        })
    }

    /// Build a rule from a closure under `label`.
    pub fn from_fn<F>(label: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), RuleViolation> + Send + Sync + 'static,
    {
        Self::new(label, check)
    }

    /// Require both `self` and `other`; the first violation wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        let label = format!("{} & {}", self.label, other.label);
        Self::from_fn(label, move |value: &str| {
            self.check(value)?;
            other.check(value)
        })
    }

    /// Apply the rule to `value`.
    pub fn check(&self, value: &str) -> Result<(), RuleViolation> {
        self.rule.check(value)
    }

    /// Short description used in logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both handles point at the same rule object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.rule), Arc::as_ptr(&other.rule))
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRule").field(&self.label).finish()
    }
}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+?[1-9][0-9]{1,14}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot placement is checked separately; the regex engine has no
        // lookahead.
        let pattern = r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` is a syntactically valid email address.
///
/// The local part may not start with a dot and the address may not contain
/// consecutive dots.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && email_regex().is_match(value)
}
