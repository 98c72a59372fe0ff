//! Identifier kinds a password identity may be looked up by.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of identifiers usable alongside a password.
///
/// Variant order is the canonical field order of a signup schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Email address.
    Email,
    /// Free-form username.
    Username,
    /// E.164-style phone number.
    Phone,
}

impl IdentifierKind {
    /// Every identifier kind in canonical order.
    pub const ALL: [Self; 3] = [Self::Email, Self::Username, Self::Phone];

    /// Payload key and configuration name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = SelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| SelectionError::Unknown {
                value: value.to_owned(),
            })
    }
}

/// Errors raised when assembling an [`IdentifierSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The same kind was listed more than once.
    #[error("identifier '{kind}' selected more than once")]
    Duplicate {
        /// Kind that appeared twice.
        kind: IdentifierKind,
    },
    /// A name outside the supported identifier kinds was supplied.
    #[error("unsupported identifier '{value}'; expected one of email, username, phone")]
    Unknown {
        /// The rejected name.
        value: String,
    },
}

/// Distinct identifier kinds chosen by the caller.
///
/// ## Invariants
/// - No kind appears twice. Duplicates are rejected rather than silently
///   collapsed, so a misconfigured caller learns about it at construction.
/// - The order the caller listed kinds in is kept for display but never
///   changes the schema built from the selection.
///
/// # Examples
/// ```
/// use password_authentication::{IdentifierKind, IdentifierSelection};
///
/// let selection: IdentifierSelection = "phone, email".parse().expect("valid list");
/// assert!(selection.contains(IdentifierKind::Email));
/// assert!(!selection.contains(IdentifierKind::Username));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSelection {
    kinds: Vec<IdentifierKind>,
}

impl IdentifierSelection {
    /// Build a selection, rejecting duplicate kinds.
    pub fn new(kinds: impl IntoIterator<Item = IdentifierKind>) -> Result<Self, SelectionError> {
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::new();
        for kind in kinds {
            if !seen.insert(kind) {
                return Err(SelectionError::Duplicate { kind });
            }
            ordered.push(kind);
        }
        Ok(Self { kinds: ordered })
    }

    /// Selection with no identifiers, producing a password-only schema.
    #[must_use]
    pub const fn empty() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Whether `kind` was selected.
    #[must_use]
    pub fn contains(&self, kind: IdentifierKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Selected kinds in the order the caller listed them.
    pub fn iter(&self) -> impl Iterator<Item = IdentifierKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Number of selected kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no identifier was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl FromStr for IdentifierSelection {
    type Err = SelectionError;

    /// Parse a comma-separated list such as `"email,phone"`.
    ///
    /// Blank entries are skipped, so `""` yields an empty selection.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kinds = value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(IdentifierKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }
}

impl fmt::Display for IdentifierSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in &self.kinds {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            f.write_str(kind.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Selection construction and parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("email", IdentifierKind::Email)]
    #[case("username", IdentifierKind::Username)]
    #[case("phone", IdentifierKind::Phone)]
    fn parses_known_kinds(#[case] raw: &str, #[case] expected: IdentifierKind) {
        assert_eq!(raw.parse::<IdentifierKind>(), Ok(expected));
    }

    #[rstest]
    #[case("Email")]
    #[case("sms")]
    fn rejects_unknown_kinds(#[case] raw: &str) {
        let err = raw.parse::<IdentifierKind>().expect_err("unknown kind");
        assert_eq!(
            err,
            SelectionError::Unknown {
                value: raw.to_owned()
            }
        );
    }

    #[rstest]
    fn rejects_duplicate_kinds() {
        let err = IdentifierSelection::new([
            IdentifierKind::Email,
            IdentifierKind::Phone,
            IdentifierKind::Email,
        ])
        .expect_err("duplicates must fail");
        assert_eq!(
            err,
            SelectionError::Duplicate {
                kind: IdentifierKind::Email
            }
        );
    }

    #[rstest]
    #[case("", 0)]
    #[case(" , ", 0)]
    #[case("email", 1)]
    #[case("username, phone", 2)]
    #[case("phone,email,username", 3)]
    fn parses_comma_separated_lists(#[case] raw: &str, #[case] expected_len: usize) {
        let selection: IdentifierSelection = raw.parse().expect("valid list");
        assert_eq!(selection.len(), expected_len);
    }

    #[rstest]
    fn parsing_reports_duplicates() {
        let err = "email, email"
            .parse::<IdentifierSelection>()
            .expect_err("duplicate entry");
        assert!(matches!(err, SelectionError::Duplicate { .. }));
    }

    #[rstest]
    fn display_keeps_caller_order() {
        let selection =
            IdentifierSelection::new([IdentifierKind::Phone, IdentifierKind::Username])
                .expect("distinct kinds");
        assert_eq!(selection.to_string(), "phone,username");
    }
}
