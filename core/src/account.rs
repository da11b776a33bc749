//! # Account Names
//!
//! Principals on the ledger — issuers, holders, the contract authority,
//! storage-cost payers — are identified by a compact lowercase name.
//! [`AccountId`] validates the alphabet once at the boundary so the rest
//! of the system can treat names as opaque ordered keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of an account name.
pub const MAX_NAME_LEN: usize = 12;

/// Errors produced when validating account names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The name was empty.
    #[error("account name is empty")]
    Empty,

    /// The name exceeded [`MAX_NAME_LEN`] characters.
    #[error("account name '{0}' is longer than {max} characters", max = MAX_NAME_LEN)]
    TooLong(String),

    /// The name contained a character outside `a-z`, `1-5`, `.`.
    #[error("account name '{name}' contains invalid character '{ch}'")]
    InvalidChar {
        /// The offending name.
        name: String,
        /// The first character outside the alphabet.
        ch: char,
    },
}

/// A validated account name: 1–12 characters from `a-z`, `1-5`, and `.`.
///
/// The restricted alphabet keeps names unambiguous in logs and memos and
/// matches what the host execution environment accepts as an identity.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Validates and wraps an account name.
    pub fn new(name: &str) -> Result<Self, AccountError> {
        if name.is_empty() {
            return Err(AccountError::Empty);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(AccountError::TooLong(name.to_string()));
        }
        for ch in name.chars() {
            let ok = ch.is_ascii_lowercase() || ('1'..='5').contains(&ch) || ch == '.';
            if !ok {
                return Err(AccountError::InvalidChar {
                    name: name.to_string(),
                    ch,
                });
            }
        }
        Ok(Self(name.to_string()))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl FromStr for AccountId {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_names() {
        for name in ["alice", "xakti.token", "acc.5", "a"] {
            assert!(AccountId::new(name).is_ok(), "should accept {name:?}");
        }
    }

    #[test]
    fn rejects_invalid_names() {
        assert_eq!(AccountId::new(""), Err(AccountError::Empty));
        assert!(matches!(
            AccountId::new("muchtoolongname"),
            Err(AccountError::TooLong(_))
        ));
        assert!(matches!(
            AccountId::new("Alice"),
            Err(AccountError::InvalidChar { ch: 'A', .. })
        ));
        assert!(matches!(
            AccountId::new("acc6"),
            Err(AccountError::InvalidChar { ch: '6', .. })
        ));
    }

    #[test]
    fn ordering_matches_string_ordering() {
        let a = AccountId::new("alice").unwrap();
        let b = AccountId::new("bob").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_is_transparent() {
        let id = AccountId::new("alice").unwrap();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"alice\"");
        let back: AccountId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }
}
