//! # Ledger Error Taxonomy
//!
//! Every public operation fails synchronously with one of these variants.
//! There is no retry and no partial application — the caller corrects the
//! input and reissues the call. Each variant carries enough context for
//! host-level reporting without a stack trace.

use thiserror::Error;
use xakti_core::{AccountId, AssetError, SymbolCode, SymbolError};

/// Errors surfaced by the ledger's public operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The current call lacks the required authority (contract authority,
    /// issuer, owner, ram payer, or the transfer sender).
    #[error("missing required authority of '{0}'")]
    Unauthorized(AccountId),

    /// Malformed symbol or quantity, non-positive quantity, precision
    /// mismatch against the registered symbol, or an overlong memo.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced supply record, balance record, or account identity
    /// does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A supply record for this symbol code already exists.
    #[error("token with symbol '{0}' already exists")]
    Conflict(SymbolCode),

    /// Issuing this quantity would push the circulating supply past the
    /// configured maximum.
    #[error("issue quantity {requested} exceeds available supply of {available}")]
    CapacityExceeded {
        /// Requested issue amount, in smallest units.
        requested: i64,
        /// Remaining headroom below the maximum supply.
        available: i64,
    },

    /// A debit exceeds the current balance.
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Current balance, in smallest units.
        available: i64,
        /// Requested debit amount.
        requested: i64,
    },

    /// `close` was attempted while the balance is nonzero.
    #[error("cannot close balance of '{owner}' for '{code}': balance still present")]
    NonZeroBalance {
        /// The balance row's owner.
        owner: AccountId,
        /// The symbol code of the row.
        code: SymbolCode,
    },
}

impl LedgerError {
    /// Shorthand for a [`LedgerError::Validation`] with a formatted reason.
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        LedgerError::Validation(reason.into())
    }
}

impl From<SymbolError> for LedgerError {
    fn from(err: SymbolError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

impl From<AssetError> for LedgerError {
    fn from(err: AssetError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_map_to_validation() {
        let sym_err = "XAK".parse::<xakti_core::Symbol>().unwrap_err();
        let ledger_err: LedgerError = sym_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));

        let asset_err = "nonsense".parse::<xakti_core::Asset>().unwrap_err();
        let ledger_err: LedgerError = asset_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
    }

    #[test]
    fn messages_carry_context() {
        let err = LedgerError::InsufficientFunds {
            available: 50,
            requested: 60,
        };
        let msg = err.to_string();
        assert!(msg.contains("50"));
        assert!(msg.contains("60"));
    }
}
