//! # Ledger Records
//!
//! The two row shapes the ledger stores: [`CurrencyStats`] in the global
//! supply registry and [`BalanceRecord`] in each owner's balance table.
//! Both carry bookkeeping timestamps for host-level auditing; the
//! timestamps have no bearing on any invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xakti_core::{AccountId, Asset};

// ---------------------------------------------------------------------------
// CurrencyStats
// ---------------------------------------------------------------------------

/// Supply registry row for one token symbol.
///
/// Invariants, maintained by the ledger operations:
/// `0 <= supply.amount <= max_supply.amount`, and `supply`, `max_supply`
/// share one symbol. Exactly one row exists per symbol code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStats {
    /// Circulating supply. Equals the sum of all holder balances.
    pub supply: Asset,
    /// Hard cap on the circulating supply.
    pub max_supply: Asset,
    /// The single account authorized to issue and retire this symbol.
    pub issuer: AccountId,
    /// When the symbol was registered.
    pub created_at: DateTime<Utc>,
}

impl CurrencyStats {
    /// Builds the row for a freshly registered symbol: zero supply of the
    /// cap's symbol, issued by `issuer`.
    pub fn new(max_supply: Asset, issuer: AccountId) -> Self {
        Self {
            supply: Asset::zero(max_supply.symbol),
            max_supply,
            issuer,
            created_at: Utc::now(),
        }
    }

    /// Remaining issuable amount, in smallest units.
    ///
    /// Computed on the subtraction side so the comparison against an issue
    /// quantity cannot overflow.
    pub fn headroom(&self) -> i64 {
        self.max_supply.amount - self.supply.amount
    }
}

// ---------------------------------------------------------------------------
// BalanceRecord
// ---------------------------------------------------------------------------

/// Balance store row for one (owner, symbol code) pair.
///
/// Invariant: `balance.amount >= 0`. The owner is the table scope, not a
/// field — one balance table exists per owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// The held quantity.
    pub balance: Asset,
    /// Timestamp of the last balance-modifying operation.
    pub last_updated: DateTime<Utc>,
}

impl BalanceRecord {
    /// Builds a row holding exactly `balance`.
    pub fn new(balance: Asset) -> Self {
        Self {
            balance,
            last_updated: Utc::now(),
        }
    }

    /// A zero row, as created by an explicit `open`.
    pub fn zero(symbol: xakti_core::Symbol) -> Self {
        Self::new(Asset::zero(symbol))
    }

    /// Whether the row can be closed.
    pub fn is_zero(&self) -> bool {
        self.balance.amount == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xakti_core::Symbol;

    #[test]
    fn new_stats_start_at_zero_supply() {
        let max: Asset = "1000.0000 XAK".parse().unwrap();
        let stats = CurrencyStats::new(max, AccountId::new("issuer").unwrap());
        assert_eq!(stats.supply.amount, 0);
        assert_eq!(stats.supply.symbol, stats.max_supply.symbol);
        assert_eq!(stats.headroom(), 10_000_000);
    }

    #[test]
    fn zero_record_is_closable() {
        let sym = Symbol::parse("XAK", 4).unwrap();
        assert!(BalanceRecord::zero(sym).is_zero());
        let held: Asset = "0.0001 XAK".parse().unwrap();
        assert!(!BalanceRecord::new(held).is_zero());
    }

    #[test]
    fn stats_serde_roundtrip() {
        let max: Asset = "21000000.00000000 BTC".parse().unwrap();
        let stats = CurrencyStats::new(max, AccountId::new("satoshi").unwrap());
        let json = serde_json::to_string(&stats).expect("serialize");
        let back: CurrencyStats = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(stats, back);
    }
}
