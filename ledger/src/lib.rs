//! # Xakti Ledger — Multi-Asset Accounting Core
//!
//! The bookkeeping heart of the Xakti token system: issuance, supply
//! tracking, balance transfer, and balance lifecycle management for
//! arbitrarily many token symbols under a single contract authority.
//!
//! Two record families, one table abstraction:
//!
//! - **Supply registry** — one [`CurrencyStats`] row per symbol code,
//!   globally scoped. Created by `create`, mutated by `issue`/`retire`.
//! - **Balance store** — one [`BalanceRecord`] row per (owner, code)
//!   pair. Created lazily on first credit or explicitly via `open`,
//!   removed by `close` once emptied.
//!
//! ## Design Principles
//!
//! 1. The issued supply of a symbol always equals the sum of its holder
//!    balances. The equality is maintained incrementally by every
//!    operation — it is never recomputed.
//! 2. All monetary operations use checked arithmetic; no quantity can go
//!    negative or leave the fixed-point range.
//! 3. Fallible debits run before any other state write, so a failed call
//!    leaves no partial mutation behind.
//! 4. Everything the core cannot decide on its own — who authorized the
//!    call, which accounts exist, who gets notified — comes in through
//!    the [`Host`] trait. No ambient globals.

pub mod error;
pub mod host;
pub mod ledger;
pub mod stats;
pub mod table;

pub use error::LedgerError;
pub use host::{Host, StaticHost};
pub use ledger::{Ledger, MAX_MEMO_BYTES};
pub use stats::{BalanceRecord, CurrencyStats};
pub use table::{KeyedTable, MemTable, Payer};
