//! # Xakti Core — Ledger Value Types
//!
//! Foundational types shared by every layer that talks about assets:
//! symbol codes, symbols, fixed-point quantities, and account names.
//! No ledger logic lives here — this crate only defines what a quantity
//! *is*, how it parses, how it prints, and how it refuses to overflow.
//!
//! ## Design Principles
//!
//! 1. All monetary arithmetic is checked. `checked_add` and `checked_sub`
//!    everywhere, because wrapping arithmetic and money do not mix.
//! 2. Invalid values are unrepresentable through the constructors: a
//!    [`SymbolCode`] never holds a lowercase letter, an [`AccountId`]
//!    never holds an uppercase one. Parsing returns typed errors.
//! 3. Mixing two different symbols in one arithmetic expression is a
//!    programming error, not a runtime condition — those paths panic.
//! 4. Every public type is serializable (serde) for wire transport and
//!    persistent storage by host layers.

pub mod account;
pub mod asset;
pub mod symbol;

pub use account::{AccountError, AccountId};
pub use asset::{Asset, AssetError, MAX_AMOUNT};
pub use symbol::{Symbol, SymbolCode, SymbolError, MAX_PRECISION};
