//! # Ledger Operations
//!
//! The six public operations of the accounting core — `create`, `issue`,
//! `retire`, `transfer`, `open`, `close` — plus the two internal balance
//! primitives they share. Each operation authenticates against the
//! [`Host`], validates its quantities, mutates the relevant rows, and
//! returns. There is no cross-operation coordination beyond the tables.
//!
//! ## Failure Atomicity
//!
//! The core runs one call at a time and has no rollback machinery of its
//! own, so every operation orders its writes to make failure atomic by
//! construction: all validation runs first, and the only fallible state
//! change — a balance debit — runs before any other write it is paired
//! with. A failed `retire` leaves supply untouched; a failed `transfer`
//! leaves both balances untouched.

use std::collections::BTreeMap;

use tracing::{debug, info};
use xakti_core::{AccountId, Asset, Symbol, SymbolCode};

use crate::error::LedgerError;
use crate::host::Host;
use crate::stats::{BalanceRecord, CurrencyStats};
use crate::table::{KeyedTable, MemTable, Payer};

/// Maximum memo length in bytes. Longer memos are rejected, not truncated.
pub const MAX_MEMO_BYTES: usize = 256;

/// The multi-asset token ledger.
///
/// Holds the global supply registry, one balance table per owner, the
/// contract authority, and the host handle. One instance services one
/// call at a time; the host serializes concurrent callers.
pub struct Ledger<H: Host> {
    authority: AccountId,
    host: H,
    stats: MemTable<SymbolCode, CurrencyStats>,
    accounts: BTreeMap<AccountId, MemTable<SymbolCode, BalanceRecord>>,
}

impl<H: Host> Ledger<H> {
    /// Creates an empty ledger governed by `authority`.
    pub fn new(authority: AccountId, host: H) -> Self {
        Self {
            authority,
            host,
            stats: MemTable::new(),
            accounts: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Supply registry operations
    // -----------------------------------------------------------------------

    /// Registers a new token symbol with zero supply.
    ///
    /// Only the contract authority may register symbols. `max_supply`
    /// fixes both the symbol (code and precision) and the issuance cap;
    /// `issuer` becomes the only account allowed to issue and retire it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the authority's approval,
    /// [`LedgerError::Validation`] for a malformed or non-positive cap,
    /// [`LedgerError::Conflict`] if the symbol code is already registered.
    pub fn create(&mut self, issuer: AccountId, max_supply: Asset) -> Result<(), LedgerError> {
        self.require_auth(&self.authority)?;

        if !max_supply.is_valid() {
            return Err(LedgerError::validation(format!(
                "invalid maximum supply {max_supply}"
            )));
        }
        if !max_supply.is_positive() {
            return Err(LedgerError::validation("maximum supply must be positive"));
        }

        let code = max_supply.code();
        if self.stats.find(&code).is_some() {
            return Err(LedgerError::Conflict(code));
        }

        self.stats.emplace(
            code,
            CurrencyStats::new(max_supply, issuer.clone()),
            self.authority.clone(),
        );
        info!(symbol = %code, %issuer, %max_supply, "token created");
        Ok(())
    }

    /// Issues new supply to the issuer account.
    ///
    /// Tokens are only ever issued to the designated issuer, who then
    /// redistributes via [`transfer`](Self::transfer). The issuer's
    /// balance row is created on demand, charged to the issuer.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] for an unregistered symbol,
    /// [`LedgerError::Validation`] when `to` is not the issuer or the
    /// quantity is malformed, non-positive, or precision-mismatched,
    /// [`LedgerError::Unauthorized`] without the issuer's approval,
    /// [`LedgerError::CapacityExceeded`] past the maximum supply.
    pub fn issue(
        &mut self,
        to: &AccountId,
        quantity: Asset,
        memo: &str,
    ) -> Result<(), LedgerError> {
        check_memo(memo)?;

        let code = quantity.code();
        let st = self
            .stats
            .find(&code)
            .ok_or_else(|| unknown_symbol(code))?
            .clone();

        if *to != st.issuer {
            return Err(LedgerError::validation(
                "tokens can only be issued to the issuer account",
            ));
        }
        self.require_auth(&st.issuer)?;
        check_quantity(&quantity)?;
        check_symbol_match(&quantity, &st)?;

        if quantity.amount > st.headroom() {
            return Err(LedgerError::CapacityExceeded {
                requested: quantity.amount,
                available: st.headroom(),
            });
        }

        // The headroom check bounds the sum by max_supply, so this cannot
        // overflow; checked anyway to keep the arithmetic policy uniform.
        let new_supply = st.supply.checked_add(quantity)?;
        self.stats
            .modify(&code, Payer::Same, |s| s.supply = new_supply);
        self.add_balance(&st.issuer, quantity, &st.issuer)?;

        info!(symbol = %code, %quantity, supply = %new_supply, "supply issued");
        Ok(())
    }

    /// Retires supply from circulation.
    ///
    /// Debits the issuer's balance and decrements the circulating supply
    /// by the same quantity. The debit runs first: retiring more than the
    /// issuer currently holds fails and leaves supply unchanged.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] for an unregistered symbol,
    /// [`LedgerError::Unauthorized`] without the issuer's approval,
    /// [`LedgerError::Validation`] for a malformed, non-positive, or
    /// precision-mismatched quantity,
    /// [`LedgerError::InsufficientFunds`] when the issuer holds less.
    pub fn retire(&mut self, quantity: Asset, memo: &str) -> Result<(), LedgerError> {
        check_memo(memo)?;

        let code = quantity.code();
        let st = self
            .stats
            .find(&code)
            .ok_or_else(|| unknown_symbol(code))?
            .clone();

        self.require_auth(&st.issuer)?;
        check_quantity(&quantity)?;
        check_symbol_match(&quantity, &st)?;

        self.sub_balance(&st.issuer, quantity)?;
        let new_supply = st.supply.checked_sub(quantity)?;
        self.stats
            .modify(&code, Payer::Same, |s| s.supply = new_supply);

        info!(symbol = %code, %quantity, supply = %new_supply, "supply retired");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Balance store operations
    // -----------------------------------------------------------------------

    /// Moves a quantity between two holders.
    ///
    /// Both parties are notified through the host before the move. When
    /// the recipient's balance row does not exist yet, its storage cost
    /// goes to the recipient if they co-authorize the call, otherwise to
    /// the sender.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] for a self-transfer or a malformed,
    /// non-positive, precision-mismatched quantity or overlong memo,
    /// [`LedgerError::Unauthorized`] without the sender's approval,
    /// [`LedgerError::NotFound`] for an unknown recipient account, an
    /// unregistered symbol, or a sender without a balance row,
    /// [`LedgerError::InsufficientFunds`] when the sender holds less.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        quantity: Asset,
        memo: &str,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::validation("cannot transfer to self"));
        }
        self.require_auth(from)?;
        if !self.host.account_exists(to) {
            return Err(LedgerError::NotFound(format!(
                "recipient account '{to}' does not exist"
            )));
        }

        let code = quantity.code();
        let st = self
            .stats
            .find(&code)
            .ok_or_else(|| unknown_symbol(code))?
            .clone();

        self.host.notify(from);
        self.host.notify(to);

        check_quantity(&quantity)?;
        check_symbol_match(&quantity, &st)?;
        check_memo(memo)?;

        let payer = if self.host.authorized(to) { to } else { from }.clone();

        self.sub_balance(from, quantity)?;
        self.add_balance(to, quantity, &payer)?;

        debug!(%from, %to, %quantity, "transfer executed");
        Ok(())
    }

    /// Opens a zero balance row ahead of a first credit.
    ///
    /// Lets `ram_payer` shoulder the storage cost of `owner`'s row so a
    /// later sender does not have to. The symbol must match the
    /// registered one exactly, code and precision. Calling `open` again
    /// for an existing row is a no-op.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the ram payer's approval,
    /// [`LedgerError::NotFound`] for an unknown owner account or an
    /// unregistered symbol, [`LedgerError::Validation`] for a precision
    /// mismatch against the registered symbol.
    pub fn open(
        &mut self,
        owner: &AccountId,
        symbol: Symbol,
        ram_payer: &AccountId,
    ) -> Result<(), LedgerError> {
        self.require_auth(ram_payer)?;
        if !self.host.account_exists(owner) {
            return Err(LedgerError::NotFound(format!(
                "account '{owner}' does not exist"
            )));
        }

        let code = symbol.code();
        let st = self.stats.find(&code).ok_or_else(|| unknown_symbol(code))?;
        if st.supply.symbol != symbol {
            return Err(LedgerError::validation(format!(
                "symbol precision mismatch: expected {}, got {symbol}",
                st.supply.symbol
            )));
        }

        let table = self.accounts.entry(owner.clone()).or_default();
        if table.find(&code).is_none() {
            table.emplace(code, BalanceRecord::zero(symbol), ram_payer.clone());
            debug!(%owner, symbol = %code, %ram_payer, "balance row opened");
        }
        Ok(())
    }

    /// Closes an emptied balance row, releasing its storage.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] without the owner's approval,
    /// [`LedgerError::NotFound`] when no row exists (never created, or
    /// already closed), [`LedgerError::NonZeroBalance`] while the row
    /// still holds a nonzero quantity.
    pub fn close(&mut self, owner: &AccountId, symbol: Symbol) -> Result<(), LedgerError> {
        self.require_auth(owner)?;

        let code = symbol.code();
        let table = self
            .accounts
            .get_mut(owner)
            .ok_or_else(|| missing_balance(owner, code))?;
        let record = table
            .find(&code)
            .ok_or_else(|| missing_balance(owner, code))?;
        if !record.is_zero() {
            return Err(LedgerError::NonZeroBalance {
                owner: owner.clone(),
                code,
            });
        }

        table.erase(&code);
        debug!(%owner, symbol = %code, "balance row closed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    /// Circulating supply of a symbol, if registered.
    pub fn supply(&self, code: SymbolCode) -> Option<Asset> {
        self.stats.find(&code).map(|st| st.supply)
    }

    /// Maximum supply of a symbol, if registered.
    pub fn max_supply(&self, code: SymbolCode) -> Option<Asset> {
        self.stats.find(&code).map(|st| st.max_supply)
    }

    /// Issuer of a symbol, if registered.
    pub fn issuer(&self, code: SymbolCode) -> Option<&AccountId> {
        self.stats.find(&code).map(|st| &st.issuer)
    }

    /// A holder's balance, if the row exists.
    pub fn balance(&self, owner: &AccountId, code: SymbolCode) -> Option<Asset> {
        self.accounts
            .get(owner)?
            .find(&code)
            .map(|record| record.balance)
    }

    /// Who pays for a holder's balance row, if the row exists.
    pub fn balance_payer(&self, owner: &AccountId, code: SymbolCode) -> Option<&AccountId> {
        self.accounts.get(owner)?.payer_of(&code)
    }

    /// The host environment handle.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for call-context updates between
    /// operations (authorization grants and the like).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // -----------------------------------------------------------------------
    // Internal primitives
    // -----------------------------------------------------------------------

    fn require_auth(&self, principal: &AccountId) -> Result<(), LedgerError> {
        if self.host.authorized(principal) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(principal.clone()))
        }
    }

    /// Credits `owner`, creating the balance row on first contact.
    ///
    /// The shared creation path behind both the lazy first-credit case
    /// and the records pre-made by [`open`](Self::open). No authorization
    /// check: callers have already authorized the debit side.
    fn add_balance(
        &mut self,
        owner: &AccountId,
        value: Asset,
        ram_payer: &AccountId,
    ) -> Result<(), LedgerError> {
        let code = value.code();
        let table = self.accounts.entry(owner.clone()).or_default();
        match table.find(&code) {
            None => {
                table.emplace(code, BalanceRecord::new(value), ram_payer.clone());
                Ok(())
            }
            Some(record) => {
                let new_balance = record.balance.checked_add(value)?;
                table.modify(&code, Payer::Same, |r| {
                    r.balance = new_balance;
                    r.last_updated = chrono::Utc::now();
                });
                Ok(())
            }
        }
    }

    /// Debits `owner`, re-attributing the row's storage cost to them.
    fn sub_balance(&mut self, owner: &AccountId, value: Asset) -> Result<(), LedgerError> {
        let code = value.code();
        let table = self
            .accounts
            .get_mut(owner)
            .ok_or_else(|| missing_balance(owner, code))?;
        let record = table
            .find(&code)
            .ok_or_else(|| missing_balance(owner, code))?;

        if record.balance.amount < value.amount {
            return Err(LedgerError::InsufficientFunds {
                available: record.balance.amount,
                requested: value.amount,
            });
        }

        let new_balance = record.balance.checked_sub(value)?;
        table.modify(&code, Payer::Account(owner.clone()), |r| {
            r.balance = new_balance;
            r.last_updated = chrono::Utc::now();
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared validation helpers
// ---------------------------------------------------------------------------

fn check_memo(memo: &str) -> Result<(), LedgerError> {
    if memo.len() > MAX_MEMO_BYTES {
        return Err(LedgerError::validation(format!(
            "memo has more than {MAX_MEMO_BYTES} bytes"
        )));
    }
    Ok(())
}

fn check_quantity(quantity: &Asset) -> Result<(), LedgerError> {
    if !quantity.is_valid() {
        return Err(LedgerError::validation(format!(
            "invalid quantity {quantity}"
        )));
    }
    if !quantity.is_positive() {
        return Err(LedgerError::validation("quantity must be positive"));
    }
    Ok(())
}

fn check_symbol_match(quantity: &Asset, st: &CurrencyStats) -> Result<(), LedgerError> {
    if quantity.symbol != st.supply.symbol {
        return Err(LedgerError::validation(format!(
            "symbol precision mismatch: expected {}, got {}",
            st.supply.symbol, quantity.symbol
        )));
    }
    Ok(())
}

fn unknown_symbol(code: SymbolCode) -> LedgerError {
    LedgerError::NotFound(format!(
        "token with symbol '{code}' does not exist, create it first"
    ))
}

fn missing_balance(owner: &AccountId, code: SymbolCode) -> LedgerError {
    LedgerError::NotFound(format!("no balance of '{code}' found for '{owner}'"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
