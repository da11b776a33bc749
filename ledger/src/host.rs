//! # Host Environment Interface
//!
//! Everything the accounting core needs from its execution environment
//! but does not implement: authorization proofs, account existence, and
//! the observer notification channel. The [`Host`] trait keeps those
//! concerns injectable — no ambient "current caller" global, no implicit
//! signature machinery inside the bookkeeping logic.
//!
//! [`StaticHost`] is a fixed-configuration implementation for tests,
//! demos, and single-process embeddings.

use std::cell::RefCell;
use std::collections::BTreeSet;

use xakti_core::AccountId;

/// The ledger's view of its execution environment.
///
/// Implementations answer for one call at a time: `authorized` reports
/// whether the *current* call carries a valid authorization proof for the
/// given principal. How that proof works (signatures, sessions, anything
/// else) is entirely the host's business.
pub trait Host {
    /// True iff the current call is authorized by `principal`.
    fn authorized(&self, principal: &AccountId) -> bool;

    /// True iff `account` names a known identity.
    fn account_exists(&self, account: &AccountId) -> bool;

    /// Best-effort observability hook; invoked for both parties of a
    /// transfer. No ledger logic depends on its outcome.
    fn notify(&self, party: &AccountId);
}

/// A [`Host`] with explicitly configured accounts and authorizations.
///
/// Existing accounts and currently-authorizing principals are plain sets;
/// notifications are collected into an inspectable log. Suitable wherever
/// the call-level authorization context is known up front.
#[derive(Debug, Default)]
pub struct StaticHost {
    accounts: BTreeSet<AccountId>,
    authorizing: BTreeSet<AccountId>,
    notified: RefCell<Vec<AccountId>>,
}

impl StaticHost {
    /// Creates a host with no accounts and no authorizations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host that knows the given accounts.
    pub fn with_accounts<I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = AccountId>,
    {
        Self {
            accounts: accounts.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Registers an account identity.
    pub fn add_account(&mut self, account: AccountId) {
        self.accounts.insert(account);
    }

    /// Marks `principal` as authorizing the current call.
    pub fn authorize(&mut self, principal: AccountId) {
        self.authorizing.insert(principal);
    }

    /// Withdraws a previously granted authorization.
    pub fn deauthorize(&mut self, principal: &AccountId) {
        self.authorizing.remove(principal);
    }

    /// Clears all call-level authorizations.
    pub fn clear_authorizations(&mut self) {
        self.authorizing.clear();
    }

    /// Parties notified since the last [`take_notifications`](Self::take_notifications).
    pub fn notifications(&self) -> Vec<AccountId> {
        self.notified.borrow().clone()
    }

    /// Drains and returns the notification log.
    pub fn take_notifications(&self) -> Vec<AccountId> {
        self.notified.take()
    }
}

impl Host for StaticHost {
    fn authorized(&self, principal: &AccountId) -> bool {
        self.authorizing.contains(principal)
    }

    fn account_exists(&self, account: &AccountId) -> bool {
        self.accounts.contains(account)
    }

    fn notify(&self, party: &AccountId) {
        self.notified.borrow_mut().push(party.clone());
    }
}
