//! # Keyed Tables — The Ledger's Storage Abstraction
//!
//! Both record families live in ordered keyed tables. The [`KeyedTable`]
//! trait is the seam between the accounting logic and whatever actually
//! persists the rows: the in-process [`MemTable`] here, or a host-backed
//! durable table in an embedding environment.
//!
//! Every write carries a *payer* — the identity charged for the storage
//! the row occupies. Attribution is a resource-accounting side channel
//! with no bearing on the monetary invariants, but it must be threaded
//! through faithfully so the host can bill the right account.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xakti_core::AccountId;

// ---------------------------------------------------------------------------
// Payer
// ---------------------------------------------------------------------------

/// Storage-cost attribution for a row mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payer {
    /// Keep whoever is currently paying for the row.
    Same,
    /// Re-attribute the row's storage cost to this account.
    Account(AccountId),
}

// ---------------------------------------------------------------------------
// KeyedTable
// ---------------------------------------------------------------------------

/// An ordered, keyed collection of fixed-shape records.
///
/// Scoping is the caller's concern: the supply registry uses one global
/// table, the balance store one table per owner. Keys are expected to be
/// cheap `Copy`-like values (the ledger uses packed symbol codes).
pub trait KeyedTable<K: Ord, V> {
    /// Looks up a row by key.
    fn find(&self, key: &K) -> Option<&V>;

    /// Inserts a new row charged to `payer`.
    ///
    /// Returns `false` and leaves the table untouched if the key is
    /// already present — callers are expected to have checked via
    /// [`find`](Self::find) first.
    fn emplace(&mut self, key: K, value: V, payer: AccountId) -> bool;

    /// Mutates an existing row in place, optionally re-attributing its
    /// storage cost. Returns `false` if the key is absent.
    fn modify(&mut self, key: &K, payer: Payer, f: impl FnOnce(&mut V)) -> bool;

    /// Removes a row. Returns the removed value, if any.
    fn erase(&mut self, key: &K) -> Option<V>;

    /// Number of rows in the table.
    fn len(&self) -> usize;

    /// Whether the table holds no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// MemTable
// ---------------------------------------------------------------------------

/// One stored row: the record plus who is paying for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Row<V> {
    value: V,
    payer: AccountId,
}

/// `BTreeMap`-backed [`KeyedTable`] for in-process ledgers and tests.
///
/// Tracks the current payer per row so that storage attribution is
/// observable, which is the only part of the payer contract an in-memory
/// table can honor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemTable<K: Ord, V> {
    rows: BTreeMap<K, Row<V>>,
}

impl<K: Ord, V> MemTable<K, V> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Who currently pays for the row's storage, if the row exists.
    pub fn payer_of(&self, key: &K) -> Option<&AccountId> {
        self.rows.get(key).map(|row| &row.payer)
    }

    /// Iterates rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter().map(|(k, row)| (k, &row.value))
    }
}

impl<K: Ord, V> Default for MemTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> KeyedTable<K, V> for MemTable<K, V> {
    fn find(&self, key: &K) -> Option<&V> {
        self.rows.get(key).map(|row| &row.value)
    }

    fn emplace(&mut self, key: K, value: V, payer: AccountId) -> bool {
        match self.rows.entry(key) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(Row { value, payer });
                true
            }
        }
    }

    fn modify(&mut self, key: &K, payer: Payer, f: impl FnOnce(&mut V)) -> bool {
        match self.rows.get_mut(key) {
            None => false,
            Some(row) => {
                f(&mut row.value);
                if let Payer::Account(account) = payer {
                    row.payer = account;
                }
                true
            }
        }
    }

    fn erase(&mut self, key: &K) -> Option<V> {
        self.rows.remove(key).map(|row| row.value)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
