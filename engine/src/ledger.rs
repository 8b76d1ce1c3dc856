//! Ledger access.
//!
//! Settlement never writes through to the backing store directly. Mutations
//! accumulate in an [`Overlay`] and land in one [`Ledger::apply`] call, so a
//! failure partway through building a settlement leaves the store untouched.

use std::collections::BTreeMap;
use std::future::Future;

use anyhow::Result;
use lumicast_types::jackpot::{Account, LedgerKey, LedgerValue};
use lumicast_types::AccountId;

#[cfg(any(test, feature = "mocks"))]
use std::collections::HashMap;

/// Backing store for account balances and gift history.
///
/// The store is append/update only. `apply` is the commit point: an
/// implementation must make the whole batch visible or none of it.
pub trait Ledger {
    fn get(&self, key: &LedgerKey) -> impl Future<Output = Result<Option<LedgerValue>>>;
    fn insert(&mut self, key: LedgerKey, value: LedgerValue) -> impl Future<Output = Result<()>>;

    fn apply(&mut self, changes: Vec<(LedgerKey, LedgerValue)>) -> impl Future<Output = Result<()>> {
        async {
            for (key, value) in changes {
                self.insert(key, value).await?;
            }
            Ok(())
        }
    }
}

/// In-memory ledger for tests and local runs.
#[cfg(any(test, feature = "mocks"))]
#[derive(Default)]
pub struct Memory {
    state: HashMap<LedgerKey, LedgerValue>,
}

#[cfg(any(test, feature = "mocks"))]
impl Ledger for Memory {
    async fn get(&self, key: &LedgerKey) -> Result<Option<LedgerValue>> {
        Ok(self.state.get(key).cloned())
    }

    async fn insert(&mut self, key: LedgerKey, value: LedgerValue) -> Result<()> {
        self.state.insert(key, value);
        Ok(())
    }
}

pub async fn load_account<L: Ledger>(ledger: &L, id: AccountId) -> Result<Account> {
    Ok(match ledger.get(&LedgerKey::Account(id)).await? {
        Some(LedgerValue::Account(account)) => account,
        _ => Account::default(),
    })
}

pub(crate) async fn load_sequence<L: Ledger>(ledger: &L) -> Result<u64> {
    Ok(match ledger.get(&LedgerKey::Sequence).await? {
        Some(LedgerValue::Sequence(sequence)) => sequence,
        _ => 0,
    })
}

/// Uncommitted settlement writes layered over a ledger.
///
/// Reads see pending writes first, then fall through to the backing store.
/// `drain` hands the batch to the caller for a single `apply`.
pub struct Overlay<'a, L: Ledger> {
    ledger: &'a L,
    pending: BTreeMap<LedgerKey, LedgerValue>,
}

impl<'a, L: Ledger> Overlay<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            pending: BTreeMap::new(),
        }
    }

    pub fn drain(self) -> Vec<(LedgerKey, LedgerValue)> {
        self.pending.into_iter().collect()
    }
}

impl<'a, L: Ledger> Ledger for Overlay<'a, L> {
    async fn get(&self, key: &LedgerKey) -> Result<Option<LedgerValue>> {
        Ok(match self.pending.get(key) {
            Some(value) => Some(value.clone()),
            None => self.ledger.get(key).await?,
        })
    }

    async fn insert(&mut self, key: LedgerKey, value: LedgerValue) -> Result<()> {
        self.pending.insert(key, value);
        Ok(())
    }
}
