//! Test doubles for deterministic engine tests.

use std::cell::Cell;

use anyhow::{bail, Result};
use lumicast_types::jackpot::{GiftCategory, GiftRequest};
use lumicast_types::{AccountId, Coins, jackpot::{LedgerKey, LedgerValue}};

use crate::ledger::{Ledger, Memory};
use crate::resolver::JackpotRng;

/// RNG returning a fixed script of samples; repeats the last one forever.
pub struct ScriptedRng {
    samples: Vec<f64>,
    drawn: Cell<usize>,
}

impl ScriptedRng {
    pub fn new(samples: Vec<f64>) -> Self {
        assert!(!samples.is_empty());
        Self {
            samples,
            drawn: Cell::new(0),
        }
    }

    /// Every draw returns the same sample.
    pub fn always(sample: f64) -> Self {
        Self::new(vec![sample])
    }

    /// How many samples the code under test consumed.
    pub fn draws(&self) -> usize {
        self.drawn.get()
    }
}

impl JackpotRng for ScriptedRng {
    fn next_chance(&mut self) -> f64 {
        let i = self.drawn.get();
        self.drawn.set(i + 1);
        *self
            .samples
            .get(i)
            .unwrap_or_else(|| self.samples.last().unwrap())
    }
}

/// Ledger whose commit always fails, for rollback behavior tests.
///
/// Reads and buffered writes succeed; only `apply` errors, mimicking a
/// store that loses the transaction at commit time.
#[derive(Default)]
pub struct FailingLedger {
    inner: Memory,
}

impl Ledger for FailingLedger {
    async fn get(&self, key: &LedgerKey) -> Result<Option<LedgerValue>> {
        self.inner.get(key).await
    }

    async fn insert(&mut self, key: LedgerKey, value: LedgerValue) -> Result<()> {
        self.inner.insert(key, value).await
    }

    async fn apply(&mut self, _changes: Vec<(LedgerKey, LedgerValue)>) -> Result<()> {
        bail!("ledger commit failed")
    }
}

impl FailingLedger {
    /// Seed the readable state before the failing commit path is exercised.
    pub async fn seed(&mut self, key: LedgerKey, value: LedgerValue) -> Result<()> {
        self.inner.insert(key, value).await
    }
}

/// Gift request with fixed sender/host/room and the given knobs.
pub fn request(
    gift_unit_price: Coins,
    combo: u32,
    category: GiftCategory,
    sender_balance: Coins,
) -> GiftRequest {
    request_between(1, 2, gift_unit_price, combo, category, sender_balance)
}

pub fn request_between(
    sender: AccountId,
    host: AccountId,
    gift_unit_price: Coins,
    combo: u32,
    category: GiftCategory,
    sender_balance: Coins,
) -> GiftRequest {
    GiftRequest {
        sender,
        host,
        room: "room-1".to_string(),
        gift_unit_price,
        combo,
        category,
        sender_balance,
    }
}
