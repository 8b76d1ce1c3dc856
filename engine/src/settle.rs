//! Gift settlement.
//!
//! One entry point, [`Settler::resolve_and_settle`], takes a gift-send
//! event from validation through jackpot resolution to the atomic balance
//! and history commit.
//!
//! Ordering note: the room's odds state mutates inside the resolution step,
//! before the ledger commit. If the commit fails, the odds mutation stands.
//! The odds state is heuristic tuning, not money; re-reconciling it against
//! a failed commit is not worth a cross-store transaction.

use anyhow::{bail, Context, Result};
use lumicast_types::jackpot::{
    validate_room_id, GiftCategory, GiftLedgerEntry, GiftRequest, GiftResolution, JackpotTable,
    LedgerKey, LedgerValue, JACKPOT_GIFT_COMMISSION_BPS, LUXURY_GIFT_COMMISSION_BPS,
};
use lumicast_types::{AccountId, Coins};
use tracing::{debug, info};

use crate::ledger::{load_account, load_sequence, Ledger, Overlay};
use crate::resolver::{resolve, JackpotRng};
use crate::rooms::OddsStore;

const BPS_DENOMINATOR: u64 = 10_000;

/// Host's cut of a gift's price, in coins.
fn host_commission(total_price: Coins, category: GiftCategory) -> Coins {
    let bps = match category {
        GiftCategory::Luxury => LUXURY_GIFT_COMMISSION_BPS,
        _ => JACKPOT_GIFT_COMMISSION_BPS,
    };
    ((total_price as u128 * bps as u128) / BPS_DENOMINATOR as u128) as u64
}

/// Orchestrates resolution and settlement of gift-send events.
pub struct Settler<L: Ledger, O: OddsStore> {
    ledger: L,
    odds: O,
    table: JackpotTable,
}

impl<L: Ledger, O: OddsStore> Settler<L, O> {
    pub fn new(ledger: L, odds: O, table: JackpotTable) -> Self {
        Self {
            ledger,
            odds,
            table,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn odds(&self) -> &O {
        &self.odds
    }

    /// Resolve a gift-send event and commit its settlement.
    ///
    /// Returns `Ok` with a rejecting [`GiftResolution`] for domain
    /// rejections (bad combo, ineligible category, insufficient funds);
    /// those never touch the ledger or the room state. `Err` means the
    /// request was malformed or the ledger commit failed.
    #[allow(clippy::too_many_arguments)]
    pub async fn resolve_and_settle(
        &mut self,
        sender: AccountId,
        host: AccountId,
        room: &str,
        gift_unit_price: Coins,
        combo: u32,
        category: GiftCategory,
        now: u64,
        rng: &mut impl JackpotRng,
    ) -> Result<GiftResolution> {
        if !validate_room_id(room) {
            bail!("invalid room id: {room:?}");
        }
        if gift_unit_price == 0 {
            bail!("gift unit price must be positive");
        }

        let sender_account = load_account(&self.ledger, sender)
            .await
            .context("load sender")?;
        let request = GiftRequest {
            sender,
            host,
            room: room.to_string(),
            gift_unit_price,
            combo,
            category,
            sender_balance: sender_account.balance,
        };

        // Resolution runs under the room lock so concurrent gifts to the
        // same room observe each other's odds adjustments in order.
        let resolution = self
            .odds
            .with_room(room, |state| resolve(&self.table, state, &request, now, rng));

        if let Some(reason) = resolution.rejection {
            debug!(room, sender, %reason, "gift rejected");
            return Ok(resolution);
        }

        // Buffer every write, then commit in one apply.
        let mut overlay = Overlay::new(&self.ledger);

        let commission = host_commission(resolution.total_price, category);

        let mut sender_account = sender_account;
        sender_account.balance = resolution.new_sender_balance;
        sender_account.total_sent = sender_account
            .total_sent
            .saturating_add(resolution.total_price);
        overlay
            .insert(
                LedgerKey::Account(sender),
                LedgerValue::Account(sender_account),
            )
            .await?;

        // Read through the overlay: if sender == host the commission lands
        // on the already-debited account.
        let mut host_account = load_account(&overlay, host).await.context("load host")?;
        host_account.balance = host_account.balance.saturating_add(commission);
        host_account.total_received = host_account.total_received.saturating_add(commission);
        overlay
            .insert(LedgerKey::Account(host), LedgerValue::Account(host_account))
            .await?;

        let sequence = load_sequence(&overlay).await.context("load sequence")?;
        overlay
            .insert(LedgerKey::Sequence, LedgerValue::Sequence(sequence + 1))
            .await?;
        overlay
            .insert(
                LedgerKey::Entry(sequence),
                LedgerValue::Entry(GiftLedgerEntry {
                    sequence,
                    sender,
                    host,
                    room: room.to_string(),
                    category,
                    combo,
                    gift_unit_price,
                    total_price: resolution.total_price,
                    host_commission: commission,
                    jackpot_won: resolution.jackpot_won,
                    won_level: resolution.won_level,
                    jackpot_amount: resolution.jackpot_amount,
                    settled_ts: now,
                }),
            )
            .await?;

        let changes = overlay.drain();
        self.ledger
            .apply(changes)
            .await
            .context("commit settlement")?;

        info!(
            room,
            sender,
            host,
            sequence,
            total_price = resolution.total_price,
            commission,
            jackpot_won = resolution.jackpot_won,
            jackpot_amount = resolution.jackpot_amount,
            "gift settled"
        );
        Ok(resolution)
    }
}
