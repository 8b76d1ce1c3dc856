//! Jackpot resolution.
//!
//! Given a gift-send request and the room's odds state, decide whether a
//! jackpot is won and at which tier, then apply the room state transitions.
//! Rejections happen before any mutation and consult no randomness.
//!
//! Tiers are evaluated from highest level to lowest: rarer rewards get
//! their roll first each call, with failure falling through to the smaller
//! tiers. This ordering is deliberate and load-bearing for the payout
//! distribution; do not "fix" it to ascending.

use lumicast_types::jackpot::{GiftRequest, GiftResolution, JackpotTable, RejectReason,
    RoomOddsState};
use tracing::debug;

use crate::odds::adjusted_chance;

/// Uniform randomness source for the win roll.
///
/// Production callers use any [`rand::Rng`] (blanket impl below); tests
/// script the samples to pin outcomes.
pub trait JackpotRng {
    /// One uniform sample in `[0, 1)`.
    fn next_chance(&mut self) -> f64;
}

impl<R: rand::Rng> JackpotRng for R {
    fn next_chance(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Resolve one gift-send event against a room's odds state.
///
/// Mutates `room` (win history, streak decay, spend totals); callers must
/// hold the room's serialization, normally via
/// [`OddsStore::with_room`](crate::rooms::OddsStore::with_room).
pub fn resolve(
    table: &JackpotTable,
    room: &mut RoomOddsState,
    request: &GiftRequest,
    now: u64,
    rng: &mut impl JackpotRng,
) -> GiftResolution {
    // All rejections precede any room mutation or randomness, so a rejected
    // request resubmitted verbatim rejects identically.
    let combo = match table.combo(request.combo) {
        Some(combo) => *combo,
        None => {
            return GiftResolution::rejected(
                RejectReason::InvalidCombo(request.combo),
                request.sender_balance,
            )
        }
    };
    if !request.category.jackpot_eligible() {
        return GiftResolution::rejected(RejectReason::IneligibleCategory, request.sender_balance);
    }
    if request.sender_balance < request.gift_unit_price {
        return GiftResolution::rejected(
            RejectReason::InsufficientFunds {
                balance: request.sender_balance,
                required: request.gift_unit_price,
            },
            request.sender_balance,
        );
    }

    let in_cooldown = room.in_big_win_cooldown(now);
    let total_price = request.gift_unit_price;

    // Highest level first; at most one tier can win per call.
    let mut won = None;
    for tier in table.tiers_desc() {
        if in_cooldown && tier.is_large() {
            continue;
        }
        let chance = adjusted_chance(tier.base_chance, room, &combo, now);
        if rng.next_chance() < chance {
            won = Some(*tier);
            break;
        }
    }

    let (jackpot_won, won_level, jackpot_amount) = match won {
        Some(tier) => {
            let reward = total_price
                .saturating_mul(tier.reward_multiplier as u64)
                .saturating_mul(combo.payout_multiplier as u64);
            room.register_win(tier.level, tier.is_large(), now);
            debug!(
                room = %request.room,
                sender = request.sender,
                level = tier.level,
                reward,
                streak = room.consecutive_wins,
                "jackpot won"
            );
            (true, Some(tier.level), reward)
        }
        None => (false, None, 0),
    };

    // Win or lose, a streak older than the decay window stops damping.
    room.decay_streak(now);
    room.register_spend(total_price, now);

    let new_sender_balance = request
        .sender_balance
        .saturating_sub(total_price)
        .saturating_add(jackpot_amount);

    GiftResolution {
        rejection: None,
        total_price,
        jackpot_won,
        won_level,
        jackpot_amount,
        new_sender_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{request, ScriptedRng};
    use lumicast_types::jackpot::{
        GiftCategory, BIG_WIN_COOLDOWN_MULT, BIG_WIN_COOLDOWN_SECS, WIN_STREAK_DECAY_SECS,
    };

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn scripted_sample_wins_smallest_tier() {
        // Sample 0.10 misses every tier above level 20 (all chances <= 0.10)
        // and lands under the 0.18 base chance of level 20.
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.10);

        let request = request(100, 1, GiftCategory::Standard, 10_000);
        let resolution = resolve(&table, &mut room, &request, NOW, &mut rng);

        assert!(resolution.accepted());
        assert!(resolution.jackpot_won);
        assert_eq!(resolution.won_level, Some(20));
        assert_eq!(resolution.total_price, 100);
        assert_eq!(resolution.jackpot_amount, 100 * 20 * 1);
        assert_eq!(resolution.new_sender_balance, 10_000 - 100 + 2_000);

        assert_eq!(room.last_jackpot_level, 20);
        assert_eq!(room.consecutive_wins, 1);
        assert_eq!(room.total_spent, 100);
        // Small-tier wins never start a cooldown.
        assert_eq!(room.big_win_cooldown_until, 0);
    }

    #[test]
    fn highest_tier_rolls_first() {
        // First sample wins immediately, so the winner must be level 1000.
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::new(vec![0.0001]);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        assert_eq!(resolution.won_level, Some(1000));
        assert_eq!(rng.draws(), 1);
        // Large win: extended cooldown strictly in the future.
        assert_eq!(
            room.big_win_cooldown_until,
            NOW + BIG_WIN_COOLDOWN_SECS * BIG_WIN_COOLDOWN_MULT
        );
    }

    #[test]
    fn at_most_one_tier_wins_per_call() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        // Every sample would win every tier; evaluation must stop at the
        // first (highest) one.
        let mut rng = ScriptedRng::always(0.0);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        assert_eq!(resolution.won_level, Some(1000));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn large_tiers_sit_out_during_cooldown() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState {
            big_win_cooldown_until: NOW + 100,
            ..Default::default()
        };
        let mut rng = ScriptedRng::always(0.0);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        // 500 and 1000 were skipped without a roll; 200 won on the first draw.
        assert_eq!(resolution.won_level, Some(200));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn large_tiers_roll_again_once_cooldown_expires() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState {
            big_win_cooldown_until: NOW,
            ..Default::default()
        };
        let mut rng = ScriptedRng::always(0.0);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        assert_eq!(resolution.won_level, Some(1000));
    }

    #[test]
    fn lose_path_still_records_spend() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.999);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        assert!(resolution.accepted());
        assert!(!resolution.jackpot_won);
        assert_eq!(resolution.jackpot_amount, 0);
        assert_eq!(resolution.new_sender_balance, 9_900);
        assert_eq!(room.total_spent, 100);
        assert_eq!(room.last_spend_ts, NOW);
        assert_eq!(rng.draws(), 6);
    }

    #[test]
    fn combo_multiplies_reward_not_price() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.10);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 9, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );

        // 9x combo: charge stays 100, reward is 100 * 20 * 9.
        assert_eq!(resolution.total_price, 100);
        assert_eq!(resolution.won_level, Some(20));
        assert_eq!(resolution.jackpot_amount, 18_000);
    }

    #[test]
    fn invalid_combo_rejects_without_mutation() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.0);
        let req = request(100, 7, GiftCategory::Standard, 10_000);

        for _ in 0..2 {
            let resolution = resolve(&table, &mut room, &req, NOW, &mut rng);
            assert_eq!(resolution.rejection, Some(RejectReason::InvalidCombo(7)));
            assert_eq!(resolution.new_sender_balance, 10_000);
        }

        // Same rejection twice, zero state mutation, zero randomness.
        assert_eq!(room, RoomOddsState::default());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn luxury_category_rejects_without_randomness() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.0);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Luxury, 1_000_000),
            NOW,
            &mut rng,
        );

        assert_eq!(resolution.rejection, Some(RejectReason::IneligibleCategory));
        assert_eq!(room, RoomOddsState::default());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn insufficient_funds_rejects_without_mutation() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.10);

        let resolution = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 50),
            NOW,
            &mut rng,
        );

        assert_eq!(
            resolution.rejection,
            Some(RejectReason::InsufficientFunds {
                balance: 50,
                required: 100
            })
        );
        assert_eq!(resolution.new_sender_balance, 50);
        assert_eq!(room, RoomOddsState::default());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn consecutive_wins_damp_the_next_roll() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();

        // First win at level 20.
        let mut rng = ScriptedRng::always(0.10);
        let first = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );
        assert!(first.jackpot_won);
        assert_eq!(room.consecutive_wins, 1);

        // Same sample one second later: level 20's chance is now
        // 0.18 * 0.5 = 0.09 < 0.10, so the damped roll loses.
        let mut rng = ScriptedRng::always(0.10);
        let second = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW + 1,
            &mut rng,
        );
        assert!(!second.jackpot_won);
    }

    #[test]
    fn streak_decays_after_quiet_window() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();

        let mut rng = ScriptedRng::always(0.10);
        resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );
        assert_eq!(room.consecutive_wins, 1);

        // A losing call more than 30s later clears the streak.
        let mut rng = ScriptedRng::always(0.999);
        resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW + WIN_STREAK_DECAY_SECS + 1,
            &mut rng,
        );
        assert_eq!(room.consecutive_wins, 0);
    }

    #[test]
    fn boosting_combo_raises_the_threshold() {
        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        // 0.20 loses against the plain 0.18 but wins against 0.18 * 1.5.
        let mut rng = ScriptedRng::always(0.20);

        let plain = resolve(
            &table,
            &mut room,
            &request(100, 1, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );
        assert!(!plain.jackpot_won);

        let mut room = RoomOddsState::default();
        let mut rng = ScriptedRng::always(0.20);
        let boosted = resolve(
            &table,
            &mut room,
            &request(100, 3, GiftCategory::Standard, 10_000),
            NOW,
            &mut rng,
        );
        assert!(boosted.jackpot_won);
        assert_eq!(boosted.won_level, Some(20));
        assert_eq!(boosted.jackpot_amount, 100 * 20 * 3);
    }

    #[test]
    fn real_rng_resolves_without_panicking() {
        use rand::{rngs::StdRng, SeedableRng};

        let table = JackpotTable::default();
        let mut room = RoomOddsState::default();
        let mut rng = StdRng::seed_from_u64(7);

        for i in 0..100 {
            let resolution = resolve(
                &table,
                &mut room,
                &request(100, 1, GiftCategory::Standard, 10_000),
                NOW + i,
                &mut rng,
            );
            assert!(resolution.accepted());
            assert_eq!(
                resolution.new_sender_balance,
                10_000 - 100 + resolution.jackpot_amount
            );
        }
        assert_eq!(room.total_spent, 100 * 100);
    }

    #[test]
    fn balance_identity_holds() {
        let table = JackpotTable::default();
        for sample in [0.0, 0.05, 0.10, 0.5, 0.999] {
            let mut room = RoomOddsState::default();
            let mut rng = ScriptedRng::always(sample);
            let resolution = resolve(
                &table,
                &mut room,
                &request(100, 19, GiftCategory::Event, 10_000),
                NOW,
                &mut rng,
            );
            assert!(resolution.accepted());
            assert_eq!(
                resolution.new_sender_balance,
                10_000 - resolution.total_price + resolution.jackpot_amount
            );
        }
    }
}
