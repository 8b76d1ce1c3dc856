//! Per-tier probability adjustment.
//!
//! Pure function of the tier's base chance, the room's recent win history,
//! and the sender's combo tier. No randomness here: the resolver draws the
//! sample, this module only shapes the threshold it is compared against.

use lumicast_types::jackpot::{
    ComboTier, RoomOddsState, BIG_WIN_COOLDOWN_MULT, BIG_WIN_COOLDOWN_SECS, COMBO_BOOST_FACTOR,
    COOLDOWN_DAMPING_MAX, STREAK_DAMPING_FLOOR, STREAK_DAMPING_STEP,
};

/// Effective win chance for one tier at `now`.
///
/// 1. Streak damping: each consecutive win halves-and-then-some subsequent
///    odds (`1 - 0.5 * wins`), floored at 10% of the base chance.
/// 2. Cooldown damping: while a big-win cooldown is active, odds are cut by
///    up to 80% and recover linearly as the window expires.
/// 3. Combo boost: boosting combos (3x/9x) multiply odds by 1.5.
/// 4. Result is clamped to [0,1].
pub fn adjusted_chance(base: f64, room: &RoomOddsState, combo: &ComboTier, now: u64) -> f64 {
    let mut chance = base;

    if room.consecutive_wins > 0 {
        let damp = (1.0 - STREAK_DAMPING_STEP * room.consecutive_wins as f64)
            .max(STREAK_DAMPING_FLOOR);
        chance *= damp;
    }

    if room.in_big_win_cooldown(now) {
        let window = (BIG_WIN_COOLDOWN_SECS * BIG_WIN_COOLDOWN_MULT) as f64;
        let remaining = room.big_win_cooldown_until.saturating_sub(now) as f64;
        let fraction = (remaining / window).min(1.0);
        chance *= 1.0 - COOLDOWN_DAMPING_MAX * fraction;
    }

    if combo.boosts_odds {
        chance *= COMBO_BOOST_FACTOR;
    }

    chance.clamp(0.0, 1.0)
}
