/// Maximum room id length for persisted records
pub const MAX_ROOM_ID_LENGTH: usize = 64;

/// Combo values a sender may attach to a jackpot-eligible gift.
/// Any other value is rejected before the engine touches room state.
pub const COMBO_VALUES: [u32; 6] = [1, 3, 9, 19, 66, 199];

/// Combo values that additionally boost win probability.
pub const BOOSTING_COMBO_VALUES: [u32; 2] = [3, 9];

/// Probability boost applied when the chosen combo is a boosting one.
pub const COMBO_BOOST_FACTOR: f64 = 1.5;

/// Consecutive-win counter wraps back to zero at this bound.
pub const MAX_CONSECUTIVE_WINS: u32 = 8;

/// Per-win damping of subsequent odds: `1 - 0.5 * wins`, floored below.
pub const STREAK_DAMPING_STEP: f64 = 0.5;

/// Streak damping never cuts odds below 10% of the base chance.
pub const STREAK_DAMPING_FLOOR: f64 = 0.1;

/// A streak goes stale once this many seconds pass without a new win.
pub const WIN_STREAK_DECAY_SECS: u64 = 30;

/// Base cooldown window after a large-tier win.
pub const BIG_WIN_COOLDOWN_SECS: u64 = 600;

/// Large-tier wins extend the base cooldown by this factor.
pub const BIG_WIN_COOLDOWN_MULT: u64 = 2;

/// Maximum damping applied at the start of a big-win cooldown (odds recover
/// linearly back to full strength as the window expires).
pub const COOLDOWN_DAMPING_MAX: f64 = 0.8;

/// Tiers at or above this level are "large": excluded while a big-win
/// cooldown is active and triggering the extended cooldown when won.
pub const LARGE_TIER_MIN_LEVEL: u32 = 500;

/// Host commission on jackpot-eligible gifts (basis points of total price).
pub const JACKPOT_GIFT_COMMISSION_BPS: u64 = 2_000; // 20%

/// Host commission on luxury gifts (settled outside this engine; recorded
/// here so both paths share one schedule).
pub const LUXURY_GIFT_COMMISSION_BPS: u64 = 4_000; // 40%

/// Reserved: "coin depletion triggers jackpot" threshold carried over from
/// the product configuration. Nothing reads it; do not wire it into the
/// resolver without product confirmation.
pub const COIN_DEPLETION_JACKPOT_THRESHOLD: u64 = 100_000;
