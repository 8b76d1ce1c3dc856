use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::{
    BOOSTING_COMBO_VALUES, COIN_DEPLETION_JACKPOT_THRESHOLD, COMBO_VALUES, LARGE_TIER_MIN_LEVEL,
};

/// Reward size class of a jackpot tier.
///
/// Large tiers sit out while a big-win cooldown is active and trigger the
/// extended cooldown when won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierClass {
    Small,
    Medium,
    Large,
}

/// One jackpot payout tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JackpotTier {
    /// Reward size identifier (20/50/100/200/500/1000 in the default table).
    pub level: u32,
    /// Win probability before room-state adjustment, in [0,1].
    pub base_chance: f64,
    /// Reward = gift unit price * this multiplier * combo payout multiplier.
    pub reward_multiplier: u32,
    pub class: TierClass,
}

impl JackpotTier {
    pub fn is_large(&self) -> bool {
        self.level >= LARGE_TIER_MIN_LEVEL
    }
}

/// One sender-selectable combo tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTier {
    /// The value the sender picks in the gift panel (1/3/9/19/66/199).
    pub value: u32,
    /// Scales the jackpot reward, never the charge.
    pub payout_multiplier: u32,
    /// Whether this combo also boosts win probability.
    pub boosts_odds: bool,
}

/// Validation failures raised when a table is loaded at process start.
#[derive(Debug, ThisError, PartialEq)]
pub enum TableError {
    #[error("duplicate tier level {0}")]
    DuplicateLevel(u32),
    #[error("tier levels must be ascending (level {0} follows {1})")]
    UnorderedLevels(u32, u32),
    #[error("tier {level} base chance {chance} outside [0,1]")]
    ChanceOutOfRange { level: u32, chance: f64 },
    #[error("tier {0} has zero reward multiplier")]
    ZeroRewardMultiplier(u32),
    #[error("duplicate combo value {0}")]
    DuplicateCombo(u32),
    #[error("combo {0} has zero payout multiplier")]
    ZeroPayoutMultiplier(u32),
    #[error("table has no tiers")]
    Empty,
}

/// Static jackpot configuration: payout tiers, combo tiers, and reserved
/// tunables. Loaded once at process start and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JackpotTable {
    pub tiers: Vec<JackpotTier>,
    pub combos: Vec<ComboTier>,
    /// Reserved product configuration; nothing reads it (see constants).
    #[serde(default = "default_depletion_threshold")]
    pub coin_depletion_threshold: u64,
}

fn default_depletion_threshold() -> u64 {
    COIN_DEPLETION_JACKPOT_THRESHOLD
}

impl Default for JackpotTable {
    fn default() -> Self {
        let tiers = vec![
            tier(20, 0.18, TierClass::Small),
            tier(50, 0.10, TierClass::Small),
            tier(100, 0.05, TierClass::Medium),
            tier(200, 0.02, TierClass::Medium),
            tier(500, 0.008, TierClass::Large),
            tier(1000, 0.003, TierClass::Large),
        ];
        let combos = COMBO_VALUES
            .iter()
            .map(|&value| ComboTier {
                value,
                payout_multiplier: value,
                boosts_odds: BOOSTING_COMBO_VALUES.contains(&value),
            })
            .collect();
        Self {
            tiers,
            combos,
            coin_depletion_threshold: COIN_DEPLETION_JACKPOT_THRESHOLD,
        }
    }
}

fn tier(level: u32, base_chance: f64, class: TierClass) -> JackpotTier {
    JackpotTier {
        level,
        base_chance,
        reward_multiplier: level,
        class,
    }
}

impl JackpotTable {
    /// Load a table from JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, TableLoadError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Startup validation: unique ascending levels, probabilities in [0,1],
    /// unique combo values, non-zero multipliers.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.tiers.is_empty() {
            return Err(TableError::Empty);
        }
        for pair in self.tiers.windows(2) {
            if pair[1].level == pair[0].level {
                return Err(TableError::DuplicateLevel(pair[1].level));
            }
            if pair[1].level < pair[0].level {
                return Err(TableError::UnorderedLevels(pair[1].level, pair[0].level));
            }
        }
        for t in &self.tiers {
            if !(0.0..=1.0).contains(&t.base_chance) {
                return Err(TableError::ChanceOutOfRange {
                    level: t.level,
                    chance: t.base_chance,
                });
            }
            if t.reward_multiplier == 0 {
                return Err(TableError::ZeroRewardMultiplier(t.level));
            }
        }
        let mut seen = Vec::with_capacity(self.combos.len());
        for c in &self.combos {
            if seen.contains(&c.value) {
                return Err(TableError::DuplicateCombo(c.value));
            }
            seen.push(c.value);
            if c.payout_multiplier == 0 {
                return Err(TableError::ZeroPayoutMultiplier(c.value));
            }
        }
        Ok(())
    }

    /// Look up a combo tier by sender-chosen value.
    pub fn combo(&self, value: u32) -> Option<&ComboTier> {
        self.combos.iter().find(|c| c.value == value)
    }

    /// Tiers in descending level order, the order the resolver rolls them.
    pub fn tiers_desc(&self) -> impl Iterator<Item = &JackpotTier> {
        self.tiers.iter().rev()
    }
}

/// Errors from [`JackpotTable::from_json`].
#[derive(Debug, ThisError)]
pub enum TableLoadError {
    #[error("malformed table json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] TableError),
}
