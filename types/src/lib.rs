pub mod jackpot;

pub use jackpot::{
    Account, ComboTier, GiftCategory, GiftLedgerEntry, GiftRequest, GiftResolution, JackpotTable,
    JackpotTier, LedgerKey, LedgerValue, RejectReason, RoomOddsState, TableError, TierClass,
};

/// Coin amounts are platform-wide u64 quantities.
pub type Coins = u64;

/// Opaque account identifier assigned by the platform's auth layer.
pub type AccountId = u64;
