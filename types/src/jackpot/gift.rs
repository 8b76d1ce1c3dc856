use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use thiserror::Error as ThisError;

use super::MAX_ROOM_ID_LENGTH;
use crate::{AccountId, Coins};

/// Gift categories as configured in the catalog.
///
/// Only `Standard` and `Event` gifts participate in the jackpot; `Luxury`
/// gifts are settled by the plain commission path and never reach the
/// resolver roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GiftCategory {
    Standard = 0,
    Event = 1,
    Luxury = 2,
}

impl GiftCategory {
    pub fn jackpot_eligible(&self) -> bool {
        !matches!(self, Self::Luxury)
    }
}

impl Write for GiftCategory {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GiftCategory {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Standard),
            1 => Ok(Self::Event),
            2 => Ok(Self::Luxury),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for GiftCategory {
    const SIZE: usize = 1;
}

/// Why a gift-send request was rejected before any mutation.
#[derive(Clone, Copy, Debug, ThisError, PartialEq, Eq)]
pub enum RejectReason {
    #[error("combo value {0} is not in the configured combo set")]
    InvalidCombo(u32),
    #[error("gift category is not jackpot-eligible")]
    IneligibleCategory,
    #[error("insufficient funds (balance={balance}, required={required})")]
    InsufficientFunds { balance: Coins, required: Coins },
}

impl Write for RejectReason {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::InvalidCombo(value) => {
                0u8.write(writer);
                value.write(writer);
            }
            Self::IneligibleCategory => 1u8.write(writer),
            Self::InsufficientFunds { balance, required } => {
                2u8.write(writer);
                balance.write(writer);
                required.write(writer);
            }
        }
    }
}

impl Read for RejectReason {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Self::InvalidCombo(u32::read(reader)?)),
            1 => Ok(Self::IneligibleCategory),
            2 => Ok(Self::InsufficientFunds {
                balance: u64::read(reader)?,
                required: u64::read(reader)?,
            }),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for RejectReason {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::InvalidCombo(value) => value.encode_size(),
            Self::IneligibleCategory => 0,
            Self::InsufficientFunds { balance, required } => {
                balance.encode_size() + required.encode_size()
            }
        }
    }
}

/// A gift-send event as handed to the engine by the socket/HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiftRequest {
    pub sender: AccountId,
    pub host: AccountId,
    pub room: String,
    /// Positive coin price of one gift unit.
    pub gift_unit_price: Coins,
    /// Sender-chosen combo value (must be in the configured set).
    pub combo: u32,
    pub category: GiftCategory,
    /// Coins available at time of request (loaded by the orchestrator).
    pub sender_balance: Coins,
}

/// Authoritative outcome of one gift-send event.
///
/// Every balance/ledger mutation derives from this value; nothing downstream
/// recomputes the reward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiftResolution {
    /// `None` when accepted; otherwise the reason nothing was mutated.
    pub rejection: Option<RejectReason>,
    /// Coins charged. Always the gift unit price: combo scales reward and
    /// odds, never the charge (one UI "combo send" is many engine calls).
    pub total_price: Coins,
    pub jackpot_won: bool,
    pub won_level: Option<u32>,
    pub jackpot_amount: Coins,
    /// `sender_balance - total_price + jackpot_amount` when accepted;
    /// the untouched balance when rejected.
    pub new_sender_balance: Coins,
}

impl GiftResolution {
    pub fn rejected(reason: RejectReason, sender_balance: Coins) -> Self {
        Self {
            rejection: Some(reason),
            total_price: 0,
            jackpot_won: false,
            won_level: None,
            jackpot_amount: 0,
            new_sender_balance: sender_balance,
        }
    }

    pub fn accepted(&self) -> bool {
        self.rejection.is_none()
    }
}

impl Write for GiftResolution {
    fn write(&self, writer: &mut impl BufMut) {
        self.rejection.write(writer);
        self.total_price.write(writer);
        self.jackpot_won.write(writer);
        self.won_level.write(writer);
        self.jackpot_amount.write(writer);
        self.new_sender_balance.write(writer);
    }
}

impl Read for GiftResolution {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            rejection: Option::<RejectReason>::read(reader)?,
            total_price: u64::read(reader)?,
            jackpot_won: bool::read(reader)?,
            won_level: Option::<u32>::read(reader)?,
            jackpot_amount: u64::read(reader)?,
            new_sender_balance: u64::read(reader)?,
        })
    }
}

impl EncodeSize for GiftResolution {
    fn encode_size(&self) -> usize {
        self.rejection.encode_size()
            + self.total_price.encode_size()
            + self.jackpot_won.encode_size()
            + self.won_level.encode_size()
            + self.jackpot_amount.encode_size()
            + self.new_sender_balance.encode_size()
    }
}

/// Validate a room id before it is written into persisted records.
pub fn validate_room_id(room: &str) -> bool {
    !room.is_empty() && room.len() <= MAX_ROOM_ID_LENGTH
}
