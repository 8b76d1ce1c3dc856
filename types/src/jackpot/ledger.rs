use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use super::{read_string, string_encode_size, write_string, GiftCategory, MAX_ROOM_ID_LENGTH};
use crate::{AccountId, Coins};

/// Coin account as stored in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Account {
    pub balance: Coins,
    /// Lifetime coins spent on gifts (informational).
    pub total_sent: Coins,
    /// Lifetime coins received (commission + jackpot credits).
    pub total_received: Coins,
}

impl Write for Account {
    fn write(&self, writer: &mut impl BufMut) {
        self.balance.write(writer);
        self.total_sent.write(writer);
        self.total_received.write(writer);
    }
}

impl Read for Account {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            balance: u64::read(reader)?,
            total_sent: u64::read(reader)?,
            total_received: u64::read(reader)?,
        })
    }
}

impl EncodeSize for Account {
    fn encode_size(&self) -> usize {
        self.balance.encode_size()
            + self.total_sent.encode_size()
            + self.total_received.encode_size()
    }
}

/// Immutable audit row, one per accepted gift event.
///
/// Written once inside the settlement transaction and never mutated; the
/// host income view and any statistics read from these rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GiftLedgerEntry {
    /// Monotonic sequence id allocated at commit time.
    pub sequence: u64,
    pub sender: AccountId,
    pub host: AccountId,
    pub room: String,
    pub category: GiftCategory,
    pub combo: u32,
    pub gift_unit_price: Coins,
    pub total_price: Coins,
    /// Host commission credited from this gift (bps of total price).
    pub host_commission: Coins,
    pub jackpot_won: bool,
    pub won_level: Option<u32>,
    pub jackpot_amount: Coins,
    /// Caller-supplied settlement time, seconds.
    pub settled_ts: u64,
}

impl Write for GiftLedgerEntry {
    fn write(&self, writer: &mut impl BufMut) {
        self.sequence.write(writer);
        self.sender.write(writer);
        self.host.write(writer);
        write_string(&self.room, writer);
        self.category.write(writer);
        self.combo.write(writer);
        self.gift_unit_price.write(writer);
        self.total_price.write(writer);
        self.host_commission.write(writer);
        self.jackpot_won.write(writer);
        self.won_level.write(writer);
        self.jackpot_amount.write(writer);
        self.settled_ts.write(writer);
    }
}

impl Read for GiftLedgerEntry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            sequence: u64::read(reader)?,
            sender: u64::read(reader)?,
            host: u64::read(reader)?,
            room: read_string(reader, MAX_ROOM_ID_LENGTH)?,
            category: GiftCategory::read(reader)?,
            combo: u32::read(reader)?,
            gift_unit_price: u64::read(reader)?,
            total_price: u64::read(reader)?,
            host_commission: u64::read(reader)?,
            jackpot_won: bool::read(reader)?,
            won_level: Option::<u32>::read(reader)?,
            jackpot_amount: u64::read(reader)?,
            settled_ts: u64::read(reader)?,
        })
    }
}

impl EncodeSize for GiftLedgerEntry {
    fn encode_size(&self) -> usize {
        self.sequence.encode_size()
            + self.sender.encode_size()
            + self.host.encode_size()
            + string_encode_size(&self.room)
            + self.category.encode_size()
            + self.combo.encode_size()
            + self.gift_unit_price.encode_size()
            + self.total_price.encode_size()
            + self.host_commission.encode_size()
            + self.jackpot_won.encode_size()
            + self.won_level.encode_size()
            + self.jackpot_amount.encode_size()
            + self.settled_ts.encode_size()
    }
}

/// Ledger state keys
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug)]
pub enum LedgerKey {
    Account(AccountId),
    Entry(u64),
    /// Next gift ledger sequence id.
    Sequence,
}

impl Write for LedgerKey {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Account(id) => {
                0u8.write(writer);
                id.write(writer);
            }
            Self::Entry(sequence) => {
                1u8.write(writer);
                sequence.write(writer);
            }
            Self::Sequence => {
                2u8.write(writer);
            }
        }
    }
}

impl Read for LedgerKey {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Self::Account(u64::read(reader)?)),
            1 => Ok(Self::Entry(u64::read(reader)?)),
            2 => Ok(Self::Sequence),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for LedgerKey {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Account(id) => id.encode_size(),
            Self::Entry(sequence) => sequence.encode_size(),
            Self::Sequence => 0,
        }
    }
}

/// Ledger state values
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerValue {
    Account(Account),
    Entry(GiftLedgerEntry),
    Sequence(u64),
}

impl Write for LedgerValue {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Account(account) => {
                0u8.write(writer);
                account.write(writer);
            }
            Self::Entry(entry) => {
                1u8.write(writer);
                entry.write(writer);
            }
            Self::Sequence(next) => {
                2u8.write(writer);
                next.write(writer);
            }
        }
    }
}

impl Read for LedgerValue {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let tag = u8::read(reader)?;
        match tag {
            0 => Ok(Self::Account(Account::read(reader)?)),
            1 => Ok(Self::Entry(GiftLedgerEntry::read(reader)?)),
            2 => Ok(Self::Sequence(u64::read(reader)?)),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for LedgerValue {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Account(account) => account.encode_size(),
            Self::Entry(entry) => entry.encode_size(),
            Self::Sequence(next) => next.encode_size(),
        }
    }
}
