use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

use super::{BIG_WIN_COOLDOWN_MULT, BIG_WIN_COOLDOWN_SECS, MAX_CONSECUTIVE_WINS,
    WIN_STREAK_DECAY_SECS};

/// Mutable per-room odds state.
///
/// One record per live room, created lazily on the first gift event and kept
/// for the life of the hosting process (or the backing store, if shared).
/// All timestamps are caller-supplied seconds; the engine never reads a
/// wall clock.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RoomOddsState {
    pub last_jackpot_ts: u64,
    pub last_jackpot_level: u32,
    /// Recent-win counter feeding streak damping; wraps at
    /// [`MAX_CONSECUTIVE_WINS`].
    pub consecutive_wins: u32,
    /// Informational running total of coins spent in the room.
    pub total_spent: u64,
    pub last_spend_ts: u64,
    /// While `now` is before this timestamp, large tiers are excluded and
    /// all odds are damped.
    pub big_win_cooldown_until: u64,
}

impl RoomOddsState {
    /// Whether the room is inside a big-win cooldown at `now`.
    pub fn in_big_win_cooldown(&self, now: u64) -> bool {
        now < self.big_win_cooldown_until
    }

    /// Reset a stale streak: more than [`WIN_STREAK_DECAY_SECS`] without a
    /// new win clears the damping counter.
    pub fn decay_streak(&mut self, now: u64) {
        if self.consecutive_wins > 0
            && now.saturating_sub(self.last_jackpot_ts) > WIN_STREAK_DECAY_SECS
        {
            self.consecutive_wins = 0;
        }
    }

    /// Record a jackpot win at `now` on `level`, starting the extended
    /// cooldown when the tier is large.
    pub fn register_win(&mut self, level: u32, large: bool, now: u64) {
        self.last_jackpot_ts = now;
        self.last_jackpot_level = level;
        self.consecutive_wins = (self.consecutive_wins + 1) % MAX_CONSECUTIVE_WINS;
        if large {
            self.big_win_cooldown_until =
                now.saturating_add(BIG_WIN_COOLDOWN_SECS.saturating_mul(BIG_WIN_COOLDOWN_MULT));
        }
    }

    /// Record the spend itself, win or lose.
    pub fn register_spend(&mut self, total_price: u64, now: u64) {
        self.total_spent = self.total_spent.saturating_add(total_price);
        self.last_spend_ts = now;
    }
}

impl Write for RoomOddsState {
    fn write(&self, writer: &mut impl BufMut) {
        self.last_jackpot_ts.write(writer);
        self.last_jackpot_level.write(writer);
        self.consecutive_wins.write(writer);
        self.total_spent.write(writer);
        self.last_spend_ts.write(writer);
        self.big_win_cooldown_until.write(writer);
    }
}

impl Read for RoomOddsState {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            last_jackpot_ts: u64::read(reader)?,
            last_jackpot_level: u32::read(reader)?,
            consecutive_wins: u32::read(reader)?,
            total_spent: u64::read(reader)?,
            last_spend_ts: u64::read(reader)?,
            big_win_cooldown_until: u64::read(reader)?,
        })
    }
}

impl EncodeSize for RoomOddsState {
    fn encode_size(&self) -> usize {
        self.last_jackpot_ts.encode_size()
            + self.last_jackpot_level.encode_size()
            + self.consecutive_wins.encode_size()
            + self.total_spent.encode_size()
            + self.last_spend_ts.encode_size()
            + self.big_win_cooldown_until.encode_size()
    }
}
