//! Jackpot domain types.
//!
//! Defines the static tier/combo tables, the per-room odds state, the gift
//! resolution request/response pair, and the persisted ledger records shared
//! by the engine and its callers.

mod codec;
mod constants;
mod gift;
mod ledger;
mod room;
mod tier;

pub use codec::{read_string, string_encode_size, write_string};
pub use constants::*;
pub use gift::*;
pub use ledger::*;
pub use room::*;
pub use tier::*;
