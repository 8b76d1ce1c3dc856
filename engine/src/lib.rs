//! Lumicast jackpot engine.
//!
//! This crate contains the jackpot resolution algorithm and the coupled
//! gift-settlement orchestration used by the gifting service: adaptive
//! probability computation, per-room odds state, tiered payout resolution,
//! and the atomic balance/ledger mutation that must agree with whatever the
//! resolver decided.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time inside the engine; callers supply `now`.
//! - All randomness flows through [`JackpotRng`] so outcomes are replayable
//!   under test.
//!
//! ## Consistency invariants
//! - Resolver invocations for one room are serialized by the
//!   [`OddsStore`] (per-room lock); two in-flight gifts to the same room can
//!   never both observe pre-update odds.
//! - Balance/ledger mutations for one gift commit through a single
//!   [`Ledger::apply`] call; a failed commit changes no balances. The room
//!   odds mutation performed by the resolver is deliberately *not* rolled
//!   back on commit failure (accepted inconsistency; odds state is advisory
//!   and in-memory, the ledger is authoritative).
//!
//! The primary entrypoint is [`Settler::resolve_and_settle`].

pub mod ledger;
pub mod odds;
pub mod resolver;
pub mod rooms;
pub mod settle;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


pub use ledger::{load_account, Ledger};
pub use odds::adjusted_chance;
pub use resolver::{resolve, JackpotRng};
pub use rooms::{MemoryOddsStore, OddsStore};
pub use settle::Settler;

#[cfg(any(test, feature = "mocks"))]
pub use ledger::Memory;
