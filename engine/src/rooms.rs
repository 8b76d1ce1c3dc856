//! Per-room odds state store.
//!
//! Gift events in the same room must observe each other's effect on the
//! odds, so every resolution for a room runs under that room's lock.
//! Different rooms never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lumicast_types::jackpot::RoomOddsState;

/// Storage for mutable room odds state.
///
/// `with_room` runs the closure with exclusive access to the room's state,
/// creating a fresh default state on first touch. Holding the lock for the
/// whole resolution gives read-modify-write atomicity without a retry loop.
pub trait OddsStore {
    /// Run `f` with exclusive access to `room`'s odds state.
    fn with_room<T>(&self, room: &str, f: impl FnOnce(&mut RoomOddsState) -> T) -> T;

    /// Drop a room's state, returning it to defaults on next touch.
    fn reset(&self, room: &str);
}

/// In-process odds store backed by a map of per-room mutexes.
#[derive(Clone, Default)]
pub struct MemoryOddsStore {
    rooms: Arc<Mutex<HashMap<String, Arc<Mutex<RoomOddsState>>>>>,
}

impl MemoryOddsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a room's current state, if it has one.
    pub fn snapshot(&self, room: &str) -> Option<RoomOddsState> {
        let rooms = self.rooms.lock().unwrap();
        rooms.get(room).map(|state| state.lock().unwrap().clone())
    }

    fn entry(&self, room: &str) -> Arc<Mutex<RoomOddsState>> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(room.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(RoomOddsState::default())))
            .clone()
    }
}

impl OddsStore for MemoryOddsStore {
    fn with_room<T>(&self, room: &str, f: impl FnOnce(&mut RoomOddsState) -> T) -> T {
        // The outer map lock is released before the closure runs, so slow
        // resolutions in one room never block other rooms.
        let state = self.entry(room);
        let mut state = state.lock().unwrap();
        f(&mut state)
    }

    fn reset(&self, room: &str) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms.remove(room);
    }
}
