//! Composite game-state snapshot.
//!
//! A [`GameSnapshot`] is a complete, self-contained copy of the game state
//! at one instant. Observers never receive deltas, so any single snapshot is
//! enough to render the current state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::event::EventRecord;

/// Number of physical crystal holders.
pub const SLOT_COUNT: usize = 7;

/// Occupancy of every holder, indexed by slot number.
pub type Slots = [bool; SLOT_COUNT];

/// Full composite state pushed to observers and served by `GET /state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameSnapshot {
    /// Current boss HP, `0..=max_hp`.
    pub boss_hp: u32,
    /// Boss HP at full health.
    pub max_hp: u32,
    /// Occupancy per slot.
    pub slots: Slots,
    /// Number of occupied slots.
    pub crystal_count: u32,
    /// Insert transitions since start or the last reset.
    pub total_crystals_received: u64,
    /// Whether slot occupancy drives boss HP.
    pub hp_damage_enabled: bool,
    /// True exactly when `boss_hp == 0`.
    pub game_over: bool,
    /// Most recent events first.
    pub recent_events: Vec<EventRecord>,
}
