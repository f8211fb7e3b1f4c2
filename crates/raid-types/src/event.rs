//! Discrete occurrence records kept in the recent-events log.
//!
//! Every record is immutable once created and carries the wall-clock time
//! at which the coordinator committed it. The JSON form is internally
//! tagged on `type` so viewers can switch on the variant name directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single entry in the recent-events log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventRecord {
    /// A crystal appeared in a previously empty slot.
    CrystalInsert {
        /// Slot index, `0..SLOT_COUNT`.
        slot: u8,
        /// HP removed by this crystal (zero while damage is disabled).
        damage: u32,
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
    /// A crystal was taken out of a previously occupied slot.
    CrystalRemove {
        /// Slot index, `0..SLOT_COUNT`.
        slot: u8,
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
    /// An operator set boss HP directly.
    AdminHp {
        /// HP after clamping.
        hp: u32,
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
    /// An operator applied percentage damage.
    AdminHpReduce {
        /// HP removed.
        damage: u32,
        /// HP after the reduction.
        hp: u32,
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
    /// An operator toggled slot-driven HP damage.
    AdminHpDamage {
        /// New value of the damage gate.
        enabled: bool,
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
    /// An operator reset game progress.
    ///
    /// Part of the wire contract only: reset clears the log and records
    /// nothing, so the coordinator never emits this variant.
    AdminReset {
        /// Commit time.
        timestamp: DateTime<Utc>,
    },
}

impl EventRecord {
    /// Wire name of the variant (the `type` tag).
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CrystalInsert { .. } => "crystal_insert",
            Self::CrystalRemove { .. } => "crystal_remove",
            Self::AdminHp { .. } => "admin_hp",
            Self::AdminHpReduce { .. } => "admin_hp_reduce",
            Self::AdminHpDamage { .. } => "admin_hp_damage",
            Self::AdminReset { .. } => "admin_reset",
        }
    }
}
