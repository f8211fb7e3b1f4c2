//! The single game state and every operation that mutates it.
//!
//! [`GameState`] is not synchronized. The server owns exactly one instance
//! behind a single lock, so each operation here runs to completion before
//! the next one starts.
//!
//! Derived fields follow two rules:
//!
//! - `crystal_count` is always the number of occupied slots.
//! - `game_over` is recomputed from `boss_hp == 0` after every mutation;
//!   there is no separate latch.
//!
//! While damage is enabled a slot report sets boss HP to
//! `max_hp - crystal_count * hp_per_crystal`, floored at zero. Admin HP
//! changes override that value until the next report recomputes it.

use chrono::Utc;
use raid_types::{EventRecord, GameSnapshot, SLOT_COUNT, Slots};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::event_log::EventLog;
use crate::reconcile::{occupied, reconcile};

/// Percentage of max HP removed by `POST /admin/hp/reduce`.
pub const ADMIN_REDUCE_PERCENT: u32 = 5;

/// What a slot report changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Indices that became occupied.
    pub inserted: Vec<usize>,
    /// Indices that became empty.
    pub removed: Vec<usize>,
}

/// Process-wide game state.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    boss_hp: u32,
    slots: Slots,
    crystal_count: u32,
    total_crystals_received: u64,
    hp_damage_enabled: bool,
    game_over: bool,
    events: EventLog,
}

impl GameState {
    /// Create a fresh game: all slots empty, full HP, damage enabled.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            boss_hp: config.max_hp,
            slots: [false; SLOT_COUNT],
            crystal_count: 0,
            total_crystals_received: 0,
            hp_damage_enabled: true,
            game_over: config.max_hp == 0,
            events: EventLog::new(),
        }
    }

    /// Full composite snapshot of the current state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            boss_hp: self.boss_hp,
            max_hp: self.config.max_hp,
            slots: self.slots,
            crystal_count: self.crystal_count,
            total_crystals_received: self.total_crystals_received,
            hp_damage_enabled: self.hp_damage_enabled,
            game_over: self.game_over,
            recent_events: self.events.snapshot(),
        }
    }

    /// Current boss HP.
    pub const fn boss_hp(&self) -> u32 {
        self.boss_hp
    }

    /// Boss HP at full health.
    pub const fn max_hp(&self) -> u32 {
        self.config.max_hp
    }

    /// Current slot occupancy.
    pub const fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Number of occupied slots.
    pub const fn crystal_count(&self) -> u32 {
        self.crystal_count
    }

    /// Insert transitions since start or the last reset.
    pub const fn total_crystals_received(&self) -> u64 {
        self.total_crystals_received
    }

    /// Whether slot occupancy currently drives boss HP.
    pub const fn hp_damage_enabled(&self) -> bool {
        self.hp_damage_enabled
    }

    /// Whether the boss is at zero HP.
    pub const fn game_over(&self) -> bool {
        self.game_over
    }

    /// Apply a full slot report from the sensors.
    ///
    /// Every transition is logged in slot order. Reports are accepted after
    /// game over; HP simply stays at its floor.
    pub fn apply_report(&mut self, reported: Slots) -> ReportOutcome {
        let result = reconcile(&self.slots, &reported);
        let now = Utc::now();
        let damage = if self.hp_damage_enabled {
            self.config.hp_per_crystal
        } else {
            0
        };

        for index in 0..SLOT_COUNT {
            let slot = u8::try_from(index).unwrap_or(u8::MAX);
            if result.inserted.contains(&index) {
                self.events.append(EventRecord::CrystalInsert {
                    slot,
                    damage,
                    timestamp: now,
                });
            } else if result.removed.contains(&index) {
                self.events.append(EventRecord::CrystalRemove {
                    slot,
                    timestamp: now,
                });
            }
        }

        self.slots = result.slots;
        self.crystal_count = occupied(&self.slots);
        let inserted = u64::try_from(result.inserted.len()).unwrap_or(u64::MAX);
        self.total_crystals_received = self.total_crystals_received.saturating_add(inserted);

        if self.hp_damage_enabled {
            self.recompute_hp_from_slots();
        }

        debug!(
            unchanged = result.is_unchanged(),
            inserted = result.inserted.len(),
            removed = result.removed.len(),
            crystal_count = self.crystal_count,
            boss_hp = self.boss_hp,
            "Slot report reconciled"
        );

        ReportOutcome {
            inserted: result.inserted,
            removed: result.removed,
        }
    }

    /// Set boss HP directly.
    ///
    /// The value is floored to an integer and clamped to `0..=max_hp`.
    /// Returns the HP that was applied.
    pub fn set_hp(&mut self, value: f64) -> Result<u32, GameError> {
        if value.is_nan() || value < 0.0 {
            return Err(GameError::InvalidHp);
        }

        let clamped = value.floor().min(f64::from(self.config.max_hp));
        // Clamped to 0..=max_hp above, so the cast is exact.
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let hp = clamped as u32;

        self.boss_hp = hp;
        self.refresh_game_over();
        self.events.append(EventRecord::AdminHp {
            hp,
            timestamp: Utc::now(),
        });
        info!(hp, game_over = self.game_over, "Boss HP set by operator");
        Ok(hp)
    }

    /// Remove `percent` of max HP (rounded up) from the current HP.
    ///
    /// The amount does not depend on current HP. Returns the damage dealt.
    pub fn reduce_hp_by_percent(&mut self, percent: u32) -> Result<u32, GameError> {
        if percent == 0 || percent > 100 {
            return Err(GameError::InvalidPercent(percent));
        }

        let damage = self.config.max_hp.saturating_mul(percent).div_ceil(100);
        self.boss_hp = self.boss_hp.saturating_sub(damage);
        self.refresh_game_over();
        self.events.append(EventRecord::AdminHpReduce {
            damage,
            hp: self.boss_hp,
            timestamp: Utc::now(),
        });
        info!(damage, hp = self.boss_hp, "Boss HP reduced by operator");
        Ok(damage)
    }

    /// Enable or disable slot-driven damage.
    ///
    /// Switching from disabled to enabled recomputes HP from the current
    /// occupancy immediately. Disabling freezes HP at its current value.
    /// Re-sending the current value leaves HP alone.
    pub fn set_damage_enabled(&mut self, enabled: bool) {
        let was_enabled = self.hp_damage_enabled;
        self.hp_damage_enabled = enabled;
        if enabled && !was_enabled {
            self.recompute_hp_from_slots();
        }
        self.events.append(EventRecord::AdminHpDamage {
            enabled,
            timestamp: Utc::now(),
        });
        info!(enabled, hp = self.boss_hp, "HP damage toggled");
    }

    /// Restore the start-of-process configuration and clear the event log.
    pub fn reset(&mut self) {
        self.boss_hp = self.config.max_hp;
        self.slots = [false; SLOT_COUNT];
        self.crystal_count = 0;
        self.total_crystals_received = 0;
        self.hp_damage_enabled = true;
        self.refresh_game_over();
        self.events.clear();
        info!(max_hp = self.config.max_hp, "Game reset");
    }

    fn recompute_hp_from_slots(&mut self) {
        let damage = self
            .crystal_count
            .saturating_mul(self.config.hp_per_crystal);
        self.boss_hp = self.config.max_hp.saturating_sub(damage);
        self.refresh_game_over();
    }

    const fn refresh_game_over(&mut self) {
        self.game_over = self.boss_hp == 0;
    }
}
