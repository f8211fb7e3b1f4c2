//! Shared application state and the single-writer mutation pipeline.
//!
//! [`AppState`] owns the only [`GameState`]. Every mutating method takes
//! the game lock, applies the change, schedules lighting, and publishes the
//! resulting snapshot before the lock is released. Holding the lock across
//! the publish keeps snapshot order identical to commit order, and lets a
//! joining observer take its first snapshot and subscribe atomically.

use raid_core::{ADMIN_REDUCE_PERCENT, GameConfig, GameError, GameState};
use raid_lighting::{HpTier, LightingDriver};
use raid_types::{GameSnapshot, Slots};
use serde_json::Value;
use tokio::sync::{Mutex, broadcast};
use tracing::debug;

use crate::hub::BroadcastHub;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    game: Mutex<GameState>,
    hub: BroadcastHub,
    lighting: LightingDriver,
}

impl AppState {
    /// Create the application state with a fresh game.
    pub fn new(config: GameConfig, lighting: LightingDriver) -> Self {
        Self {
            game: Mutex::new(GameState::new(config)),
            hub: BroadcastHub::new(),
            lighting,
        }
    }

    /// Current composite snapshot. No side effects.
    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.lock().await.snapshot()
    }

    /// Register an observer.
    ///
    /// Returns the snapshot as of the latest committed mutation together
    /// with a receiver for every later one.
    pub async fn subscribe(&self) -> (GameSnapshot, broadcast::Receiver<GameSnapshot>) {
        let game = self.game.lock().await;
        let rx = self.hub.subscribe();
        (game.snapshot(), rx)
    }

    /// The broadcast hub (read-only access for observers and tests).
    pub const fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    /// The lighting driver.
    pub const fn lighting(&self) -> &LightingDriver {
        &self.lighting
    }

    /// Reconcile a validated sensor report.
    pub async fn apply_report(&self, slots: Slots) -> GameSnapshot {
        let mut game = self.game.lock().await;
        game.apply_report(slots);
        let tier = tier_of(&game);
        let _ = self.lighting.update_slots(*game.slots(), tier);
        let _ = self.lighting.update_ambient(tier);
        self.commit(&game)
    }

    /// Set boss HP directly.
    pub async fn set_hp(&self, value: f64) -> Result<GameSnapshot, GameError> {
        let mut game = self.game.lock().await;
        let before = tier_of(&game);
        game.set_hp(value)?;
        self.relight_after_admin(&game, before);
        Ok(self.commit(&game))
    }

    /// Apply the fixed admin percentage damage. Returns the damage dealt.
    pub async fn reduce_hp(&self) -> Result<(u32, GameSnapshot), GameError> {
        let mut game = self.game.lock().await;
        let before = tier_of(&game);
        let damage = game.reduce_hp_by_percent(ADMIN_REDUCE_PERCENT)?;
        self.relight_after_admin(&game, before);
        Ok((damage, self.commit(&game)))
    }

    /// Enable or disable slot-driven damage.
    pub async fn set_damage_enabled(&self, enabled: bool) -> GameSnapshot {
        let mut game = self.game.lock().await;
        let before = tier_of(&game);
        game.set_damage_enabled(enabled);
        self.relight_after_admin(&game, before);
        self.commit(&game)
    }

    /// Reset game progress and clear the lighting to all-empty.
    ///
    /// The lighting driver's segment latch is left alone.
    pub async fn reset(&self) -> GameSnapshot {
        let mut game = self.game.lock().await;
        game.reset();
        let tier = tier_of(&game);
        let _ = self.lighting.update_slots(*game.slots(), tier);
        let _ = self.lighting.update_ambient(tier);
        self.commit(&game)
    }

    /// Forward a raw body to the lighting device.
    ///
    /// Returns whether a device is configured to receive it.
    pub fn lighting_passthrough(&self, body: Value) -> bool {
        self.lighting.passthrough(body).is_some()
    }

    /// Ambient always; the segment batch too when the HP tier moved, so
    /// occupied holders pick up the new tier colour.
    fn relight_after_admin(&self, game: &GameState, before: HpTier) {
        let tier = tier_of(game);
        if tier != before {
            let _ = self.lighting.update_slots(*game.slots(), tier);
        }
        let _ = self.lighting.update_ambient(tier);
    }

    fn commit(&self, game: &GameState) -> GameSnapshot {
        let snapshot = game.snapshot();
        let observers = self.hub.publish(snapshot.clone());
        debug!(observers, boss_hp = snapshot.boss_hp, "State broadcast");
        snapshot
    }
}

fn tier_of(game: &GameState) -> HpTier {
    HpTier::from_hp(game.boss_hp(), game.max_hp())
}
