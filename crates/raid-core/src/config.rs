//! Game rule parameters fixed at process start.

use serde::Deserialize;

/// Default boss HP at full health.
pub const DEFAULT_MAX_HP: u32 = 100;

/// Default HP removed per occupied slot.
pub const DEFAULT_HP_PER_CRYSTAL: u32 = 10;

/// Rule parameters for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Boss HP at full health. Never zero.
    pub max_hp: u32,
    /// HP removed for each occupied slot while damage is enabled.
    pub hp_per_crystal: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hp: DEFAULT_MAX_HP,
            hp_per_crystal: DEFAULT_HP_PER_CRYSTAL,
        }
    }
}
