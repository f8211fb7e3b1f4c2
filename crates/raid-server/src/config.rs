//! Server configuration loaded from environment variables.
//!
//! Configuration is read once at startup and never re-read.

use raid_core::GameConfig;
use raid_core::config::{DEFAULT_HP_PER_CRYSTAL, DEFAULT_MAX_HP};
use raid_lighting::LightingConfig;
use raid_lighting::driver::{DEFAULT_LEDS_PER_SLOT, DEFAULT_REQUEST_TIMEOUT};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// Game rule parameters.
    pub game: GameConfig,
    /// Lighting device settings.
    pub lighting: LightingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            game: GameConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Optional variables:
    /// - `HOST` -- bind address (default `0.0.0.0`)
    /// - `PORT` -- listening port (default `3000`)
    /// - `BOSS_MAX_HP` -- boss HP at full health, > 0 (default `100`)
    /// - `HP_PER_CRYSTAL` -- HP removed per occupied slot (default `10`)
    /// - `WLED_URL` -- lighting device base URL; empty disables lighting
    /// - `WLED_LEDS_PER_SLOT` -- LEDs under each holder (default `10`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| String::from("0.0.0.0"));
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;
        let max_hp: u32 = parse_or(&lookup, "BOSS_MAX_HP", DEFAULT_MAX_HP)?;
        if max_hp == 0 {
            return Err(ConfigError::Invalid {
                name: "BOSS_MAX_HP",
                reason: String::from("must be greater than zero"),
            });
        }
        let hp_per_crystal: u32 = parse_or(&lookup, "HP_PER_CRYSTAL", DEFAULT_HP_PER_CRYSTAL)?;
        let leds_per_slot: u16 = parse_or(&lookup, "WLED_LEDS_PER_SLOT", DEFAULT_LEDS_PER_SLOT)?;
        let base_url = lookup("WLED_URL").unwrap_or_default();

        Ok(Self {
            host,
            port,
            game: GameConfig {
                max_hp,
                hp_per_crystal,
            },
            lighting: LightingConfig {
                base_url,
                leds_per_slot,
                request_timeout: DEFAULT_REQUEST_TIMEOUT,
            },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name,
                reason: format!("{e}"),
            })
        }
        _ => Ok(default),
    }
}
