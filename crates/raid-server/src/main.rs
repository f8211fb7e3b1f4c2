//! Coordinator binary for the Crystal Raid installation.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Build the lighting driver (disabled when `WLED_URL` is empty)
//! 4. Create the game state and broadcast hub
//! 5. Serve HTTP and `WebSocket` until `Ctrl-C`

use std::sync::Arc;

use raid_lighting::{LightingDriver, LightingPhase};
use raid_server::{AppState, ServerConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("raid-server starting");

    // 2. Load configuration.
    let config = ServerConfig::from_env()?;
    info!(
        port = config.port,
        max_hp = config.game.max_hp,
        hp_per_crystal = config.game.hp_per_crystal,
        lighting_url = %config.lighting.base_url,
        "Configuration loaded"
    );

    // 3. Lighting driver.
    let lighting = LightingDriver::new(&config.lighting)?;
    if lighting.phase() == LightingPhase::Disabled {
        info!("Lighting disabled (WLED_URL not set)");
    }

    // 4. Game state.
    let state = Arc::new(AppState::new(config.game, lighting));

    // 5. Serve.
    start_server(&config, state).await?;
    Ok(())
}
