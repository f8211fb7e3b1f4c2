//! Lighting driver for the Crystal Raid coordinator.
//!
//! Drives a segmented LED controller that speaks the WLED JSON API
//! (`POST {base}/json/state`). One physical unit of LEDs sits under each
//! crystal holder; the driver splits the strip into one segment per holder
//! the first time slot state is pushed, then maps occupancy to per-segment
//! effects.
//!
//! Every outbound call is fire-and-forget: it runs on a spawned task, is
//! abandoned after the configured timeout, and failures are only logged.
//!
//! # Modules
//!
//! - [`command`] -- JSON bodies for topology setup and per-update commands.
//! - [`driver`] -- [`LightingDriver`] and its initialization latch.
//! - [`error`] -- [`LightingError`].
//! - [`tier`] -- [`HpTier`] bands used for colour and brightness.

pub mod command;
pub mod driver;
pub mod error;
pub mod tier;

pub use driver::{LightingConfig, LightingDriver, LightingPhase};
pub use error::LightingError;
pub use tier::HpTier;
