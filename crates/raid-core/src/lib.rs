//! Game-state core for the Crystal Raid coordinator.
//!
//! This crate owns every rule that turns sensor reports and operator
//! commands into boss HP. It performs no I/O: callers serialize access to a
//! single [`GameState`] and are responsible for broadcasting and lighting.
//!
//! # Modules
//!
//! - [`config`] -- [`GameConfig`] (max HP, HP per crystal).
//! - [`error`] -- [`GameError`] validation failures.
//! - [`event_log`] -- Bounded most-recent-first [`EventLog`].
//! - [`input`] -- Validation and coercion of untyped request bodies.
//! - [`reconcile`] -- Slot diffing ([`reconcile::reconcile`]).
//! - [`game`] -- [`GameState`] and the admin operations.

pub mod config;
pub mod error;
pub mod event_log;
pub mod game;
pub mod input;
pub mod reconcile;

pub use config::GameConfig;
pub use error::GameError;
pub use event_log::{EventLog, MAX_RECENT_EVENTS};
pub use game::{ADMIN_REDUCE_PERCENT, GameState, ReportOutcome};
pub use reconcile::{Reconciliation, reconcile};
