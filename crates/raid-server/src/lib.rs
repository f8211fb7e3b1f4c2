//! Coordinator server for the Crystal Raid installation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Sensor intake** (`POST /event`) for full slot-occupancy reports
//! - **State query** (`GET /state`) returning the composite snapshot
//! - **Admin endpoints** (`/admin/*`) for HP overrides, the damage toggle,
//!   reset, and a raw lighting passthrough
//! - **`WebSocket` push channel** (`GET /ws`) delivering a `state` message
//!   on connect and after every mutation
//!
//! # Architecture
//!
//! All mutations go through [`AppState`], which holds the single
//! [`GameState`](raid_core::GameState) behind one lock. Each operation
//! validates, mutates, schedules lighting, and publishes to the
//! [`BroadcastHub`] before releasing the lock, so observers see snapshots
//! in commit order. Lighting calls run on detached tasks and never delay
//! a response.

pub mod admin;
pub mod config;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServerConfig};
pub use hub::BroadcastHub;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
