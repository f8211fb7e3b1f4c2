//! Shared type definitions for the Crystal Raid coordinator.
//!
//! This crate is the single source of truth for the data that crosses a
//! boundary: the composite [`GameSnapshot`] pushed to observers and served
//! by `GET /state`, and the [`EventRecord`] entries carried inside it.
//! Types flow downstream to `TypeScript` via `ts-rs` for the projector
//! display and admin panel.
//!
//! # Modules
//!
//! - [`event`] -- Tagged [`EventRecord`] variants for the recent-events log
//! - [`snapshot`] -- [`GameSnapshot`] and the [`Slots`] occupancy vector

pub mod event;
pub mod snapshot;

pub use event::EventRecord;
pub use snapshot::{GameSnapshot, SLOT_COUNT, Slots};
