//! Fan-out of state snapshots to connected observers.
//!
//! Built on [`tokio::sync::broadcast`]. Snapshots are complete, so an
//! observer that lags and skips messages still converges on the latest
//! state.

use raid_types::GameSnapshot;
use tokio::sync::broadcast;

/// Capacity of the snapshot channel.
///
/// A subscriber that falls behind by more than this many snapshots
/// receives [`broadcast::error::RecvError::Lagged`] and skips ahead.
pub const HUB_CAPACITY: usize = 64;

/// Broadcast sender shared by the mutation pipeline.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    tx: broadcast::Sender<GameSnapshot>,
}

impl BroadcastHub {
    /// Create a hub with no observers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(HUB_CAPACITY);
        Self { tx }
    }

    /// Register a new observer.
    pub fn subscribe(&self) -> broadcast::Receiver<GameSnapshot> {
        self.tx.subscribe()
    }

    /// Send a snapshot to every observer.
    ///
    /// Returns how many observers were reached; zero is not an error.
    pub fn publish(&self, snapshot: GameSnapshot) -> usize {
        self.tx.send(snapshot).unwrap_or(0)
    }

    /// Number of connected observers.
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
