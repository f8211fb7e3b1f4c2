//! Fire-and-forget lighting driver with a one-time topology latch.
//!
//! The device starts with a single segment spanning the whole strip. The
//! first slot update splits it in two ordered steps: shrink the default
//! segment to the first holder, then create the remaining holder segments.
//! The device cannot do both in one request, so step 2 is only sent once
//! step 1 has completed, whether or not it succeeded.
//!
//! The latch lives for the whole process. Game resets never re-run setup.
//!
//! Slot batches are numbered when they are requested, which is commit
//! order. Batches are sent one at a time and a batch older than the last
//! one sent is dropped, so the device never regresses to a stale state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use raid_types::Slots;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command;
use crate::error::LightingError;
use crate::tier::HpTier;

/// Outbound requests are abandoned after this long.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of LEDs under each holder.
pub const DEFAULT_LEDS_PER_SLOT: u16 = 10;

/// Path of the device's state endpoint.
const STATE_PATH: &str = "/json/state";

/// Connection settings for the lighting device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingConfig {
    /// Device base URL, e.g. `http://192.168.1.50`. Empty disables lighting.
    pub base_url: String,
    /// LEDs per physical holder.
    pub leds_per_slot: u16,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            leds_per_slot: DEFAULT_LEDS_PER_SLOT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Segment setup state of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingPhase {
    /// No device configured; every operation is a no-op.
    Disabled,
    /// Segments have not been created yet.
    Uninitialized,
    /// Segments exist; updates go straight to per-segment commands.
    Ready,
}

/// Handle to the lighting device. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LightingDriver {
    device: Option<Arc<Device>>,
}

#[derive(Debug)]
struct Device {
    client: reqwest::Client,
    state_url: String,
    leds_per_slot: u16,
    topology: OnceCell<()>,
    /// Number handed to the most recently requested slot batch.
    batch_seq: AtomicU64,
    /// Number of the last slot batch sent. Held while sending.
    last_batch: Mutex<u64>,
}

impl LightingDriver {
    /// Build a driver from configuration.
    ///
    /// An empty `base_url` yields a disabled driver.
    pub fn new(config: &LightingConfig) -> Result<Self, LightingError> {
        let base = config.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Ok(Self::disabled());
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LightingError::Client(e.to_string()))?;

        Ok(Self {
            device: Some(Arc::new(Device {
                client,
                state_url: format!("{base}{STATE_PATH}"),
                leds_per_slot: config.leds_per_slot,
                topology: OnceCell::new(),
                batch_seq: AtomicU64::new(0),
                last_batch: Mutex::new(0),
            })),
        })
    }

    /// A driver that never contacts anything.
    pub const fn disabled() -> Self {
        Self { device: None }
    }

    /// Current setup state.
    pub fn phase(&self) -> LightingPhase {
        match &self.device {
            None => LightingPhase::Disabled,
            Some(device) if device.topology.initialized() => LightingPhase::Ready,
            Some(_) => LightingPhase::Uninitialized,
        }
    }

    /// Push slot occupancy as one command batch covering every segment.
    ///
    /// Runs segment setup first if it has not happened yet. Batches reach
    /// the device in the order this method was called; a batch overtaken
    /// by a newer one is skipped. Returns the background task, or `None`
    /// when lighting is disabled. Callers are free to drop the handle.
    pub fn update_slots(&self, slots: Slots, tier: HpTier) -> Option<JoinHandle<()>> {
        let device = Arc::clone(self.device.as_ref()?);
        let seq = device
            .batch_seq
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        Some(tokio::spawn(async move {
            device.ensure_topology().await;
            let mut last = device.last_batch.lock().await;
            if seq < *last {
                debug!(seq, latest = *last, "Skipping stale slot batch");
                return;
            }
            device
                .send("slot batch", &command::slot_batch(&slots, tier))
                .await;
            *last = seq;
        }))
    }

    /// Push the ambient brightness for the current HP tier.
    pub fn update_ambient(&self, tier: HpTier) -> Option<JoinHandle<()>> {
        let device = Arc::clone(self.device.as_ref()?);
        Some(tokio::spawn(async move {
            device.send("ambient", &command::ambient(tier)).await;
        }))
    }

    /// Forward an arbitrary body to the device unchanged.
    ///
    /// Bypasses segment setup; this is the manual override.
    pub fn passthrough(&self, body: Value) -> Option<JoinHandle<()>> {
        let device = Arc::clone(self.device.as_ref()?);
        Some(tokio::spawn(async move {
            device.send("passthrough", &body).await;
        }))
    }
}

impl Device {
    async fn ensure_topology(&self) {
        self.topology
            .get_or_init(|| async {
                self.send(
                    "shrink default segment",
                    &command::shrink_default_segment(self.leds_per_slot),
                )
                .await;
                self.send(
                    "create slot segments",
                    &command::create_slot_segments(self.leds_per_slot),
                )
                .await;
                info!(url = %self.state_url, "Lighting segments initialized");
            })
            .await;
    }

    /// Post one body and log the outcome.
    async fn send(&self, label: &str, body: &Value) {
        match self.post(body).await {
            Ok(()) => debug!(command = label, "Lighting command sent"),
            Err(e) => warn!(command = label, error = %e, "Lighting command failed"),
        }
    }

    async fn post(&self, body: &Value) -> Result<(), LightingError> {
        let response = self.client.post(&self.state_url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LightingError::Status(status.as_u16()));
        }
        Ok(())
    }
}
