//! JSON bodies posted to `{base}/json/state`.
//!
//! Segment ids match slot indices: segment 0 covers the first holder's LEDs,
//! segment `n` covers holder `n`.

use raid_types::{SLOT_COUNT, Slots};
use serde_json::{Value, json};

use crate::tier::HpTier;

/// Effect id for a static colour.
pub const FX_SOLID: u8 = 0;

/// Effect id for the slow pulse shown on occupied holders.
pub const FX_BREATHE: u8 = 2;

/// Effect speed for occupied holders.
pub const FILLED_SPEED: u8 = 96;

/// Colour of empty holders.
pub const CLEARED_COLOR: [u8; 3] = [0, 0, 0];

/// Transition time for ambient changes, in tenths of a second.
pub const AMBIENT_TRANSITION: u8 = 7;

/// Topology step 1: shrink the device's default segment to the first holder.
pub fn shrink_default_segment(leds_per_slot: u16) -> Value {
    json!({
        "seg": [{ "id": 0, "start": 0, "stop": leds_per_slot }]
    })
}

/// Topology step 2: one segment for each remaining holder.
pub fn create_slot_segments(leds_per_slot: u16) -> Value {
    let width = u32::from(leds_per_slot);
    let segments: Vec<Value> = (1..SLOT_COUNT)
        .map(|id| {
            let index = u32::try_from(id).unwrap_or(u32::MAX);
            let start = index.saturating_mul(width);
            json!({ "id": id, "start": start, "stop": start.saturating_add(width) })
        })
        .collect();
    json!({ "seg": segments })
}

/// One batch covering every segment: occupied holders pulse in the tier
/// colour, empty holders go solid dark.
pub fn slot_batch(slots: &Slots, tier: HpTier) -> Value {
    let filled = tier.filled_color();
    let segments: Vec<Value> = slots
        .iter()
        .enumerate()
        .map(|(id, &occupied)| {
            if occupied {
                json!({
                    "id": id,
                    "on": true,
                    "fx": FX_BREATHE,
                    "sx": FILLED_SPEED,
                    "col": [filled],
                })
            } else {
                json!({
                    "id": id,
                    "on": true,
                    "fx": FX_SOLID,
                    "col": [CLEARED_COLOR],
                })
            }
        })
        .collect();
    json!({ "on": true, "seg": segments })
}

/// Master brightness for the current tier.
pub fn ambient(tier: HpTier) -> Value {
    json!({
        "on": true,
        "bri": tier.brightness(),
        "transition": AMBIENT_TRANSITION,
    })
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects
    )]

    use super::*;

    #[test]
    fn shrink_covers_first_unit_only() {
        let body = shrink_default_segment(12);
        assert_eq!(body["seg"][0]["id"], 0);
        assert_eq!(body["seg"][0]["start"], 0);
        assert_eq!(body["seg"][0]["stop"], 12);
    }

    #[test]
    fn creates_one_segment_per_remaining_unit() {
        let body = create_slot_segments(10);
        let segs = body["seg"].as_array().unwrap();
        assert_eq!(segs.len(), SLOT_COUNT - 1);
        assert_eq!(segs[0]["id"], 1);
        assert_eq!(segs[0]["start"], 10);
        assert_eq!(segs[0]["stop"], 20);
        assert_eq!(segs[5]["id"], 6);
        assert_eq!(segs[5]["stop"], 70);
    }

    #[test]
    fn batch_maps_occupancy_to_effects() {
        let slots = [true, false, false, true, false, false, false];
        let body = slot_batch(&slots, HpTier::Wounded);
        let segs = body["seg"].as_array().unwrap();
        assert_eq!(segs.len(), SLOT_COUNT);
        assert_eq!(segs[0]["fx"], FX_BREATHE);
        assert_eq!(segs[0]["col"][0], json!([255, 160, 0]));
        assert_eq!(segs[1]["fx"], FX_SOLID);
        assert_eq!(segs[1]["col"][0], json!([0, 0, 0]));
        assert_eq!(segs[3]["fx"], FX_BREATHE);
    }

    #[test]
    fn ambient_carries_tier_brightness() {
        let body = ambient(HpTier::Critical);
        assert_eq!(body["bri"], 220);
        assert_eq!(body["on"], true);
    }
}
