//! Validation and coercion of untyped request bodies.
//!
//! Reporters and the admin panel send loosely typed JSON. These helpers turn
//! a body into typed values or a [`GameError`], never guessing: a slot array
//! of the wrong length is rejected rather than padded or truncated.

use raid_types::{SLOT_COUNT, Slots};
use serde_json::Value;

use crate::error::GameError;

/// The only report type the coordinator accepts.
pub const CRYSTAL_REPORT_TYPE: &str = "crystal";

/// Parse a `{ "type": "crystal", "slots": [...] }` report body.
///
/// Each slot entry is coerced to a boolean by truthiness: `false`, `null`,
/// `0`, and `""` are empty; everything else is occupied.
pub fn parse_crystal_report(body: &Value) -> Result<Slots, GameError> {
    let kind = body.get("type").and_then(Value::as_str).unwrap_or_default();
    if kind != CRYSTAL_REPORT_TYPE {
        return Err(GameError::InvalidReportType(kind.to_owned()));
    }

    let entries = body
        .get("slots")
        .and_then(Value::as_array)
        .ok_or(GameError::SlotsNotArray)?;

    if entries.len() != SLOT_COUNT {
        return Err(GameError::InvalidSlotCount {
            expected: SLOT_COUNT,
            actual: entries.len(),
        });
    }

    let mut slots = [false; SLOT_COUNT];
    for (slot, entry) in slots.iter_mut().zip(entries) {
        *slot = truthy(entry);
    }
    Ok(slots)
}

/// Extract a non-negative numeric `hp` field.
pub fn parse_hp(body: &Value) -> Result<f64, GameError> {
    let hp = body
        .get("hp")
        .and_then(Value::as_f64)
        .ok_or(GameError::InvalidHp)?;
    if hp.is_nan() || hp < 0.0 {
        return Err(GameError::InvalidHp);
    }
    Ok(hp)
}

/// Extract a strictly boolean `enabled` field.
pub fn parse_enabled(body: &Value) -> Result<bool, GameError> {
    body.get("enabled")
        .and_then(Value::as_bool)
        .ok_or(GameError::InvalidFlag)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn parses_boolean_report() {
        let body = json!({
            "type": "crystal",
            "slots": [true, false, true, false, false, false, false],
        });
        let slots = parse_crystal_report(&body).unwrap();
        assert_eq!(slots, [true, false, true, false, false, false, false]);
    }

    #[test]
    fn coerces_truthy_values() {
        let body = json!({
            "type": "crystal",
            "slots": [1, 0, "x", "", null, {}, 0.5],
        });
        let slots = parse_crystal_report(&body).unwrap();
        assert_eq!(slots, [true, false, true, false, false, true, true]);
    }

    #[test]
    fn rejects_wrong_type_tag() {
        let body = json!({ "type": "button", "slots": [false, false, false, false, false, false, false] });
        assert_eq!(
            parse_crystal_report(&body),
            Err(GameError::InvalidReportType(String::from("button")))
        );
        let untagged = json!({ "slots": [false, false, false, false, false, false, false] });
        assert!(matches!(
            parse_crystal_report(&untagged),
            Err(GameError::InvalidReportType(_))
        ));
    }

    #[test]
    fn rejects_wrong_length_and_non_array() {
        let short = json!({ "type": "crystal", "slots": [true, true, true, true, true] });
        assert_eq!(
            parse_crystal_report(&short),
            Err(GameError::InvalidSlotCount {
                expected: 7,
                actual: 5
            })
        );
        let long = json!({ "type": "crystal", "slots": [false, false, false, false, false, false, false, false] });
        assert!(matches!(
            parse_crystal_report(&long),
            Err(GameError::InvalidSlotCount { actual: 8, .. })
        ));
        let scalar = json!({ "type": "crystal", "slots": "1111111" });
        assert_eq!(parse_crystal_report(&scalar), Err(GameError::SlotsNotArray));
    }

    #[test]
    fn hp_must_be_non_negative_number() {
        assert!((parse_hp(&json!({ "hp": 42.7 })).unwrap() - 42.7).abs() < f64::EPSILON);
        assert_eq!(parse_hp(&json!({ "hp": -1 })), Err(GameError::InvalidHp));
        assert_eq!(parse_hp(&json!({ "hp": "50" })), Err(GameError::InvalidHp));
        assert_eq!(parse_hp(&json!({})), Err(GameError::InvalidHp));
    }

    #[test]
    fn enabled_must_be_boolean() {
        assert_eq!(parse_enabled(&json!({ "enabled": false })), Ok(false));
        assert_eq!(
            parse_enabled(&json!({ "enabled": "true" })),
            Err(GameError::InvalidFlag)
        );
        assert_eq!(parse_enabled(&json!({ "enabled": 1 })), Err(GameError::InvalidFlag));
    }
}
