//! Slot diffing.
//!
//! A sensor report is the full occupancy vector, not a delta. Reconciling it
//! against the previous vector yields the discrete insert and remove
//! transitions; the reported vector always replaces the previous one, so a
//! repeated report is accepted and simply produces no transitions.

use raid_types::Slots;

/// Result of comparing a reported slot vector with the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The new occupancy vector (always the reported one).
    pub slots: Slots,
    /// Indices that went from empty to occupied, ascending.
    pub inserted: Vec<usize>,
    /// Indices that went from occupied to empty, ascending.
    pub removed: Vec<usize>,
}

impl Reconciliation {
    /// Whether the report changed any slot.
    pub fn is_unchanged(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

/// Compare `reported` against `previous` slot by slot.
pub fn reconcile(previous: &Slots, reported: &Slots) -> Reconciliation {
    let mut inserted = Vec::new();
    let mut removed = Vec::new();

    for (index, (&was, &now)) in previous.iter().zip(reported.iter()).enumerate() {
        match (was, now) {
            (false, true) => inserted.push(index),
            (true, false) => removed.push(index),
            _ => {}
        }
    }

    Reconciliation {
        slots: *reported,
        inserted,
        removed,
    }
}

/// Number of occupied slots.
pub fn occupied(slots: &Slots) -> u32 {
    // SLOT_COUNT is 7, so the count always fits.
    u32::try_from(slots.iter().filter(|&&s| s).count()).unwrap_or(u32::MAX)
}
