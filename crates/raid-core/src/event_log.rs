//! Bounded, most-recent-first ring of [`EventRecord`]s.

use std::collections::VecDeque;

use raid_types::EventRecord;
use tracing::trace;

/// Maximum number of records retained.
pub const MAX_RECENT_EVENTS: usize = 20;

/// Most-recent-first event log with a fixed capacity.
///
/// Appending beyond capacity evicts the oldest record. The only other way
/// to remove records is [`clear`](Self::clear).
#[derive(Debug, Clone)]
pub struct EventLog {
    records: VecDeque<EventRecord>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log holding at most [`MAX_RECENT_EVENTS`] records.
    pub fn new() -> Self {
        Self::with_capacity(MAX_RECENT_EVENTS)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an occurrence as the newest entry.
    pub fn append(&mut self, record: EventRecord) {
        trace!(kind = record.kind(), "Event recorded");
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    /// Owned copy of the log, newest first.
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.iter().cloned().collect()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
