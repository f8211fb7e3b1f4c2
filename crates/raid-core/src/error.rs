//! Validation failures raised by the game core.
//!
//! Every variant is a rejection of caller input. When an operation returns
//! one of these the [`GameState`](crate::GameState) has not been touched.

/// Errors returned by game operations and input validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The report's `type` tag is missing or not `"crystal"`.
    #[error("unsupported report type: {0}")]
    InvalidReportType(String),

    /// The `slots` field is missing or not an array.
    #[error("slots must be an array")]
    SlotsNotArray,

    /// The `slots` array has the wrong number of entries.
    #[error("slots must have exactly {expected} entries, got {actual}")]
    InvalidSlotCount {
        /// Required length.
        expected: usize,
        /// Length that was received.
        actual: usize,
    },

    /// An HP value is missing, non-numeric, or negative.
    #[error("hp must be a non-negative number")]
    InvalidHp,

    /// A percentage is outside `1..=100`.
    #[error("percent must be between 1 and 100, got {0}")]
    InvalidPercent(u32),

    /// A flag is missing or not a boolean.
    #[error("enabled must be a boolean")]
    InvalidFlag,
}
