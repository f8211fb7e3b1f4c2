//! Errors from talking to the lighting device.
//!
//! These never reach HTTP clients. The driver logs them and moves on.

/// Failure of a single outbound lighting request.
#[derive(Debug, thiserror::Error)]
pub enum LightingError {
    /// The HTTP client could not be constructed.
    #[error("lighting client setup failed: {0}")]
    Client(String),

    /// The request could not be sent or the device was unreachable.
    #[error("lighting request failed: {0}")]
    Request(String),

    /// The device answered with a non-success status.
    #[error("lighting device returned {0}")]
    Status(u16),

    /// The device did not answer within the request timeout.
    #[error("lighting request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LightingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e.to_string())
        }
    }
}
