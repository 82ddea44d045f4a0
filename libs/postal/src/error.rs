//! Lookup failures.

use thiserror::Error;

/// Transport or service errors from a postal lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request could not be sent, timed out, or the body was unreadable.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("lookup service returned HTTP {0}")]
    Status(u16),

    /// The service answered with a body we could not interpret.
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

impl LookupError {
    /// Returns true if the request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Network(e) if e.is_timeout())
    }
}
