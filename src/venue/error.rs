//! Venue call failure classification.
//!
//! Every failure of an outbound venue call lands in exactly one of these
//! kinds, so handlers can map them to distinct HTTP statuses instead of
//! funneling everything through one catch-all.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VenueError {
    /// The venue could not be reached at all (connect, TLS, timeout).
    #[error("venue unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The venue answered with an error status.
    #[error("venue rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The venue answered success but the payload did not decode into
    /// the expected shape.
    #[error("malformed venue response: {0}")]
    Malformed(String),

    /// Building the request signature failed.
    #[error("request signing failed: {0}")]
    Signing(String),
}

impl VenueError {
    /// Whether the venue itself refused the request with a client error,
    /// i.e. the caller's parameters were the problem.
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, VenueError::Rejected { status, .. } if (400..500).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejection_classification() {
        let rejected = VenueError::Rejected {
            status: 400,
            message: "Invalid symbol".to_string(),
        };
        assert!(rejected.is_client_rejection());

        let unavailable = VenueError::Rejected {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert!(!unavailable.is_client_rejection());

        assert!(!VenueError::Malformed("bad".to_string()).is_client_rejection());
    }
}
