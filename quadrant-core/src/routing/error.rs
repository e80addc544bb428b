use thiserror::Error;

/// Errors from [`crate::routing::RouteProvider::directions`] and endpoint
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A `"lon,lat"` endpoint could not be parsed or is out of range.
    #[error("invalid {endpoint} coordinate {value:?}: {reason}")]
    InvalidCoordinate {
        /// Which endpoint was rejected (`"start"` or `"end"`).
        endpoint: &'static str,
        /// Text supplied by the caller.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The directions service could not be reached.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The directions service answered with a non-success status.
    #[error("directions service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was not valid JSON.
    #[error("failed to parse directions response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}
