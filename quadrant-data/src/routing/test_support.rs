//! Test utilities for directions providers.
//!
//! [`StubRouteProvider`] returns a pre-configured response without making
//! HTTP requests, and records the endpoints it was asked for.

use std::sync::Mutex;

use quadrant_core::{RouteEndpoints, RouteError, RouteProvider};
use serde_json::Value;

/// Stub `RouteProvider` for testing.
///
/// # Example
///
/// ```
/// use quadrant_core::{RouteEndpoints, RouteProvider};
/// use quadrant_data::routing::test_support::StubRouteProvider;
/// use serde_json::json;
///
/// let provider = StubRouteProvider::with_body(json!({"routes": []}));
/// let endpoints = RouteEndpoints::parse("0,0", "1,1")?;
///
/// assert_eq!(provider.directions(&endpoints)?, json!({"routes": []}));
/// assert_eq!(provider.requests(), vec![endpoints]);
/// # Ok::<(), quadrant_core::RouteError>(())
/// ```
#[derive(Debug)]
pub struct StubRouteProvider {
    response: Result<Value, RouteError>,
    requests: Mutex<Vec<RouteEndpoints>>,
}

impl StubRouteProvider {
    /// Create a provider that answers every request with `body`.
    #[must_use]
    pub const fn with_body(body: Value) -> Self {
        Self {
            response: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that fails every request with `error`.
    #[must_use]
    pub const fn with_error(error: RouteError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RouteEndpoints> {
        self.requests
            .lock()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |guard| guard.clone())
    }
}

impl RouteProvider for StubRouteProvider {
    fn directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError> {
        match self.requests.lock() {
            Ok(mut guard) => guard.push(*endpoints),
            Err(poisoned) => poisoned.into_inner().push(*endpoints),
        }
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn with_body_returns_configured_body() {
        let provider = StubRouteProvider::with_body(json!({"distance": 120.5}));
        let endpoints = RouteEndpoints::parse("0,0", "1,1").expect("valid endpoints");

        let body = provider.directions(&endpoints).expect("should succeed");

        assert_eq!(body, json!({"distance": 120.5}));
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let provider = StubRouteProvider::with_error(RouteError::Network {
            url: "http://example.com/v2/directions/foot-walking".to_owned(),
            message: "connection refused".to_owned(),
        });
        let endpoints = RouteEndpoints::parse("0,0", "1,1").expect("valid endpoints");

        let err = provider.directions(&endpoints).expect_err("should fail");

        assert!(matches!(err, RouteError::Network { .. }));
    }

    #[rstest]
    fn requests_are_recorded_in_order() {
        let provider = StubRouteProvider::with_body(Value::Null);
        let first = RouteEndpoints::parse("0,0", "1,1").expect("valid endpoints");
        let second = RouteEndpoints::parse("2,2", "3,3").expect("valid endpoints");

        provider.directions(&first).expect("should succeed");
        provider.directions(&second).expect("should succeed");

        assert_eq!(provider.requests(), vec![first, second]);
    }
}
