//! HTTP-based `RouteProvider` using the openrouteservice directions API.
//!
//! The [`RouteProvider`] trait is synchronous so the core stays embeddable in
//! synchronous callers. This provider bridges the async HTTP call to the sync
//! interface by blocking on a Tokio runtime it owns.

use std::fmt;
use std::time::Duration;

use log::debug;
use quadrant_core::{RouteEndpoints, RouteError, RouteProvider};
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL is not a valid absolute URL.
    InvalidBaseUrl {
        /// Rejected base URL.
        base_url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { base_url, source } => {
                write!(f, "invalid routing base URL {base_url:?}: {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default directions service.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "foot-walking";

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "quadrant-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the directions service.
    pub base_url: String,
    /// Key sent verbatim in the `Authorization` header, when set.
    pub api_key: Option<String>,
    /// Routing profile path segment, e.g. `"foot-walking"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Directions provider backed by an HTTP service.
///
/// The provider owns a Tokio runtime reused across calls. When called from
/// inside a multi-threaded Tokio runtime it borrows that runtime through
/// [`tokio::task::block_in_place`]; from a `current_thread` runtime or from
/// plain synchronous code it blocks on its own runtime.
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl fmt::Debug for HttpRouteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRouteProvider {
    /// Create a provider for `base_url` with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = directions_url(&config.base_url, &config.profile).map_err(|source| {
            ProviderBuildError::InvalidBaseUrl {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// The configuration this provider was built from.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Request URL for `endpoints`, with `start` and `end` as `lon,lat`.
    fn request_url(&self, endpoints: &RouteEndpoints) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("start", &endpoints.start_param())
            .append_pair("end", &endpoints.end_param());
        url
    }

    async fn fetch_directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError> {
        let url = self.request_url(endpoints);
        debug!("requesting directions from {}", self.endpoint);

        let mut request = self.client.get(url.clone());
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, key);
        }
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        response.json().await.map_err(|err| RouteError::Parse {
            message: err.to_string(),
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> RouteError {
        let url = redact_query(url);
        if error.is_timeout() {
            return RouteError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return RouteError::Http {
                url,
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_owned(),
            };
        }
        RouteError::Network {
            url,
            message: error.to_string(),
        }
    }
}

/// `{base_url}/v2/directions/{profile}`, tolerating a trailing slash.
fn directions_url(base_url: &str, profile: &str) -> Result<Url, url::ParseError> {
    let base = base_url.trim_end_matches('/');
    Url::parse(&format!("{base}/v2/directions/{profile}"))
}

/// Coordinates stay out of error messages and logs.
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.into()
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch directions for `endpoints`.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime, the runtime must be multi-threaded
    /// to be reused. A `current_thread` caller falls back to the provider's
    /// own runtime, which blocks the caller's executor for the request.
    fn directions(&self, endpoints: &RouteEndpoints) -> Result<Value, RouteError> {
        let future = self.fetch_directions(endpoints);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
