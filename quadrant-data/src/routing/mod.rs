//! HTTP directions provider for walking routes.
//!
//! This module provides [`HttpRouteProvider`], an implementation of
//! [`quadrant_core::RouteProvider`] that forwards a start and end coordinate
//! to an openrouteservice-compatible directions API and returns the JSON
//! body unchanged.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use quadrant_core::{RouteEndpoints, RouteProvider};
//! use quadrant_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//!
//! let config = HttpRouteProviderConfig::new("https://api.openrouteservice.org")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let endpoints = RouteEndpoints::parse("-76.71,39.25", "-76.70,39.26")?;
//! let directions = provider.directions(&endpoints)?;
//! println!("{directions}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider,
    HttpRouteProviderConfig, ProviderBuildError,
};
