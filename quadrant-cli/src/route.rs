//! `route` command implementation.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use quadrant_core::{RouteEndpoints, RouteProvider};
use quadrant_data::{HttpRouteProvider, HttpRouteProviderConfig};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_END, ARG_PROFILE, ARG_START, CliError, ENV_ROUTE_END,
    ENV_ROUTE_START, write_json,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "route",
    long_about = "Ask an openrouteservice-compatible directions API for a \
                 walking route between two `lon,lat` coordinates and print \
                 the provider's JSON response unchanged.",
    about = "Fetch walking directions"
)]
#[ortho_config(prefix = "QUADRANT")]
pub(crate) struct RouteArgs {
    /// Start coordinate as `lon,lat`.
    #[arg(long = ARG_START, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// End coordinate as `lon,lat`.
    #[arg(long = ARG_END, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Base URL of the directions service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// API key sent in the `Authorization` header.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Routing profile, e.g. "foot-walking".
    #[arg(long = ARG_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct RouteConfig {
    pub(crate) endpoints: RouteEndpoints,
    pub(crate) provider: HttpRouteProviderConfig,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let start = args.start.ok_or(CliError::MissingArgument {
            field: ARG_START,
            env: ENV_ROUTE_START,
        })?;
        let end = args.end.ok_or(CliError::MissingArgument {
            field: ARG_END,
            env: ENV_ROUTE_END,
        })?;
        let endpoints = RouteEndpoints::parse(&start, &end).map_err(CliError::InvalidEndpoint)?;

        let defaults = HttpRouteProviderConfig::default();
        let mut provider = HttpRouteProviderConfig::new(args.base_url.unwrap_or(defaults.base_url))
            .with_profile(args.profile.unwrap_or(defaults.profile));
        if let Some(api_key) = args.api_key {
            provider = provider.with_api_key(api_key);
        }

        Ok(Self {
            endpoints,
            provider,
        })
    }
}

/// Builds the directions provider for the current route invocation.
pub(super) trait RouteProviderBuilder {
    fn build<'a>(
        &'a self,
        config: &HttpRouteProviderConfig,
    ) -> Result<Box<dyn RouteProvider + 'a>, CliError>;
}

pub(super) struct DefaultRouteProviderBuilder;

impl RouteProviderBuilder for DefaultRouteProviderBuilder {
    fn build<'a>(
        &'a self,
        config: &HttpRouteProviderConfig,
    ) -> Result<Box<dyn RouteProvider + 'a>, CliError> {
        let provider = HttpRouteProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteProviderBuilder;
    run_route_with(args, &builder, &mut stdout)
}

pub(super) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let provider = builder.build(&config.provider)?;
    let body = provider
        .directions(&config.endpoints)
        .map_err(CliError::Directions)?;
    write_json(writer, &body)
}

#[cfg(test)]
pub(crate) fn route_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
