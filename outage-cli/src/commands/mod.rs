//! CLI command implementations.

pub mod report;
pub mod request;

use std::sync::Arc;

use anyhow::{Context, Result};
use outage_fetch::{ApiClient, OutageApi, StdoutSink, resolve_api_key};
use tracing::debug;

use crate::Cli;
use crate::config::Config;

/// Loads the config file and applies the global overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(path) = &cli.api_key_file {
        config.api_key_file.clone_from(path);
    }
    Ok(config)
}

/// Builds the authenticated API client described by `config`.
fn build_api(config: &Config) -> Result<OutageApi> {
    let client = ApiClient::with_timeout(&config.base_url, config.timeout())?
        .with_retry_policy(config.retry_policy()?)
        .with_sink(Arc::new(StdoutSink));
    debug!(base_url = %client.base_url(), "Created API client");

    let api_key = resolve_api_key(&config.api_key_file).context("loading API key")?;
    Ok(OutageApi::new(client, &api_key)?)
}
