//! Report command - fetch, filter, submit and print site outages.

use anyhow::Result;
use clap::Args;
use outage_core::{SiteOutage, SystemClock, filter_for_site};
use outage_fetch::OutageApi;
use tracing::info;

use super::{build_api, load_config};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the report command.
#[derive(Args, Default)]
pub struct ReportArgs {
    /// Site identifier (overrides config).
    #[arg(long)]
    pub site: Option<String>,

    /// Earliest outage begin time, ISO-8601 (overrides config).
    #[arg(long)]
    pub cutoff: Option<String>,

    /// Skip submitting the filtered outages upstream.
    #[arg(long)]
    pub no_submit: bool,
}

/// Runs the report command.
pub async fn run(args: &ReportArgs, cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(site) = &args.site {
        config.site_id.clone_from(site);
    }
    if let Some(cutoff) = &args.cutoff {
        config.cutoff.clone_from(cutoff);
    }
    config.validate()?;

    let api = build_api(&config)?;
    let site_outages =
        generate_report(&api, &config.site_id, &config.cutoff, !args.no_submit).await?;

    let clock = SystemClock;
    let output = match cli.format {
        OutputFormat::Text => TextFormatter::new(&clock).format_report(&site_outages)?,
        OutputFormat::Json => JsonFormatter::new(cli.pretty, &clock).format_report(&site_outages)?,
    };
    println!("{output}");

    Ok(())
}

/// Fetches site info and outages, filters them to the site, and submits
/// the result unless `submit` is false.
pub async fn generate_report(
    api: &OutageApi,
    site_id: &str,
    cutoff: &str,
    submit: bool,
) -> Result<Vec<SiteOutage>> {
    info!(site = %site_id, "Fetching site info");
    let site = api.site_info(site_id).await?;

    info!("Fetching outages");
    let outages = api.outages().await?;

    let site_outages = filter_for_site(&outages, &site, cutoff);
    info!(
        total = outages.len(),
        kept = site_outages.len(),
        cutoff = %cutoff,
        "Filtered outages for site"
    );

    if submit {
        api.submit_site_outages(site_id, &site_outages).await?;
    } else {
        info!("Submission skipped");
    }

    Ok(site_outages)
}

// ============================================================================
// Tests
// ============================================================================
