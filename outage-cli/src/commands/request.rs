//! Request command - issue one raw call against the upstream service.

use anyhow::{Context, Result};
use clap::Args;
use outage_fetch::{ApiResponse, FetchError, Method, StatusSink, StdoutSink};
use serde_json::Value;

use super::{build_api, load_config};
use crate::Cli;

/// Arguments for the request command.
#[derive(Args)]
pub struct RequestArgs {
    /// Request method (GET or POST).
    pub method: String,

    /// Endpoint relative to the base URL, e.g. `outages`.
    pub endpoint: String,

    /// JSON body for POST.
    #[arg(long)]
    pub body: Option<String>,
}

/// Runs the request command.
pub async fn run(args: &RequestArgs, cli: &Cli) -> Result<()> {
    parse_method(&args.method, &StdoutSink)?;
    let body = parse_body(args.body.as_deref())?;
    let config = load_config(cli)?;
    let api = build_api(&config)?;

    match api.raw(&args.method, &args.endpoint, body.as_ref()).await? {
        ApiResponse::Payload(value) => {
            let text = if cli.pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{text}");
        }
        ApiResponse::Status(code) => println!("{code}"),
    }

    Ok(())
}

/// Rejects unknown methods before any credential or network work.
fn parse_method(method: &str, sink: &dyn StatusSink) -> Result<Method, FetchError> {
    method.parse::<Method>().inspect_err(|e| sink.emit(&e.to_string()))
}

fn parse_body(body: Option<&str>) -> Result<Option<Value>> {
    body.map(serde_json::from_str)
        .transpose()
        .context("--body is not valid JSON")
}
